//! Contrast-safe overlay colors for arbitrary image backdrops.
//!
//! Marketing templates draw text and logo marks over photos they have
//! never seen.  Given the dominant [`Palette`] of such a photo and the
//! brand's [`LogoColors`], this crate picks a foreground color that is
//! guaranteed to stay readable ([`ensure_contrast`]) and, when the
//! imagery fights the mark itself, recommends a corrective scrim or
//! backing plate ([`check_logo_contrast`]).
//!
//! - [`Color`] — parsing, relative luminance, compositing
//! - [`ColorContext`] — one immutable bundle of decisions per rendered
//!   slide
//! - [`LegibilityAdvisory`] — non-binding reinforcement suggestions
//!
//! All colors cross the public boundary as CSS hex strings; internally
//! they are `rgb` crate values with `f64` channels in \[0, 255\].

use std::fmt;
use std::str::FromStr;
use rgb::{RGBA, RGB8, RGBA8};
use thiserror::Error;
use tracing::warn;

mod advisor;
pub mod placement;
pub use advisor::check_logo_contrast;
pub use advisor::ty::{LegibilityAdvisory, LogoEffect};

/// Reasons a string fails to parse as a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("empty color string")]
    Empty,
    #[error("expected 3, 6 or 8 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit {0:?}")]
    BadDigit(char),
}

/// An sRGB color with straight alpha, channels in \[0, 255\].
///
/// Wraps [`RGBA<f64>`]; integer encodings convert in via `From`.  The
/// [`Display`](fmt::Display) form is the lowercase `#rrggbb` the CSS
/// layer consumes ([`to_css`](Color::to_css) when alpha matters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(RGBA<f64>);

fn hex_digit(b: u8) -> Result<f64, ParseColorError> {
    match b {
        b'0'..=b'9' => Ok((b - b'0') as f64),
        b'a'..=b'f' => Ok((b - b'a' + 10) as f64),
        b'A'..=b'F' => Ok((b - b'A' + 10) as f64),
        _ => Err(ParseColorError::BadDigit(b as char)),
    }
}

/// Channel value rounded to the nearest 8-bit step.
#[inline]
fn quant(v: f64) -> u8 {
    (v.clamp(0., 255.) + 0.5) as u8
}

impl Color {
    pub const BLACK: Color = Color(RGBA { r: 0., g: 0., b: 0., a: 255. });
    pub const WHITE: Color = Color(RGBA { r: 255., g: 255., b: 255., a: 255. });

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    ///
    /// # Example
    ///
    /// ```
    /// use legible::Color;
    /// let teal = Color::from_hex("#2a9d8f").unwrap();
    /// assert_eq!(teal.to_string(), "#2a9d8f");
    /// ```
    pub fn from_hex(s: &str) -> Result<Color, ParseColorError> {
        let digits = { let s = s.trim();
                       s.strip_prefix('#').unwrap_or(s) };
        if digits.is_empty() { return Err(ParseColorError::Empty) }
        let bytes = digits.as_bytes();
        let pair = |i: usize| -> Result<f64, ParseColorError> {
            Ok(hex_digit(bytes[i])? * 16. + hex_digit(bytes[i + 1])?)
        };
        let (r, g, b, a) = match bytes.len() {
            3 => (hex_digit(bytes[0])? * 17.,
                  hex_digit(bytes[1])? * 17.,
                  hex_digit(bytes[2])? * 17., 255.),
            6 => (pair(0)?, pair(2)?, pair(4)?, 255.),
            8 => (pair(0)?, pair(2)?, pair(4)?, pair(6)?),
            n => return Err(ParseColorError::BadLength(n)),
        };
        Ok(Color(RGBA { r, g, b, a }))
    }

    /// Fail-safe boundary used on render paths: unparsable input becomes
    /// white and the substitution is logged.  A defective style
    /// computation must still yield a drawable slide, so parse errors
    /// never propagate past this point.
    pub fn from_hex_lossy(s: &str) -> Color {
        match Color::from_hex(s) {
            Ok(c) => c,
            Err(e) => {
                warn!(input = s, error = %e,
                      "substituting white for unparsable color");
                Color::WHITE
            }
        }
    }

    /// Relative luminance: gamma-corrected sRGB channels weighted
    /// 0.2126 / 0.7152 / 0.0722.  In \[0, 1\]; alpha is ignored.
    pub fn luminance(self) -> f64 {
        fn linear(c: f64) -> f64 {
            let c = c / 255.;
            if c <= 0.03928 { c / 12.92 }
            else { ((c + 0.055) / 1.055).powf(2.4) }
        }
        let RGBA { r, g, b, .. } = self.0;
        0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
    }

    /// Componentwise interpolation in sRGB space, `t` clamped to \[0, 1\].
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0., 1.);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Color(RGBA { r: mix(self.0.r, other.0.r),
                     g: mix(self.0.g, other.0.g),
                     b: mix(self.0.b, other.0.b),
                     a: mix(self.0.a, other.0.a) })
    }

    /// Convert the color to grayscale.
    pub fn to_gray(self) -> Color {
        let RGBA { r, g, b, a } = self.0;
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Color(RGBA { r: x, g: x, b: x, a })
    }

    /// Same color with alpha `a` ∈ \[0, 255\].
    pub fn with_alpha(self, a: f64) -> Color {
        Color(RGBA { a: a.clamp(0., 255.), ..self.0 })
    }

    #[inline]
    fn opaque(self) -> Color { self.with_alpha(255.) }

    #[inline]
    fn alpha(self) -> f64 { self.0.a / 255. }

    /// CSS value: `#rrggbb` when opaque, `rgba(r,g,b,a)` when not.
    pub fn to_css(self) -> String {
        if self.0.a >= 255. {
            self.to_string()
        } else {
            format!("rgba({},{},{},{:.2})",
                    quant(self.0.r), quant(self.0.g), quant(self.0.b),
                    self.0.a / 255.)
        }
    }
}

impl From<RGB8> for Color {
    #[inline]
    fn from(c: RGB8) -> Color {
        Color(RGBA { r: c.r as f64, g: c.g as f64, b: c.b as f64, a: 255. })
    }
}

impl From<RGBA8> for Color {
    #[inline]
    fn from(c: RGBA8) -> Color {
        Color(RGBA { r: c.r as f64, g: c.g as f64, b: c.b as f64,
                     a: c.a as f64 })
    }
}

impl FromStr for Color {
    type Err = ParseColorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Color::from_hex(s) }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}",
               quant(self.0.r), quant(self.0.g), quant(self.0.b))
    }
}

/// Half-strength black probe.  Composited over an image color it
/// estimates the darkest tone that region can take on once overlays and
/// image content mix.
pub const DARK_PROBE: Color = Color(RGBA { r: 0., g: 0., b: 0., a: 127.5 });

/// Half-strength white probe, the light counterpart of [`DARK_PROBE`].
pub const LIGHT_PROBE: Color = Color(RGBA { r: 255., g: 255., b: 255.,
                                            a: 127.5 });

/// Composites `overlay` over `base` (source-over, straight alpha).
///
/// Not commutative: the overlay's alpha decides how much of `base` shows
/// through.  A fully opaque overlay is returned unchanged, whatever the
/// base.
pub fn blend_colors(overlay: Color, base: Color) -> Color {
    let sa = overlay.alpha();
    if sa >= 1. { return overlay }
    let da = base.alpha();
    let out_a = sa + da * (1. - sa);
    if out_a <= 0. {
        return Color(RGBA { r: 0., g: 0., b: 0., a: 0. })
    }
    let mix = |s: f64, d: f64| (s * sa + d * da * (1. - sa)) / out_a;
    Color(RGBA { r: mix(overlay.0.r, base.0.r),
                 g: mix(overlay.0.g, base.0.g),
                 b: mix(overlay.0.b, base.0.b),
                 a: out_a * 255. })
}

/// Minimum contrast ratio for normal text under WCAG AA.
///
/// The single documented default; call sites that need a different bar
/// pass one to [`ensure_contrast_with`] or
/// [`ColorContext::with_min_ratio`] instead of re-deriving their own
/// constant.
pub const WCAG_AA: f64 = 4.5;

/// WCAG contrast ratio between two colors.
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`, in \[1, 21\].  Symmetric in
/// its arguments even though [`blend_colors`] is not.  Defined on the
/// composited appearance, so translucent colors should go through
/// [`blend_colors`] first.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = a.luminance();
    let lb = b.luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Outcome of [`ensure_contrast`]: the one foreground color guaranteed
/// legible against the probed backdrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastDecision {
    pub suggested_text_color: Color,
}

/// How far a failing foreground is nudged toward the corrective extreme
/// before giving up and snapping to black or white.
const NUDGE: f64 = 0.2;

/// [`ensure_contrast_with`] at the [`WCAG_AA`] default.
pub fn ensure_contrast(c1: Color, c2: Color) -> ContrastDecision {
    ensure_contrast_with(c1, c2, WCAG_AA)
}

/// Pick a foreground guaranteed legible against `c2`, preferring `c1`.
///
/// `c1` is accepted unchanged when it already meets `min_ratio`.
/// Otherwise it is nudged one step toward black (light backdrop) or
/// white (dark backdrop) and accepted if the nudge suffices; failing
/// that, the result snaps to whichever of pure white / pure black scores
/// the higher ratio against `c2`.  Never fails, always returns an
/// opaque, renderable color, and is idempotent on its own output.
pub fn ensure_contrast_with(c1: Color, c2: Color, min_ratio: f64)
                            -> ContrastDecision {
    let c1 = c1.opaque();
    if contrast_ratio(c1, c2) >= min_ratio {
        return ContrastDecision { suggested_text_color: c1 }
    }
    let target = if c2.luminance() >= 0.5 { Color::BLACK }
                 else { Color::WHITE };
    let nudged = c1.lerp(target, NUDGE);
    if contrast_ratio(nudged, c2) >= min_ratio {
        return ContrastDecision { suggested_text_color: nudged }
    }
    let snapped =
        if contrast_ratio(Color::WHITE, c2) >= contrast_ratio(Color::BLACK, c2) {
            Color::WHITE
        } else {
            Color::BLACK
        };
    ContrastDecision { suggested_text_color: snapped }
}

/// Dominant colors of a backdrop image, most prominent first.
///
/// The engine consumes whatever upstream analysis produced and imposes
/// no cardinality contract.  Order carries meaning: index 0 drives text
/// decisions, the rest weigh into advisories.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Palette {
        Palette { colors }
    }

    /// Build a palette from hex strings through the fail-safe boundary
    /// ([`Color::from_hex_lossy`]).
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Palette {
        Palette { colors: hex.iter()
                      .map(|s| Color::from_hex_lossy(s.as_ref()))
                      .collect() }
    }

    /// Returns the number of colors in the palette.
    pub fn len(&self) -> usize { self.colors.len() }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// Most prominent color, when the palette has any.
    pub fn dominant(&self) -> Option<Color> {
        self.colors.first().copied()
    }

    pub fn colors(&self) -> &[Color] { &self.colors }

    /// Mean relative luminance; 0.5 for an empty palette (no evidence
    /// toward either end of the scale).
    pub(crate) fn mean_luminance(&self) -> f64 {
        if self.colors.is_empty() { return 0.5 }
        let sum: f64 = self.colors.iter().map(|c| c.luminance()).sum();
        sum / self.colors.len() as f64
    }
}

/// Brand logo colors as upstream analysis reports them.
///
/// Not validated beyond color validity; `accent` may be empty.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Vec<Color>,
}

impl LogoColors {
    /// Build the record from hex strings through the fail-safe boundary.
    pub fn from_hex<S: AsRef<str>>(primary: &str, secondary: &str,
                                   accent: &[S]) -> LogoColors {
        LogoColors {
            primary: Color::from_hex_lossy(primary),
            secondary: Color::from_hex_lossy(secondary),
            accent: accent.iter()
                .map(|s| Color::from_hex_lossy(s.as_ref()))
                .collect(),
        }
    }
}

/// Everything the template layer needs to color one slide, built once
/// per render and passed by reference.
///
/// Replaces loosely-typed bags of color callbacks threaded through
/// template closures.  Holds no mutable state, so contexts for
/// different slides can be used from any number of threads at once.
#[derive(Clone, Debug)]
pub struct ColorContext {
    palette: Palette,
    logo: LogoColors,
    glow: Color,
    min_ratio: f64,
}

impl ColorContext {
    pub fn new(palette: Palette, logo: LogoColors, glow: Color)
               -> ColorContext {
        ColorContext { palette, logo, glow, min_ratio: WCAG_AA }
    }

    /// Overrides the [`WCAG_AA`] default used by
    /// [`text_color`](ColorContext::text_color).
    pub fn with_min_ratio(mut self, min_ratio: f64) -> ColorContext {
        self.min_ratio = min_ratio;
        self
    }

    /// The foreground color guaranteed legible over this slide's
    /// backdrop.
    ///
    /// Brackets how the backdrop can actually render — [`DARK_PROBE`]
    /// over the most prominent palette color, [`LIGHT_PROBE`] over the
    /// next (or the same one for single-color palettes) — and lets
    /// [`ensure_contrast_with`] arbitrate between the two estimates.
    /// An empty palette is treated as a white backdrop.
    pub fn text_color(&self) -> ContrastDecision {
        let first = self.palette.dominant().unwrap_or(Color::WHITE);
        let second = self.palette.colors().get(1).copied().unwrap_or(first);
        let dark_estimate = blend_colors(DARK_PROBE, first);
        let light_estimate = blend_colors(LIGHT_PROBE, second);
        ensure_contrast_with(dark_estimate, light_estimate, self.min_ratio)
    }

    /// Reinforcement advisory for the logo mark over this backdrop.
    pub fn logo_advisory(&self) -> LegibilityAdvisory {
        check_logo_contrast(&self.palette, self.logo.primary, self.glow)
    }

    pub fn palette(&self) -> &Palette { &self.palette }

    pub fn logo(&self) -> &LogoColors { &self.logo }

    pub fn min_ratio(&self) -> f64 { self.min_ratio }
}
