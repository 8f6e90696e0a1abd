//! Logo legibility advisories.
//!
//! [`check_logo_contrast`] inspects a backdrop palette against the
//! logo's colors and, when the imagery sits too close to the mark,
//! synthesizes a scrim gradient and a backing treatment for the
//! rendering layer to apply.  The advisory is a recommendation, not a
//! mandate: callers are free to ignore it.

use lazy_static::lazy_static;
use tracing::debug;

use crate::{contrast_ratio, Color, Palette, WCAG_AA};

pub(crate) mod ty;
use ty::{LegibilityAdvisory, LogoEffect, ScrimKind, ScrimStop};

lazy_static! {
    /// Stop tables for the corrective scrims.  Alphas taper to zero so
    /// the scrim reads as a vignette rather than a panel.
    static ref DARKEN_STOPS: Vec<ScrimStop> = vec![
        ScrimStop { alpha: 0.85, position: 0 },
        ScrimStop { alpha: 0.55, position: 45 },
        ScrimStop { alpha: 0., position: 100 },
    ];
    static ref LIGHTEN_STOPS: Vec<ScrimStop> = vec![
        ScrimStop { alpha: 0.90, position: 0 },
        ScrimStop { alpha: 0.60, position: 45 },
        ScrimStop { alpha: 0., position: 100 },
    ];
}

/// Scrim axis: from the mark's safe area down into the imagery.
const SCRIM_ANGLE_DEG: u16 = 180;

const PLATE_ALPHA: f64 = 0.55;
const BORDER_ALPHA: f64 = 0.35;
const SHADOW_ALPHA: f64 = 0.45;

fn scrim_gradient(kind: ScrimKind) -> String {
    let (stops, tone): (&[ScrimStop], u8) = match kind {
        ScrimKind::Darken => (&DARKEN_STOPS[..], 0),
        ScrimKind::Lighten => (&LIGHTEN_STOPS[..], 255),
    };
    let stops = stops.iter()
        .map(|s| format!("rgba({t},{t},{t},{a:.2}) {p}%",
                         t = tone, a = s.alpha, p = s.position))
        .collect::<Vec<_>>()
        .join(", ");
    format!("linear-gradient({SCRIM_ANGLE_DEG}deg, {stops})")
}

/// Backing treatment for the mark: the plate takes whichever of pure
/// black / pure white contrasts harder with the logo itself.
fn logo_effect(logo_primary: Color) -> LogoEffect {
    let plate = if contrast_ratio(Color::WHITE, logo_primary)
                   >= contrast_ratio(Color::BLACK, logo_primary) {
        Color::WHITE
    } else {
        Color::BLACK
    };
    LogoEffect {
        background: plate.with_alpha(PLATE_ALPHA * 255.).to_css(),
        border: format!("1px solid {}",
                        plate.with_alpha(BORDER_ALPHA * 255.).to_css()),
        shadow: format!("0 2px 12px {}",
                        plate.with_alpha(SHADOW_ALPHA * 255.).to_css()),
    }
}

/// Decide whether a logo mark needs reinforcement over `palette`.
///
/// A palette entry conflicts when its contrast ratio against either the
/// logo's primary color or its glow falls below [`WCAG_AA`];
/// reinforcement is recommended once conflicts cover at least half of
/// the palette.  An empty palette is no evidence of conflict, so the
/// advisory comes back empty and the caller renders unmodified.
///
/// The scrim lightens when the palette's mean luminance sits in the dark
/// half of the scale (the light end is under-represented there) and
/// darkens otherwise.
pub fn check_logo_contrast(palette: &Palette, logo_primary: Color,
                           glow: Color) -> LegibilityAdvisory {
    let conflicts = palette.colors().iter()
        .filter(|&&c| contrast_ratio(c, logo_primary) < WCAG_AA
                      || contrast_ratio(c, glow) < WCAG_AA)
        .count();
    if conflicts == 0 || 2 * conflicts < palette.len() {
        return LegibilityAdvisory::unmodified()
    }
    let kind = if palette.mean_luminance() < 0.5 { ScrimKind::Lighten }
               else { ScrimKind::Darken };
    debug!(conflicts, palette_len = palette.len(), ?kind,
           "logo needs reinforcement");
    LegibilityAdvisory {
        needs_enhancement: true,
        suggested_gradient: Some(scrim_gradient(kind)),
        suggested_logo_effect: Some(logo_effect(logo_primary)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn palette(hex: &[&str]) -> Palette {
        Palette::from_hex(hex)
    }

    fn color(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn empty_palette_reports_no_conflict() {
        let advisory = check_logo_contrast(&Palette::default(),
                                           color("#101010"),
                                           color("#ff0000"));
        assert_eq!(advisory, LegibilityAdvisory::unmodified());
    }

    #[test]
    fn dark_palette_dark_logo_gets_lightening_scrim() {
        let advisory = check_logo_contrast(&palette(&["#202020", "#1a1a1a"]),
                                           color("#101010"),
                                           color("#ff0000"));
        assert!(advisory.needs_enhancement);
        let gradient = advisory.suggested_gradient.unwrap();
        assert!(gradient.starts_with("linear-gradient(180deg"));
        assert!(gradient.contains("rgba(255,255,255"),
                "expected a lightening scrim: {gradient}");
    }

    #[test]
    fn bright_palette_bright_logo_gets_darkening_scrim() {
        let advisory = check_logo_contrast(
            &palette(&["#f4f4f4", "#e8e8e8", "#fafafa"]),
            color("#ffffff"), color("#ffe066"));
        assert!(advisory.needs_enhancement);
        let gradient = advisory.suggested_gradient.unwrap();
        assert!(gradient.contains("rgba(0,0,0"),
                "expected a darkening scrim: {gradient}");
    }

    #[test]
    fn clashing_minority_does_not_force_enhancement() {
        // One dark entry out of three conflicts with the dark logo;
        // that is not a meaningful fraction of the backdrop.
        let advisory = check_logo_contrast(
            &palette(&["#181818", "#f2f2f2", "#ffffff"]),
            color("#0a0a0a"), color("#000000"));
        assert_eq!(advisory, LegibilityAdvisory::unmodified());
    }

    #[test]
    fn glow_conflicts_count_too() {
        // The logo primary clears every entry, but the glow sits right
        // on the palette's tone.
        let advisory = check_logo_contrast(
            &palette(&["#d9d9d9", "#e6e6e6"]),
            color("#000000"), color("#dddddd"));
        assert!(advisory.needs_enhancement);
    }

    #[test]
    fn dark_logo_gets_white_plate() {
        let advisory = check_logo_contrast(&palette(&["#101010", "#0a0a0a"]),
                                           color("#050505"),
                                           color("#101010"));
        let effect = advisory.suggested_logo_effect.unwrap();
        assert_eq!(effect.background, "rgba(255,255,255,0.55)");
        assert!(effect.border.starts_with("1px solid rgba(255,255,255"));
        assert!(effect.shadow.starts_with("0 2px 12px rgba(255,255,255"));
    }

    #[test]
    fn bright_logo_gets_black_plate() {
        let advisory = check_logo_contrast(
            &palette(&["#f4f4f4", "#e8e8e8", "#fafafa"]),
            color("#ffffff"), color("#ffe066"));
        let effect = advisory.suggested_logo_effect.unwrap();
        assert_eq!(effect.background, "rgba(0,0,0,0.55)");
    }

    #[test]
    fn scrim_stops_taper_to_transparent() {
        let g = scrim_gradient(ScrimKind::Darken);
        assert!(g.ends_with("rgba(0,0,0,0.00) 100%)"), "{g}");
    }
}
