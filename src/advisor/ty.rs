/// A non-binding recommendation to reinforce a logo mark placed over
/// photographic imagery.
///
/// `needs_enhancement == false` means "render unmodified": both
/// suggestion fields are `None` and the caller applies nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct LegibilityAdvisory {
    pub needs_enhancement: bool,
    /// CSS `linear-gradient(...)` scrim to place behind the mark.
    pub suggested_gradient: Option<String>,
    /// Backing plate, border and drop shadow for the mark itself.
    pub suggested_logo_effect: Option<LogoEffect>,
}

impl LegibilityAdvisory {
    /// The "leave it alone" advisory.
    pub(crate) fn unmodified() -> LegibilityAdvisory {
        LegibilityAdvisory {
            needs_enhancement: false,
            suggested_gradient: None,
            suggested_logo_effect: None,
        }
    }
}

/// CSS-equivalent backing treatment for a logo mark.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoEffect {
    /// Semi-transparent plate behind the mark, e.g. `rgba(0,0,0,0.55)`.
    pub background: String,
    /// Hairline separating the plate from the imagery.
    pub border: String,
    /// Drop shadow lifting the mark off the backdrop.
    pub shadow: String,
}

/// Direction a scrim pushes the backdrop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScrimKind {
    Darken,
    Lighten,
}

/// One stop of a scrim gradient.  Invariant: positions ascend, 0 to 100.
pub(crate) struct ScrimStop {
    /// Scrim hue opacity, in \[0, 1\].
    pub(crate) alpha: f64,
    /// Percent along the gradient axis.
    pub(crate) position: u8,
}
