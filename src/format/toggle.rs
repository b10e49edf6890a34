//! Toggle resolution for boolean style attributes
//!
//! Bold, italic, underline, and strike-out share one algorithm: negate the
//! current value. They differ only in which `CharFormat` field they project
//! and inject. Bold additionally collapses the weight scale.

use crate::format::state::FontWeight;

/// Resolve the next value of a boolean style attribute. Pure negation.
pub fn toggle(current: bool) -> bool {
    !current
}

/// Resolve the next weight for a bold toggle.
///
/// Toggling always lands on exactly `Normal` or `Bold`. Intermediate weights
/// (e.g. `Light`) are discarded: toggling bold on and off again yields
/// `Normal`, not the starting weight.
pub fn toggle_weight(current: FontWeight) -> FontWeight {
    if current.is_bold() {
        FontWeight::Normal
    } else {
        FontWeight::Bold
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_negates() {
        assert!(toggle(false));
        assert!(!toggle(true));
    }

    #[test]
    fn test_toggle_involution() {
        for b in [false, true] {
            assert_eq!(toggle(toggle(b)), b);
        }
    }

    #[test]
    fn test_toggle_weight_lands_on_bold_or_normal() {
        assert_eq!(toggle_weight(FontWeight::Normal), FontWeight::Bold);
        assert_eq!(toggle_weight(FontWeight::Bold), FontWeight::Normal);
    }

    #[test]
    fn test_toggle_weight_collapses_intermediate_weights() {
        // Light and Medium count as not-bold, so they toggle to Bold;
        // Black counts as bold, so it toggles to Normal.
        assert_eq!(toggle_weight(FontWeight::Light), FontWeight::Bold);
        assert_eq!(toggle_weight(FontWeight::Medium), FontWeight::Bold);
        assert_eq!(toggle_weight(FontWeight::Black), FontWeight::Normal);

        // A second toggle never restores the starting weight.
        assert_eq!(
            toggle_weight(toggle_weight(FontWeight::Light)),
            FontWeight::Normal
        );
    }
}
