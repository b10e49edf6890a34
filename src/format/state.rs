//! Character and paragraph formatting state
//!
//! This module defines the format data model: the full per-character format
//! (`CharFormat`), the partial format used for merge-style mutations
//! (`FormatPatch`), and the paragraph alignment enum.
//!
//! Formats are never persisted on their own; they live in the text surface's
//! runs and in the caret's pending format. Saving a document writes plain
//! text only.

// ─────────────────────────────────────────────────────────────────────────────
// Point Size Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest accepted character point size. Zero is degenerate but accepted.
pub const MIN_POINT_SIZE: u32 = 0;

/// Largest accepted character point size.
pub const MAX_POINT_SIZE: u32 = 100;

/// Clamp a requested point size into `[MIN_POINT_SIZE, MAX_POINT_SIZE]`.
///
/// Out-of-range input (including negative values from a spin box) is clamped,
/// never rejected. Idempotent: `clamp_point_size(clamp_point_size(n) as i64)`
/// equals `clamp_point_size(n)`.
pub fn clamp_point_size(requested: i64) -> u32 {
    requested.clamp(MIN_POINT_SIZE as i64, MAX_POINT_SIZE as i64) as u32
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// An RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Font Weight
// ─────────────────────────────────────────────────────────────────────────────

/// Font weight, following the usual CSS numeric scale.
///
/// The toggle path only ever produces `Normal` or `Bold`; the richer scale
/// exists so formats read back from the surface can represent text that was
/// never toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Bold,
    Black,
}

impl FontWeight {
    /// The numeric CSS weight for this variant.
    pub fn css_weight(self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
        }
    }

    /// Whether this weight counts as bold (weight at or above `Bold`).
    pub fn is_bold(self) -> bool {
        self.css_weight() >= FontWeight::Bold.css_weight()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paragraph Alignment
// ─────────────────────────────────────────────────────────────────────────────

/// Paragraph alignment. Paragraph-scoped, never per-character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Get a display label for the alignment.
    pub fn label(&self) -> &'static str {
        match self {
            Alignment::Left => "Left",
            Alignment::Center => "Center",
            Alignment::Right => "Right",
            Alignment::Justify => "Justify",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Character Format
// ─────────────────────────────────────────────────────────────────────────────

/// The complete character format of a text run, or of the caret's pending
/// format (the format the next typed character adopts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharFormat {
    /// Font family name (None inherits the display font's family)
    pub family: Option<String>,
    /// Point size, always within `[MIN_POINT_SIZE, MAX_POINT_SIZE]`
    pub point_size: u32,
    /// Font weight
    pub weight: FontWeight,
    /// Italic slant
    pub italic: bool,
    /// Underline decoration
    pub underline: bool,
    /// Strike-out decoration
    pub strikeout: bool,
    /// Text color (None means the theme's text color)
    pub color: Option<Rgb>,
}

impl Default for CharFormat {
    fn default() -> Self {
        Self {
            family: None,
            point_size: 12,
            weight: FontWeight::Normal,
            italic: false,
            underline: false,
            strikeout: false,
            color: None,
        }
    }
}

impl CharFormat {
    /// Whether this format renders as bold.
    pub fn is_bold(&self) -> bool {
        self.weight.is_bold()
    }

    /// Apply a partial format, overwriting exactly the fields the patch sets.
    ///
    /// Unset patch fields leave the corresponding attribute untouched, which
    /// is what keeps unrelated attributes intact across mixed-format runs.
    pub fn apply(&mut self, patch: &FormatPatch) {
        if let Some(family) = &patch.family {
            self.family = Some(family.clone());
        }
        if let Some(size) = patch.point_size {
            self.point_size = size;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(strikeout) = patch.strikeout {
            self.strikeout = strikeout;
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
        }
    }

    /// Return a copy with the patch applied.
    pub fn with(&self, patch: &FormatPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Patch
// ─────────────────────────────────────────────────────────────────────────────

/// A partial character format: one optional field per attribute.
///
/// Patches are how all character-format mutations travel through the applier.
/// Merging a patch onto a selection touches only the set fields of each run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatPatch {
    pub family: Option<String>,
    pub point_size: Option<u32>,
    pub weight: Option<FontWeight>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikeout: Option<bool>,
    pub color: Option<Rgb>,
}

impl FormatPatch {
    /// Patch setting only the font family.
    pub fn family(name: impl Into<String>) -> Self {
        Self {
            family: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch setting only the point size. The requested size is clamped here,
    /// so a patch can never carry an out-of-range value.
    pub fn point_size(requested: i64) -> Self {
        Self {
            point_size: Some(clamp_point_size(requested)),
            ..Self::default()
        }
    }

    /// Patch setting only the weight.
    pub fn weight(weight: FontWeight) -> Self {
        Self {
            weight: Some(weight),
            ..Self::default()
        }
    }

    /// Patch setting only the italic flag.
    pub fn italic(italic: bool) -> Self {
        Self {
            italic: Some(italic),
            ..Self::default()
        }
    }

    /// Patch setting only the underline flag.
    pub fn underline(underline: bool) -> Self {
        Self {
            underline: Some(underline),
            ..Self::default()
        }
    }

    /// Patch setting only the strike-out flag.
    pub fn strikeout(strikeout: bool) -> Self {
        Self {
            strikeout: Some(strikeout),
            ..Self::default()
        }
    }

    /// Patch setting only the text color.
    pub fn color(color: Rgb) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Whether the patch sets no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_point_size_in_range() {
        assert_eq!(clamp_point_size(0), 0);
        assert_eq!(clamp_point_size(12), 12);
        assert_eq!(clamp_point_size(100), 100);
    }

    #[test]
    fn test_clamp_point_size_out_of_range() {
        assert_eq!(clamp_point_size(150), 100);
        assert_eq!(clamp_point_size(-5), 0);
        assert_eq!(clamp_point_size(i64::MAX), 100);
        assert_eq!(clamp_point_size(i64::MIN), 0);
    }

    #[test]
    fn test_clamp_point_size_idempotent() {
        for n in [-50, 0, 12, 99, 100, 101, 1000] {
            let once = clamp_point_size(n);
            assert_eq!(clamp_point_size(once as i64), once);
        }
    }

    #[test]
    fn test_font_weight_is_bold() {
        assert!(!FontWeight::Light.is_bold());
        assert!(!FontWeight::Normal.is_bold());
        assert!(!FontWeight::Medium.is_bold());
        assert!(FontWeight::Bold.is_bold());
        assert!(FontWeight::Black.is_bold());
    }

    #[test]
    fn test_char_format_default() {
        let format = CharFormat::default();
        assert!(format.family.is_none());
        assert_eq!(format.point_size, 12);
        assert!(!format.is_bold());
        assert!(!format.italic);
        assert!(!format.underline);
        assert!(!format.strikeout);
        assert!(format.color.is_none());
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut format = CharFormat {
            family: Some("Serif".to_string()),
            point_size: 14,
            weight: FontWeight::Bold,
            italic: true,
            underline: false,
            strikeout: false,
            color: Some(Rgb::new(200, 30, 30)),
        };

        format.apply(&FormatPatch::underline(true));

        // Only underline changed
        assert!(format.underline);
        assert_eq!(format.family.as_deref(), Some("Serif"));
        assert_eq!(format.point_size, 14);
        assert_eq!(format.weight, FontWeight::Bold);
        assert!(format.italic);
        assert!(!format.strikeout);
        assert_eq!(format.color, Some(Rgb::new(200, 30, 30)));
    }

    #[test]
    fn test_patch_point_size_clamps_on_construction() {
        let patch = FormatPatch::point_size(150);
        assert_eq!(patch.point_size, Some(100));

        let patch = FormatPatch::point_size(-1);
        assert_eq!(patch.point_size, Some(0));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(FormatPatch::default().is_empty());
        assert!(!FormatPatch::italic(true).is_empty());
        assert!(!FormatPatch::family("Sans").is_empty());
    }

    #[test]
    fn test_char_format_with_returns_copy() {
        let base = CharFormat::default();
        let bolded = base.with(&FormatPatch::weight(FontWeight::Bold));
        assert!(bolded.is_bold());
        assert!(!base.is_bold());
    }

    #[test]
    fn test_alignment_labels() {
        assert_eq!(Alignment::Left.label(), "Left");
        assert_eq!(Alignment::Center.label(), "Center");
        assert_eq!(Alignment::Right.label(), "Right");
        assert_eq!(Alignment::Justify.label(), "Justify");
    }

    #[test]
    fn test_alignment_default_is_left() {
        assert_eq!(Alignment::default(), Alignment::Left);
    }
}
