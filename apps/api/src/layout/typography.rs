//! Font size policy shared by the HTML and PDF renderers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-selectable base font size. Only the sizes in [`FontSize::ALL`] exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FontSize(u8);

impl FontSize {
    pub const ALL: [FontSize; 8] = [
        FontSize(8),
        FontSize(9),
        FontSize(10),
        FontSize(11),
        FontSize(12),
        FontSize(14),
        FontSize(16),
        FontSize(18),
    ];

    pub const DEFAULT: FontSize = FontSize(10);

    pub fn get(self) -> u8 {
        self.0
    }

    /// Scale used by the HTML templates (CSS pixels).
    pub fn html_scale(self) -> HtmlTypeScale {
        let base = self.0;
        HtmlTypeScale {
            heading_px: base,
            content_px: base.saturating_sub(1).max(7),
            title_px: base.saturating_sub(2).max(6),
            name: NameSize::for_base(base),
        }
    }

    /// Scale used by the PDF templates (points). At the default size this is
    /// 9 / 8 / 7 with an 11pt name.
    pub fn pdf_scale(self) -> PdfTypeScale {
        let base = self.0 as f32;
        PdfTypeScale {
            heading: base - 1.0,
            content: (base - 2.0).max(6.0),
            small: (base - 3.0).max(5.0),
            name: base + 1.0,
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::DEFAULT
    }
}

impl TryFrom<u8> for FontSize {
    type Error = InvalidFontSize;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FontSize::ALL
            .iter()
            .copied()
            .find(|s| s.0 == value)
            .ok_or(InvalidFontSize(value))
    }
}

impl From<FontSize> for u8 {
    fn from(size: FontSize) -> u8 {
        size.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidFontSize(pub u8);

impl fmt::Display for InvalidFontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "font size {} is not one of 8, 9, 10, 11, 12, 14, 16, 18",
            self.0
        )
    }
}

impl std::error::Error for InvalidFontSize {}

// ────────────────────────────────────────────────────────────────────────────
// Scales
// ────────────────────────────────────────────────────────────────────────────

/// Header name size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameSize {
    Lg,
    Xl,
    Xxl,
}

impl NameSize {
    fn for_base(base: u8) -> Self {
        if base >= 12 {
            NameSize::Xxl
        } else if base >= 10 {
            NameSize::Xl
        } else {
            NameSize::Lg
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            NameSize::Lg => "text-lg",
            NameSize::Xl => "text-xl",
            NameSize::Xxl => "text-2xl",
        }
    }

    pub fn rem(&self) -> f32 {
        match self {
            NameSize::Lg => 1.125,
            NameSize::Xl => 1.25,
            NameSize::Xxl => 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlTypeScale {
    pub heading_px: u8,
    pub content_px: u8,
    pub title_px: u8,
    pub name: NameSize,
}

impl HtmlTypeScale {
    pub fn heading_class(&self) -> String {
        format!("fs-{}", self.heading_px)
    }

    pub fn content_class(&self) -> String {
        format!("fs-{}", self.content_px)
    }

    pub fn title_class(&self) -> String {
        format!("fs-{}", self.title_px)
    }

    /// Size classes referenced by this scale, deduplicated.
    pub fn pixel_sizes(&self) -> Vec<u8> {
        let mut sizes = vec![self.heading_px, self.content_px, self.title_px];
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdfTypeScale {
    pub heading: f32,
    pub content: f32,
    pub small: f32,
    pub name: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_listed_sizes_accepted() {
        assert!(FontSize::try_from(10).is_ok());
        assert!(FontSize::try_from(18).is_ok());
        assert_eq!(FontSize::try_from(13), Err(InvalidFontSize(13)));
        assert!(serde_json::from_str::<FontSize>("15").is_err());
        assert_eq!(serde_json::from_str::<FontSize>("14").unwrap().get(), 14);
    }

    #[test]
    fn test_html_scale_default() {
        let scale = FontSize::DEFAULT.html_scale();
        assert_eq!(scale.heading_px, 10);
        assert_eq!(scale.content_px, 9);
        assert_eq!(scale.title_px, 8);
        assert_eq!(scale.name.class_name(), "text-xl");
    }

    #[test]
    fn test_html_scale_clamps_small_sizes() {
        let scale = FontSize::try_from(8).unwrap().html_scale();
        assert_eq!(scale.content_px, 7);
        assert_eq!(scale.title_px, 6);
        assert_eq!(scale.name, NameSize::Lg);
    }

    #[test]
    fn test_name_class_thresholds() {
        let name = |s: u8| FontSize::try_from(s).unwrap().html_scale().name;
        assert_eq!(name(9), NameSize::Lg);
        assert_eq!(name(11), NameSize::Xl);
        assert_eq!(name(12), NameSize::Xxl);
        assert_eq!(name(18), NameSize::Xxl);
    }

    #[test]
    fn test_pdf_scale_default_matches_print_sizes() {
        let scale = FontSize::DEFAULT.pdf_scale();
        assert_eq!(scale.heading, 9.0);
        assert_eq!(scale.content, 8.0);
        assert_eq!(scale.small, 7.0);
        assert_eq!(scale.name, 11.0);
    }

    #[test]
    fn test_pdf_scale_tracks_base_size() {
        let small = FontSize::try_from(8).unwrap().pdf_scale();
        let large = FontSize::try_from(16).unwrap().pdf_scale();
        assert!(large.content > small.content);
        assert_eq!(small.small, 5.0);
    }

    #[test]
    fn test_pixel_sizes_deduplicated() {
        let sizes = FontSize::DEFAULT.html_scale().pixel_sizes();
        assert_eq!(sizes, vec![8, 9, 10]);
    }
}
