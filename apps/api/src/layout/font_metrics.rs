//! Static font-metric tables for the standard PDF fonts used by the print templates.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe core font metrics. The PDF renderer only ever references the base-14
//! Helvetica family, so these tables are exact for ASCII; a handful of
//! WinAnsi punctuation marks have explicit widths and anything else falls
//! back to `average_char_width`.
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// Font faces available to the PDF templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfFont {
    Regular,
    Bold,
    Oblique,
}

impl PdfFont {
    pub const ALL: [PdfFont; 3] = [PdfFont::Regular, PdfFont::Bold, PdfFont::Oblique];

    /// PostScript name written to the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            PdfFont::Regular => "Helvetica",
            PdfFont::Bold => "Helvetica-Bold",
            PdfFont::Oblique => "Helvetica-Oblique",
        }
    }

    /// Key under `/Resources /Font`.
    pub fn resource_name(&self) -> &'static str {
        match self {
            PdfFont::Regular => "F1",
            PdfFont::Bold => "F2",
            PdfFont::Oblique => "F3",
        }
    }

    pub fn metrics(&self) -> &'static FontMetricTable {
        match self {
            PdfFont::Regular | PdfFont::Oblique => &HELVETICA_TABLE,
            PdfFont::Bold => &HELVETICA_BOLD_TABLE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font face.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font_name: &'static str,
    widths: [f32; 95],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '\u{2022}' => 0.35,
            '\u{2013}' => 0.556,
            '\u{2014}' => 1.0,
            '\u{2018}' | '\u{2019}' => 0.222,
            '\u{201C}' | '\u{201D}' => 0.333,
            '\u{00A0}' => self.space_width,
            _ => self.average_char_width,
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of a string in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    /// Greedy word-wrap at `max_width_pt`. An empty or blank string returns no lines.
    ///
    /// Words wider than a whole line are kept intact on their own line.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let max_width = max_width_pt / size_pt;
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + self.space_width + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font_name: "Helvetica",
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font_name: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(PdfFont::Regular.metrics().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = PdfFont::Regular.metrics();
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Work Experience";
        assert!(
            PdfFont::Bold.metrics().measure_str(text) > PdfFont::Regular.metrics().measure_str(text)
        );
    }

    #[test]
    fn test_bullet_has_explicit_width() {
        let width = PdfFont::Regular.metrics().measure_str("\u{2022}");
        assert!((width - 0.35).abs() < 1e-4);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = PdfFont::Regular.metrics();
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_width_pt_scales_with_size() {
        let metrics = PdfFont::Regular.metrics();
        let w8 = metrics.width_pt("Folio", 8.0);
        let w16 = metrics.width_pt("Folio", 16.0);
        assert!((w16 - 2.0 * w8).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_empty_returns_no_lines() {
        assert!(PdfFont::Regular.metrics().wrap("   ", 8.0, 200.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = PdfFont::Regular.metrics().wrap("Built it.", 8.0, 400.0);
        assert_eq!(lines, vec!["Built it.".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let metrics = PdfFont::Regular.metrics();
        let text = "word ".repeat(60);
        let lines = metrics.wrap(&text, 8.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_pt(line, 8.0) <= 200.0 + 1e-3, "line too wide: {line}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim());
    }

    #[test]
    fn test_wrap_keeps_overlong_word_intact() {
        let long = "x".repeat(200);
        let lines = PdfFont::Regular.metrics().wrap(&long, 10.0, 50.0);
        assert_eq!(lines, vec![long]);
    }

    #[test]
    fn test_resource_names_unique() {
        let names: std::collections::HashSet<_> =
            PdfFont::ALL.iter().map(|f| f.resource_name()).collect();
        assert_eq!(names.len(), PdfFont::ALL.len());
    }
}
