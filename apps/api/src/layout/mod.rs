// Layout policy shared by the HTML and PDF renderers: which sections appear
// and in what order, the font-size scales, and static glyph metrics for PDF
// line wrapping.

pub mod font_metrics;
pub mod sections;
pub mod typography;

pub use font_metrics::PdfFont;
pub use sections::{parse_hidden, resolve_section_order, SectionId, DEFAULT_SECTION_ORDER};
pub use typography::{FontSize, HtmlTypeScale, PdfTypeScale};
