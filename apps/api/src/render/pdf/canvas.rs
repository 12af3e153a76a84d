//! Page-flow canvas over lopdf.
//!
//! Templates describe the résumé body as a list of [`Block`]s made of
//! [`Row`]s; the canvas measures them with the static Helvetica metrics,
//! breaks pages, and serializes the result with the base-14 fonts so no font
//! files are embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::layout::PdfFont;
use crate::render::pdf::PdfError;

pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Ascent used to place a baseline below a row's top edge.
const ASCENT: f32 = 0.8;
/// Link hit boxes extend this far below the baseline.
const DESCENT: f32 = 0.2;

// ────────────────────────────────────────────────────────────────────────────
// Geometry and styling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub fn a4(margin_top: f32, margin_sides: f32, margin_bottom: f32) -> Self {
        Self {
            width: A4_WIDTH_PT,
            height: A4_HEIGHT_PT,
            margin_top,
            margin_bottom,
            margin_left: margin_sides,
            margin_right: margin_sides,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }

    pub fn usable_height(&self) -> f32 {
        self.content_top() - self.margin_bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    /// #333
    pub const DARK: Rgb = Rgb(0.2, 0.2, 0.2);
    /// #666
    pub const GRAY: Rgb = Rgb(0.4, 0.4, 0.4);
    /// #0066cc
    pub const LINK: Rgb = Rgb(0.0, 0.4, 0.8);
    /// #1e3a8a
    pub const NAVY: Rgb = Rgb(0.118, 0.227, 0.541);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A run of text in one font.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub font: PdfFont,
    pub size: f32,
    pub color: Rgb,
    pub link: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>, font: PdfFont, size: f32) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            color: Rgb::BLACK,
            link: None,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn link(mut self, uri: impl Into<String>) -> Self {
        self.link = Some(uri.into());
        self
    }

    pub fn width(&self) -> f32 {
        self.font.metrics().width_pt(&self.text, self.size)
    }

    fn spaces(&self) -> usize {
        self.text.chars().filter(|c| *c == ' ').count()
    }
}

/// Spans anchored at `x` (points from the content box's left edge).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub align: Align,
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRow {
    pub cells: Vec<Cell>,
    /// Line height as a multiple of the largest span size.
    pub leading: f32,
    /// Extra space per ASCII space, used for justification.
    pub word_spacing: f32,
}

impl TextRow {
    fn max_size(&self) -> f32 {
        self.cells
            .iter()
            .flat_map(|c| c.spans.iter())
            .map(|s| s.size)
            .fold(0.0_f32, f32::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Text(TextRow),
    /// Horizontal rule across the content width, vertically centered in `gap`.
    Rule { thickness: f32, color: Rgb, gap: f32 },
    Spacer(f32),
}

impl Row {
    /// Left-aligned spans at `indent`.
    pub fn spans(spans: Vec<Span>, indent: f32, leading: f32) -> Row {
        Row::Text(TextRow {
            cells: vec![Cell {
                x: indent,
                align: Align::Left,
                spans,
            }],
            leading,
            word_spacing: 0.0,
        })
    }

    pub fn text(span: Span, indent: f32, leading: f32) -> Row {
        Row::spans(vec![span], indent, leading)
    }

    /// Left span plus a right-aligned span, the "title ... date" line.
    pub fn split(left: Span, right: Span, width: f32, leading: f32) -> Row {
        Row::split_spans(vec![left], right, width, leading)
    }

    pub fn split_spans(left: Vec<Span>, right: Span, width: f32, leading: f32) -> Row {
        Row::Text(TextRow {
            cells: vec![
                Cell {
                    x: 0.0,
                    align: Align::Left,
                    spans: left,
                },
                Cell {
                    x: width,
                    align: Align::Right,
                    spans: vec![right],
                },
            ],
            leading,
            word_spacing: 0.0,
        })
    }

    pub fn centered(spans: Vec<Span>, width: f32, leading: f32) -> Row {
        Row::Text(TextRow {
            cells: vec![Cell {
                x: width / 2.0,
                align: Align::Center,
                spans,
            }],
            leading,
            word_spacing: 0.0,
        })
    }

    pub fn height(&self) -> f32 {
        match self {
            Row::Text(row) => row.max_size() * row.leading,
            Row::Rule { gap, .. } => *gap,
            Row::Spacer(h) => *h,
        }
    }
}

/// Font, size, colour and line height for wrapped text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: PdfFont,
    pub size: f32,
    pub color: Rgb,
    pub leading: f32,
}

impl TextStyle {
    pub fn new(font: PdfFont, size: f32, leading: f32) -> Self {
        Self {
            font,
            size,
            color: Rgb::BLACK,
            leading,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

/// Word-wraps `text` into rows of width `width - indent`. With `justify`, every
/// line except the last is stretched to the full width.
pub fn paragraph(text: &str, style: TextStyle, indent: f32, width: f32, justify: bool) -> Vec<Row> {
    let available = width - indent;
    let metrics = style.font.metrics();
    let lines = metrics.wrap(text, style.size, available);
    let last = lines.len().saturating_sub(1);

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let spaces = line.chars().filter(|c| *c == ' ').count();
            let word_spacing = if justify && i < last && spaces > 0 {
                ((available - metrics.width_pt(&line, style.size)) / spaces as f32).max(0.0)
            } else {
                0.0
            };
            Row::Text(TextRow {
                cells: vec![Cell {
                    x: indent,
                    align: Align::Left,
                    spans: vec![Span::new(line, style.font, style.size).color(style.color)],
                }],
                leading: style.leading,
                word_spacing,
            })
        })
        .collect()
}

/// Lays `spans` out in `columns` equal columns, one row per `columns` items.
pub fn grid(spans: Vec<Span>, columns: usize, width: f32, leading: f32) -> Vec<Row> {
    let columns = columns.max(1);
    let column_width = width / columns as f32;
    let mut rows = Vec::new();
    let mut iter = spans.into_iter().peekable();
    while iter.peek().is_some() {
        let cells = iter
            .by_ref()
            .take(columns)
            .enumerate()
            .map(|(i, span)| Cell {
                x: i as f32 * column_width,
                align: Align::Left,
                spans: vec![span],
            })
            .collect();
        rows.push(Row::Text(TextRow {
            cells,
            leading,
            word_spacing: 0.0,
        }));
    }
    rows
}

/// A group of rows placed together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub rows: Vec<Row>,
    /// Never split across pages (unless taller than a page).
    pub keep_together: bool,
    /// Start a new page rather than leave this block last on a page.
    pub keep_with_next: bool,
    pub space_after: f32,
}

impl Block {
    pub fn height(&self) -> f32 {
        self.rows.iter().map(Row::height).sum()
    }

    fn leading_height(&self) -> f32 {
        if self.keep_together {
            self.height()
        } else {
            self.rows.first().map(Row::height).unwrap_or(0.0)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

struct LinkArea {
    rect: [f32; 4],
    uri: String,
}

#[derive(Default)]
struct PageOps {
    operations: Vec<Operation>,
    links: Vec<LinkArea>,
}

/// Title, author and creation date written to the document info dictionary.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub author: String,
    pub created: chrono::DateTime<chrono::Utc>,
}

pub struct PdfCanvas {
    geometry: PageGeometry,
    pages: Vec<PageOps>,
    cursor: f32,
}

impl PdfCanvas {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![PageOps::default()],
            cursor: geometry.content_top(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Moves the flow to `y`, in PDF coordinates (origin bottom-left).
    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y;
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.geometry.margin_bottom
    }

    fn at_page_top(&self) -> bool {
        (self.cursor - self.geometry.content_top()).abs() < f32::EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(PageOps::default());
        self.cursor = self.geometry.content_top();
    }

    fn page(&mut self) -> &mut PageOps {
        // pages is never empty: new() seeds the first page
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Places blocks top to bottom, breaking pages as needed.
    pub fn flow(&mut self, blocks: &[Block]) {
        for (i, block) in blocks.iter().enumerate() {
            let mut needed = block.leading_height();
            if block.keep_with_next {
                needed = block.height()
                    + blocks
                        .get(i + 1)
                        .map(Block::leading_height)
                        .unwrap_or(0.0);
            }
            if needed > self.remaining()
                && needed <= self.geometry.usable_height()
                && !self.at_page_top()
            {
                self.new_page();
            }

            for row in &block.rows {
                let height = row.height();
                if height > self.remaining() && !self.at_page_top() {
                    self.new_page();
                }
                if matches!(row, Row::Spacer(_)) && self.at_page_top() {
                    continue;
                }
                let top = self.cursor;
                self.draw_row(row, self.geometry.margin_left, top, self.geometry.content_width());
                self.cursor -= height;
            }
            self.cursor -= block.space_after;
        }
    }

    /// Draws one row with its top edge at `top`; returns its height.
    pub fn draw_row(&mut self, row: &Row, origin_x: f32, top: f32, width: f32) -> f32 {
        match row {
            Row::Text(text) => {
                let size = text.max_size();
                let line_height = size * text.leading;
                let baseline = top - (line_height - size) / 2.0 - size * ASCENT;
                for cell in &text.cells {
                    self.draw_cell(cell, origin_x, baseline, text.word_spacing);
                }
                line_height
            }
            Row::Rule {
                thickness,
                color,
                gap,
            } => {
                let y = top - gap / 2.0;
                self.draw_line(origin_x, y, origin_x + width, y, *thickness, *color);
                *gap
            }
            Row::Spacer(h) => *h,
        }
    }

    fn draw_cell(&mut self, cell: &Cell, origin_x: f32, baseline: f32, word_spacing: f32) {
        let total: f32 = cell
            .spans
            .iter()
            .map(|s| s.width() + word_spacing * s.spaces() as f32)
            .sum();
        let mut x = match cell.align {
            Align::Left => origin_x + cell.x,
            Align::Right => origin_x + cell.x - total,
            Align::Center => origin_x + cell.x - total / 2.0,
        };

        for span in &cell.spans {
            if span.text.is_empty() {
                continue;
            }
            let width = span.width() + word_spacing * span.spaces() as f32;
            let page = self.page();
            page.operations.push(Operation::new("BT", vec![]));
            page.operations.push(Operation::new(
                "Tf",
                vec![span.font.resource_name().into(), span.size.into()],
            ));
            page.operations.push(Operation::new(
                "rg",
                vec![span.color.0.into(), span.color.1.into(), span.color.2.into()],
            ));
            if word_spacing > 0.0 {
                page.operations
                    .push(Operation::new("Tw", vec![word_spacing.into()]));
            }
            page.operations
                .push(Operation::new("Td", vec![x.into(), baseline.into()]));
            page.operations.push(Operation::new(
                "Tj",
                vec![Object::String(
                    encode_win_ansi(&span.text),
                    StringFormat::Literal,
                )],
            ));
            page.operations.push(Operation::new("ET", vec![]));

            if let Some(uri) = &span.link {
                page.links.push(LinkArea {
                    rect: [
                        x,
                        baseline - span.size * DESCENT,
                        x + width,
                        baseline + span.size * ASCENT,
                    ],
                    uri: uri.clone(),
                });
            }
            x += width;
        }
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Rgb) {
        let ops = &mut self.page().operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "RG",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        ops.push(Operation::new("w", vec![thickness.into()]));
        ops.push(Operation::new("m", vec![x1.into(), y1.into()]));
        ops.push(Operation::new("l", vec![x2.into(), y2.into()]));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Stroked rectangle; `(x, y)` is the bottom-left corner.
    pub fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, thickness: f32, color: Rgb) {
        let ops = &mut self.page().operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "RG",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        ops.push(Operation::new("w", vec![thickness.into()]));
        ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Serializes all pages into a PDF file.
    pub fn finish(self, meta: &DocumentMeta) -> Result<Vec<u8>, PdfError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in PdfFont::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let page_count = self.pages.len();
        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for page in self.pages {
            let content = Content {
                operations: page.operations,
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), self.geometry.width.into(), self.geometry.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };

            if !page.links.is_empty() {
                let mut annots: Vec<Object> = Vec::with_capacity(page.links.len());
                for link in page.links {
                    let annot_id = doc.add_object(dictionary! {
                        "Type" => "Annot",
                        "Subtype" => "Link",
                        "Rect" => link.rect.iter().map(|v| Object::from(*v)).collect::<Vec<Object>>(),
                        "Border" => vec![0.into(), 0.into(), 0.into()],
                        "A" => dictionary! {
                            "S" => "URI",
                            "URI" => Object::string_literal(link.uri),
                        },
                    });
                    annots.push(annot_id.into());
                }
                page_dict.set("Annots", annots);
            }

            kids.push(doc.add_object(page_dict).into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(&meta.title), StringFormat::Literal),
            "Author" => Object::String(encode_win_ansi(&meta.author), StringFormat::Literal),
            "Creator" => Object::string_literal("Folio"),
            "Producer" => Object::string_literal(concat!("folio ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(meta.created.format("D:%Y%m%d%H%M%SZ").to_string()),
        });
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(lopdf::Error::from)?;
        Ok(buffer)
    }
}

/// Encodes text for a simple font with /WinAnsiEncoding. Latin-1 maps
/// directly; a few typographic marks have their own slots; anything else
/// becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            '\t' | '\n' | '\r' => b' ',
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn geometry() -> PageGeometry {
        PageGeometry::a4(25.0, 30.0, 30.0)
    }

    fn meta() -> DocumentMeta {
        DocumentMeta {
            title: "Test".into(),
            author: "Tester".into(),
            created: Utc::now(),
        }
    }

    fn entry_block(lines: usize) -> Block {
        Block {
            rows: (0..lines)
                .map(|i| Row::text(Span::new(format!("line {i}"), PdfFont::Regular, 8.0), 0.0, 1.4))
                .collect(),
            keep_together: true,
            keep_with_next: false,
            space_after: 4.0,
        }
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("A\u{2022}é"), vec![b'A', 0x95, 0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_paragraph_justifies_all_but_last_line() {
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let rows = paragraph(&text, TextStyle::new(PdfFont::Regular, 8.0, 1.4), 0.0, 300.0, true);
        assert!(rows.len() > 2);
        let spacing: Vec<f32> = rows
            .iter()
            .map(|r| match r {
                Row::Text(t) => t.word_spacing,
                _ => panic!("expected text row"),
            })
            .collect();
        assert!(spacing[0] > 0.0);
        assert_eq!(*spacing.last().unwrap(), 0.0);
    }

    #[test]
    fn test_grid_splits_into_rows() {
        let spans: Vec<Span> = (0..7)
            .map(|i| Span::new(format!("s{i}"), PdfFont::Regular, 8.0))
            .collect();
        let rows = grid(spans, 3, 300.0, 1.3);
        assert_eq!(rows.len(), 3);
        match &rows[0] {
            Row::Text(t) => {
                assert_eq!(t.cells.len(), 3);
                assert!((t.cells[2].x - 200.0).abs() < 1e-3);
            }
            _ => panic!("expected text row"),
        }
    }

    #[test]
    fn test_flow_breaks_pages() {
        let mut canvas = PdfCanvas::new(geometry());
        let blocks: Vec<Block> = (0..120).map(|_| entry_block(3)).collect();
        canvas.flow(&blocks);
        assert!(canvas.page_count() > 1);
    }

    #[test]
    fn test_keep_together_block_moves_to_next_page() {
        let mut canvas = PdfCanvas::new(geometry());
        // Leave less room than the next block needs.
        let remaining_target = canvas.geometry().margin_bottom + 20.0;
        canvas.set_cursor(remaining_target);
        canvas.flow(&[entry_block(4)]);
        assert_eq!(canvas.page_count(), 2);
        let expected = canvas.geometry().content_top() - entry_block(4).height() - 4.0;
        assert!((canvas.cursor - expected).abs() < 1e-3);
    }

    #[test]
    fn test_keep_with_next_pulls_heading_along() {
        let mut canvas = PdfCanvas::new(geometry());
        let heading = Block {
            rows: vec![Row::text(Span::new("HEADING", PdfFont::Bold, 9.0), 0.0, 1.4)],
            keep_together: true,
            keep_with_next: true,
            space_after: 0.0,
        };
        canvas.set_cursor(canvas.geometry().margin_bottom + heading.height() + 5.0);
        canvas.flow(&[heading, entry_block(3)]);
        assert_eq!(canvas.page_count(), 2);
    }

    #[test]
    fn test_finish_produces_loadable_pdf_with_links() {
        let mut canvas = PdfCanvas::new(geometry());
        canvas.flow(&[Block {
            rows: vec![Row::text(
                Span::new("View", PdfFont::Regular, 7.0).link("https://example.com"),
                0.0,
                1.4,
            )],
            ..Default::default()
        }]);
        canvas.draw_rect(400.0, 700.0, 80.0, 90.0, 1.5, Rgb::BLACK);
        let bytes = canvas.finish(&meta()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.get(&1).unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        assert!(String::from_utf8_lossy(&content).contains("(View)"));

        let page = doc.get_dictionary(page_id).unwrap();
        let annots = page.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);
    }
}
