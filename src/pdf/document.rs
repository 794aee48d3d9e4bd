// astro-report-service/src/pdf/document.rs
//
// The shared, single-writer document handle. Renderers may only append
// content to the current page or open a new one; the footer pass and
// serialization are reserved for the assembler.

use printpdf::{
    Color, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfLayerReference,
    PdfPageIndex, Point, Rgb,
};
use std::io::{BufWriter, Cursor};

use crate::error::Result;
use crate::pdf::chart::{self, ChartHouseMap};
use crate::pdf::fonts::{FontBook, FontKind};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 15.0;

/// Bottom strip reserved for the footer pass.
const FOOTER_ZONE: f32 = 18.0;

const PT_TO_MM: f32 = 0.352_778;

/// Average Helvetica glyph advance as a fraction of the point size.
/// Good enough for centering and wrapping; exact metrics are not needed
/// for tabular report layouts.
const GLYPH_WIDTH_FACTOR: f32 = 0.5;

pub struct ReportDocument {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    fonts: FontBook,
    /// Write position in mm from the top of the current page.
    cursor: f32,
}

impl ReportDocument {
    pub fn new(title: &str, devanagari_bytes: Option<&[u8]>) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
        let fonts = FontBook::register(&doc, devanagari_bytes)?;
        Ok(Self {
            doc,
            pages: vec![(page, layer)],
            fonts,
            cursor: MARGIN,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_font(&self) -> FontKind {
        self.fonts.active()
    }

    pub fn last_selected_font(&self) -> FontKind {
        self.fonts.last_selected()
    }

    fn layer_for(&self, index: usize) -> PdfLayerReference {
        let (page, layer) = self.pages[index];
        self.doc.get_page(page).get_layer(layer)
    }

    fn current_layer(&self) -> PdfLayerReference {
        self.layer_for(self.pages.len() - 1)
    }

    fn pdf_y(from_top: f32) -> Mm {
        Mm(PAGE_HEIGHT - from_top)
    }

    pub fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
        self.pages.push((page, layer));
        self.cursor = MARGIN;
    }

    /// Opens a new page when `needed` mm would not fit above the footer
    /// zone.
    pub fn ensure_space(&mut self, needed: f32) {
        if self.cursor + needed > PAGE_HEIGHT - FOOTER_ZONE {
            self.new_page();
        }
    }

    pub fn spacer(&mut self, mm: f32) {
        self.cursor += mm;
    }

    pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
        text.chars().count() as f32 * size_pt * GLYPH_WIDTH_FACTOR * PT_TO_MM
    }

    fn line_height(size_pt: f32) -> f32 {
        size_pt * PT_TO_MM * 1.5
    }

    /// One homogeneous text run at an absolute position. The font is
    /// switched per the string's script classification and the Latin
    /// default is restored immediately after the draw call.
    fn draw_text_abs(&mut self, text: &str, size_pt: f32, x: f32, baseline_from_top: f32, bold: bool) {
        if text.is_empty() {
            return;
        }
        let layer = self.current_layer();
        let font = self.fonts.select(text, bold).clone();
        layer.use_text(text, size_pt, Mm(x), Self::pdf_y(baseline_from_top), &font);
        self.fonts.restore();
    }

    /// Absolute-position variant for a specific page, used by the
    /// footer pass.
    fn draw_text_on_page(
        &mut self,
        page_index: usize,
        text: &str,
        size_pt: f32,
        x: f32,
        baseline_from_top: f32,
    ) {
        let layer = self.layer_for(page_index);
        let font = self.fonts.select(text, false).clone();
        layer.use_text(text, size_pt, Mm(x), Self::pdf_y(baseline_from_top), &font);
        self.fonts.restore();
    }

    /// Flowed left-aligned text line at the cursor.
    pub fn text(&mut self, text: &str, size_pt: f32, bold: bool) {
        let lh = Self::line_height(size_pt);
        self.ensure_space(lh);
        self.cursor += lh;
        self.draw_text_abs(text, size_pt, MARGIN, self.cursor, bold);
    }

    pub fn text_centered(&mut self, text: &str, size_pt: f32, bold: bool) {
        let lh = Self::line_height(size_pt);
        self.ensure_space(lh);
        self.cursor += lh;
        let x = (PAGE_WIDTH - Self::text_width_mm(text, size_pt)) / 2.0;
        self.draw_text_abs(text, size_pt, x.max(MARGIN), self.cursor, bold);
    }

    /// Section heading: centered bold title with a rule underneath.
    pub fn heading(&mut self, text: &str) {
        self.ensure_space(20.0);
        self.spacer(4.0);
        self.text_centered(text, 15.0, true);
        self.spacer(1.5);
        self.rule();
        self.spacer(3.0);
    }

    /// Word-wrapped body text across the content width.
    pub fn paragraph(&mut self, text: &str, size_pt: f32) {
        let glyph_mm = size_pt * GLYPH_WIDTH_FACTOR * PT_TO_MM;
        let max_chars = (((PAGE_WIDTH - 2.0 * MARGIN) / glyph_mm) as usize).max(8);
        let mut line = String::new();
        for word in text.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > max_chars {
                self.text(&line, size_pt, false);
                line.clear();
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            self.text(&line, size_pt, false);
        }
    }

    /// Label/value pairs in two columns.
    pub fn key_values(&mut self, pairs: &[(&str, String)]) {
        for (key, value) in pairs {
            let lh = Self::line_height(11.0);
            self.ensure_space(lh);
            self.cursor += lh;
            self.draw_text_abs(key, 11.0, MARGIN, self.cursor, true);
            let value_y = self.cursor;
            self.draw_text_abs(value, 11.0, MARGIN + 62.0, value_y, false);
        }
    }

    /// Thin horizontal rule across the content width at the cursor.
    pub fn rule(&mut self) {
        let layer = self.current_layer();
        layer.set_outline_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
        layer.set_outline_thickness(0.6);
        stroke_line(&layer, MARGIN, self.cursor, PAGE_WIDTH - MARGIN, self.cursor);
    }

    /// Tabular section. Breaks across pages, repeating the header row.
    /// Cell text is truncated to its column width.
    pub fn table(&mut self, headers: &[&str], widths: &[f32], rows: &[Vec<String>]) {
        debug_assert_eq!(headers.len(), widths.len());
        let size = 10.0;
        let row_h = Self::line_height(size);

        self.ensure_space(row_h * 2.0);
        self.table_header(headers, widths, size, row_h);

        for row in rows {
            if self.cursor + row_h > PAGE_HEIGHT - FOOTER_ZONE {
                self.new_page();
                self.table_header(headers, widths, size, row_h);
            }
            self.cursor += row_h;
            let mut x = MARGIN;
            for (i, cell) in row.iter().enumerate() {
                let width = widths.get(i).copied().unwrap_or(30.0);
                let text = truncate_to_width(cell, size, width);
                self.draw_text_abs(&text, size, x, self.cursor, false);
                x += width;
            }
        }
        self.spacer(2.0);
    }

    fn table_header(&mut self, headers: &[&str], widths: &[f32], size: f32, row_h: f32) {
        self.cursor += row_h;
        let mut x = MARGIN;
        for (i, header) in headers.iter().enumerate() {
            self.draw_text_abs(header, size, x, self.cursor, true);
            x += widths.get(i).copied().unwrap_or(30.0);
        }
        self.spacer(1.0);
        self.rule();
        self.spacer(0.5);
    }

    /// Draws a North-Indian chart centered horizontally at the cursor
    /// and advances past it. Topology is constant; only labels vary.
    pub fn north_indian_chart(&mut self, size_mm: f32, map: &ChartHouseMap) {
        self.ensure_space(size_mm + 6.0);
        let x0 = (PAGE_WIDTH - size_mm) / 2.0;
        let y0 = self.cursor;

        let layer = self.current_layer();
        layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.set_outline_thickness(0.9);
        for ((ax, ay), (bx, by)) in chart::topology() {
            stroke_line(
                &layer,
                x0 + ax * size_mm,
                y0 + ay * size_mm,
                x0 + bx * size_mm,
                y0 + by * size_mm,
            );
        }

        let sign_size = 9.0;
        let planet_size = 8.5;
        for house in 1..=12 {
            let Some(cell) = map.house(house) else {
                continue;
            };

            let (sx, sy) = chart::SIGN_ANCHORS[house - 1];
            let sign_text = cell.sign.to_string();
            let sign_x =
                x0 + sx * size_mm - Self::text_width_mm(&sign_text, sign_size) / 2.0;
            self.draw_text_abs(&sign_text, sign_size, sign_x, y0 + sy * size_mm, true);

            let (line1, line2) = chart::wrap_planets(&cell.planets);
            if line1.is_empty() {
                continue;
            }
            let (px, py) = chart::PLANET_ANCHORS[house - 1];
            let cx = x0 + px * size_mm;
            let cy = y0 + py * size_mm;
            match line2 {
                None => {
                    let x = cx - Self::text_width_mm(&line1, planet_size) / 2.0;
                    self.draw_text_abs(&line1, planet_size, x, cy, false);
                }
                Some(line2) => {
                    let x1 = cx - Self::text_width_mm(&line1, planet_size) / 2.0;
                    let x2 = cx - Self::text_width_mm(&line2, planet_size) / 2.0;
                    self.draw_text_abs(&line1, planet_size, x1, cy - 2.0, false);
                    self.draw_text_abs(&line2, planet_size, x2, cy + 2.5, false);
                }
            }
        }

        self.cursor = y0 + size_mm;
        self.spacer(6.0);
    }

    /// Stamps "page N of M" plus branding onto every page. Runs after
    /// all content renderers because the total is only known at the end.
    /// Branding comes from config at arbitrary length; it is truncated
    /// to the space left of the centered page label.
    pub(crate) fn footer_pass(&mut self, branding: &str, page_word: &str, of_word: &str) {
        let total = self.pages.len();
        let baseline = PAGE_HEIGHT - 8.0;
        for index in 0..total {
            let label = format!("{page_word} {} {of_word} {total}", index + 1);
            let label_x = (PAGE_WIDTH - Self::text_width_mm(&label, 9.0)) / 2.0;
            let branding = truncate_to_width(branding, 8.0, label_x - MARGIN - 4.0);
            self.draw_text_on_page(index, &label, 9.0, label_x, baseline);
            self.draw_text_on_page(index, &branding, 8.0, MARGIN, baseline);
        }
    }

    /// Serializes the finished document. Consumes the handle; nothing
    /// can be appended afterwards.
    pub(crate) fn save(self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut writer = BufWriter::new(Cursor::new(&mut bytes));
            self.doc.save(&mut writer)?;
        }
        Ok(bytes)
    }
}

fn stroke_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(PAGE_HEIGHT - y1)), false),
        (Point::new(Mm(x2), Mm(PAGE_HEIGHT - y2)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::chart::ChartHouseMap;

    fn doc() -> ReportDocument {
        ReportDocument::new("test", None).unwrap()
    }

    /// Builtin-font text lands in the content streams as hex-encoded
    /// `Tj` strings, so a stamped run is findable as the hex form of
    /// its ASCII bytes.
    fn hex(text: &str) -> String {
        text.bytes().map(|b| format!("{b:02X}")).collect()
    }

    #[test]
    fn script_switch_restores_latin_after_draw() {
        let mut d = doc();
        d.text("सूर्य", 11.0, false);
        assert_eq!(d.last_selected_font(), FontKind::Devanagari);
        assert_eq!(d.active_font(), FontKind::Latin);

        d.text("Sun", 11.0, false);
        assert_eq!(d.last_selected_font(), FontKind::Latin);
        assert_eq!(d.active_font(), FontKind::Latin);
    }

    #[test]
    fn ensure_space_opens_new_page() {
        let mut d = doc();
        assert_eq!(d.page_count(), 1);
        d.spacer(PAGE_HEIGHT);
        d.ensure_space(10.0);
        assert_eq!(d.page_count(), 2);
    }

    #[test]
    fn long_tables_paginate() {
        let mut d = doc();
        let rows: Vec<Vec<String>> = (0..120)
            .map(|i| vec![format!("row {i}"), "value".to_string()])
            .collect();
        d.table(&["A", "B"], &[60.0, 60.0], &rows);
        assert!(d.page_count() > 1);
    }

    #[test]
    fn footer_stamps_every_page_with_its_position_and_the_final_total() {
        let mut d = doc();
        d.text("first", 11.0, false);
        d.new_page();
        d.text("second", 11.0, false);
        d.new_page();
        d.text("third", 11.0, false);
        assert_eq!(d.page_count(), 3);

        d.footer_pass("astro-report-service", "Page", "of");
        let bytes = d.save().unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        // Pages serialize in order, so each label must appear exactly
        // once and after its predecessor's.
        let pdf = String::from_utf8_lossy(&bytes);
        let mut prev = 0;
        for page in 1..=3 {
            let label = hex(&format!("Page {page} of 3"));
            let pos = pdf
                .find(&label)
                .unwrap_or_else(|| panic!("page {page} footer missing"));
            assert_eq!(pdf.matches(&label).count(), 1);
            assert!(page == 1 || pos > prev);
            prev = pos;
        }
        assert!(!pdf.contains(&hex("Page 4 of")));
        assert_eq!(pdf.matches(&hex("astro-report-service")).count(), 3);
    }

    #[test]
    fn overlong_branding_is_clamped_before_the_page_label() {
        let mut d = doc();
        d.text("content", 11.0, false);
        let branding = "x".repeat(160);
        d.footer_pass(&branding, "Page", "of");
        let bytes = d.save().unwrap();

        let pdf = String::from_utf8_lossy(&bytes);
        assert!(pdf.contains(&hex("Page 1 of 1")));
        assert!(!pdf.contains(&hex(&branding)), "branding was not clamped");
        assert!(pdf.contains(&hex(&"x".repeat(10))));
    }

    #[test]
    fn chart_renders_empty_and_crowded_houses() {
        let mut d = doc();
        let mut map = ChartHouseMap::from_ascendant(1).unwrap();
        map.place_planet(1, "Su");
        map.place_planet(1, "Mo");
        map.place_planet(1, "Ma");
        map.place_planet(7, "Ve");
        d.north_indian_chart(100.0, &map);
        let bytes = d.save().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

fn truncate_to_width(text: &str, size_pt: f32, width_mm: f32) -> String {
    let glyph_mm = size_pt * GLYPH_WIDTH_FACTOR * PT_TO_MM;
    let max_chars = ((width_mm - 2.0) / glyph_mm) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
