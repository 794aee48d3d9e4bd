// astro-report-service/src/pdf/mod.rs

pub mod chart;
pub mod document;
pub mod fonts;

pub use chart::ChartHouseMap;
pub use document::ReportDocument;
pub use fonts::{devanagari_font_bytes, FontKind};
