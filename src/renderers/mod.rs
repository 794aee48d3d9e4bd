// astro-report-service/src/renderers/mod.rs
//
// Page renderers: stateless `(document, data, labels) -> append pages`
// units. Renderers never suspend and never fail on missing data; absent
// fragments degrade to "N/A" cells or a placeholder line.

pub mod afflictions;
pub mod ashtakvarga;
pub mod charts;
pub mod cover;
pub mod dasha;
pub mod gemstone;
pub mod kalsarpa;
pub mod numerology;
pub mod positions;
pub mod synastry;

use crate::locale::Labels;
use crate::pdf::ReportDocument;

/// Standard stand-in for a section whose upstream fragment is absent.
pub(crate) fn placeholder(doc: &mut ReportDocument, labels: &Labels, heading: &str) {
    doc.heading(heading);
    doc.text(labels.ui.not_available, 11.0, false);
    tracing::debug!(section = heading, "section data missing, placeholder rendered");
}
