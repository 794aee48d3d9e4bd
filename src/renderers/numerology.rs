// astro-report-service/src/renderers/numerology.rs

use crate::locale::Labels;
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

pub fn render(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    if data.get("numerology").is_none() {
        super::placeholder(doc, labels, labels.ui.numerology);
        return;
    }

    doc.heading(labels.ui.numerology);
    doc.key_values(&[
        (labels.ui.name, data.display_at("numerology", &["name"])),
        (
            "Radical Number",
            data.display_at("numerology", &["radical_number"]),
        ),
        (
            "Destiny Number",
            data.display_at("numerology", &["destiny_number"]),
        ),
        (
            "Name Number",
            data.display_at("numerology", &["name_number"]),
        ),
        (
            "Radical Ruler",
            data.display_at("numerology", &["radical_ruler"]),
        ),
        (
            "Favourable Stone",
            data.display_at("numerology", &["fav_stone"]),
        ),
    ]);

    if let Some(report) = data.str_at("numerology", &["report"]) {
        doc.spacer(3.0);
        doc.paragraph(&report, 10.5);
    }
}
