// astro-report-service/src/renderers/kalsarpa.rs

use crate::locale::Labels;
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

/// Kalsarpa analysis page: presence verdict, dosha name and the one-line
/// and long-form interpretations when the backend supplies them.
pub fn render(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    if data.get("kalsarpa").is_none() {
        super::placeholder(doc, labels, labels.ui.kalsarpa);
        return;
    }

    doc.heading(labels.ui.kalsarpa);

    let present = data
        .at("kalsarpa", &["present"])
        .and_then(serde_json::Value::as_bool);
    let verdict = match present {
        Some(true) => "Yes",
        Some(false) => "No",
        None => labels.ui.not_available,
    };
    doc.key_values(&[
        (labels.ui.kalsarpa, verdict.to_string()),
        ("Dosha", data.display_at("kalsarpa", &["type"])),
    ]);
    doc.spacer(3.0);

    if let Some(one_line) = data.str_at("kalsarpa", &["one_line"]) {
        doc.text(&one_line, 11.0, true);
        doc.spacer(2.0);
    }
    if let Some(report) = data.str_at("kalsarpa", &["report", "report"]) {
        doc.paragraph(&report, 10.5);
    }
}
