// astro-report-service/src/renderers/afflictions.rs
//
// Manglik and Sadhesati pages.

use serde_json::Value;

use crate::locale::Labels;
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

pub fn render_manglik(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    if data.get("manglik").is_none() {
        super::placeholder(doc, labels, labels.ui.manglik);
        return;
    }

    doc.heading(labels.ui.manglik);

    let verdict = data
        .at("manglik", &["is_present"])
        .and_then(Value::as_bool)
        .map(|b| if b { "Yes" } else { "No" })
        .unwrap_or(labels.ui.not_available);
    doc.key_values(&[
        (labels.ui.manglik, verdict.to_string()),
        (
            "%",
            data.display_at("manglik", &["percentage_manglik_present"]),
        ),
    ]);
    doc.spacer(2.0);

    if let Some(factors) = data.array_at("manglik", &["manglik_present_rule", "based_on_house"]) {
        for factor in factors.iter().filter_map(Value::as_str) {
            doc.text(factor, 10.5, false);
        }
    }
    if let Some(report) = data.str_at("manglik", &["manglik_report"]) {
        doc.spacer(2.0);
        doc.paragraph(&report, 10.5);
    }
}

pub fn render_sadhesati(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    if data.get("sadhesati").is_none() {
        super::placeholder(doc, labels, labels.ui.sadhesati);
        return;
    }

    doc.heading(labels.ui.sadhesati);

    let undergoing = data
        .at("sadhesati", &["is_undergoing_sadhesati"])
        .and_then(Value::as_bool)
        .map(|b| if b { "Yes" } else { "No" })
        .unwrap_or(labels.ui.not_available);
    doc.key_values(&[
        (labels.ui.sadhesati, undergoing.to_string()),
        ("Phase", data.display_at("sadhesati", &["sadhesati_phase"])),
        (
            labels.ui.moon_chart,
            data.display_at("sadhesati", &["moon_sign"]),
        ),
    ]);

    if let Some(report) = data.str_at("sadhesati", &["sadhesati_report"]) {
        doc.spacer(2.0);
        doc.paragraph(&report, 10.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LangCode;
    use crate::models::FetchResult;
    use serde_json::json;

    #[test]
    fn manglik_page_renders_factors_and_report() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "manglik",
            json!({
                "is_present": true,
                "percentage_manglik_present": 36.5,
                "manglik_present_rule": {"based_on_house": ["Mars in 7th house"]},
                "manglik_report": "Partial manglik dosha detected."
            }),
        )]);
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_manglik(&mut doc, &data, &labels);
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn sadhesati_tolerates_partial_payload() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "sadhesati",
            json!({"is_undergoing_sadhesati": false}),
        )]);
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_sadhesati(&mut doc, &data, &labels);
    }

    #[test]
    fn absent_fragments_placeholder() {
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_manglik(&mut doc, &AggregatedReportData::default(), &labels);
        render_sadhesati(&mut doc, &AggregatedReportData::default(), &labels);
    }
}
