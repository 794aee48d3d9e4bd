// astro-report-service/src/renderers/positions.rs

use serde_json::Value;

use crate::locale::Labels;
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

fn cell(planet: &Value, field: &str) -> String {
    match planet.get(field) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Planetary positions table from the `planets` fragment: one row per
/// planet with sign, degree, nakshatra and house.
pub fn render(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let Some(planets) = data.array_at("planets", &[]) else {
        super::placeholder(doc, labels, labels.ui.planetary_positions);
        return;
    };

    doc.heading(labels.ui.planetary_positions);

    let rows: Vec<Vec<String>> = planets
        .iter()
        .map(|p| {
            let name = cell(p, "name");
            let degree = p
                .get("normDegree")
                .and_then(Value::as_f64)
                .map(|d| format!("{d:.2}"))
                .unwrap_or_else(|| "N/A".to_string());
            let nakshatra = cell(p, "nakshatra");
            vec![
                labels.planet(&name).to_string(),
                localized_sign(p, labels),
                degree,
                labels.nakshatra(&nakshatra).to_string(),
                cell(p, "house"),
            ]
        })
        .collect();

    doc.table(
        &[
            labels.ui.planet,
            labels.ui.sign,
            labels.ui.degree,
            labels.ui.nakshatra,
            labels.ui.house,
        ],
        &[38.0, 38.0, 26.0, 48.0, 20.0],
        &rows,
    );
}

/// Prefers the numeric `sign_id` so the sign can be localized; falls
/// back to whatever string the backend sent.
fn localized_sign(planet: &Value, labels: &Labels) -> String {
    if let Some(id) = planet.get("sign_id").and_then(Value::as_u64) {
        return labels.sign(id as usize).to_string();
    }
    cell(planet, "sign")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LangCode;
    use crate::models::FetchResult;
    use serde_json::json;

    #[test]
    fn renders_table_from_planets_fragment() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "planets",
            json!([
                {"name": "Sun", "sign_id": 3, "normDegree": 14.273, "nakshatra": "Ardra", "house": 10},
                {"name": "Moon", "sign": "Cancer", "nakshatra": "Pushya", "house": 11}
            ]),
        )]);
        let labels = Labels::resolve(LangCode::Hi);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render(&mut doc, &data, &labels);
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn missing_fragment_degrades_to_placeholder() {
        let data = AggregatedReportData::default();
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render(&mut doc, &data, &labels);
        assert_eq!(doc.page_count(), 1);
    }
}
