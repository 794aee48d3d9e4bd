// astro-report-service/src/renderers/dasha.rs
//
// Vimshottari major/sub periods plus yogini and char dasha tables.

use serde_json::Value;

use crate::locale::{Labels, PLANET_KEYS};
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

fn period_rows(periods: &[Value], name_field: &str, labels: &Labels) -> Vec<Vec<String>> {
    periods
        .iter()
        .map(|p| {
            let name = p
                .get(name_field)
                .and_then(Value::as_str)
                .unwrap_or("N/A");
            vec![
                labels.planet(name).to_string(),
                text_field(p, "start"),
                text_field(p, "end"),
            ]
        })
        .collect()
}

fn text_field(v: &Value, field: &str) -> String {
    match v.get(field) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Vimshottari major periods from the `major_vdasha` fragment.
pub fn render_vimshottari(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let Some(periods) = data.array_at("major_vdasha", &[]) else {
        super::placeholder(doc, labels, labels.ui.vimshottari_dasha);
        return;
    };
    doc.heading(labels.ui.vimshottari_dasha);
    doc.table(
        &[labels.ui.planet, labels.ui.start, labels.ui.end],
        &[50.0, 60.0, 60.0],
        &period_rows(periods, "planet", labels),
    );
}

/// Sub periods: one table per major-period planet, fed by the 9-planet
/// fan-out stored as a sub-map under `sub_vdasha`. Planets whose
/// element call failed are skipped, not placeholdered; the section
/// heading renders once when at least one planet has data.
pub fn render_sub_dashas(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let available: Vec<(&str, &Vec<Value>)> = PLANET_KEYS
        .iter()
        .copied()
        .filter_map(|key| data.array_at("sub_vdasha", &[key]).map(|rows| (key, rows)))
        .collect();
    if available.is_empty() {
        super::placeholder(doc, labels, labels.ui.sub_dasha);
        return;
    }

    doc.heading(labels.ui.sub_dasha);
    for (planet_key, periods) in available {
        doc.ensure_space(30.0);
        doc.spacer(3.0);
        doc.text(labels.planet(planet_key), 12.0, true);
        doc.spacer(1.0);
        doc.table(
            &[labels.ui.planet, labels.ui.start, labels.ui.end],
            &[50.0, 60.0, 60.0],
            &period_rows(periods, "planet", labels),
        );
    }
}

/// Char dasha table: periods are named by sign, not by planet. A
/// numeric `sign_id` is localized; otherwise the backend's string is
/// shown as-is.
pub fn render_char(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let Some(periods) = data.array_at("char_dasha", &[]) else {
        super::placeholder(doc, labels, labels.ui.char_dasha);
        return;
    };
    doc.heading(labels.ui.char_dasha);
    let rows: Vec<Vec<String>> = periods
        .iter()
        .map(|p| {
            let name = match p.get("sign_id").and_then(Value::as_u64) {
                Some(id) => labels.sign(id as usize).to_string(),
                None => text_field(p, "sign"),
            };
            vec![name, text_field(p, "start"), text_field(p, "end")]
        })
        .collect();
    doc.table(
        &[labels.ui.sign, labels.ui.start, labels.ui.end],
        &[50.0, 60.0, 60.0],
        &rows,
    );
}

/// Yogini dasha table; period names come from the yogini table, not the
/// planet table.
pub fn render_yogini(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let Some(periods) = data.array_at("yogini_dasha", &[]) else {
        super::placeholder(doc, labels, labels.ui.yogini_dasha);
        return;
    };
    doc.heading(labels.ui.yogini_dasha);
    let rows: Vec<Vec<String>> = periods
        .iter()
        .map(|p| {
            let name = p
                .get("dasha_name")
                .or_else(|| p.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("N/A");
            vec![
                localize_yogini(name, labels),
                text_field(p, "start"),
                text_field(p, "end"),
            ]
        })
        .collect();
    doc.table(
        &[labels.ui.yogini_dasha, labels.ui.start, labels.ui.end],
        &[50.0, 60.0, 60.0],
        &rows,
    );
}

fn localize_yogini(canonical: &str, labels: &Labels) -> String {
    crate::locale::YOGINI_DASHAS_EN
        .iter()
        .position(|n| n.eq_ignore_ascii_case(canonical))
        .map(|i| labels.yogini[i].to_string())
        .unwrap_or_else(|| canonical.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LangCode;
    use crate::models::FetchResult;
    use serde_json::json;

    #[test]
    fn vimshottari_table_localizes_planet_names() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "major_vdasha",
            json!([
                {"planet": "Sun", "start": "12-6-1990", "end": "12-6-1996"},
                {"planet": "Moon", "start": "12-6-1996", "end": "12-6-2006"}
            ]),
        )]);
        let labels = Labels::resolve(LangCode::Hi);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_vimshottari(&mut doc, &data, &labels);
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn sub_dashas_skip_failed_planets() {
        // Only two of nine element calls succeeded.
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "sub_vdasha",
            json!({
                "sun": [{"planet": "Sun", "start": "a", "end": "b"}],
                "moon": [{"planet": "Moon", "start": "c", "end": "d"}]
            }),
        )]);
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_sub_dashas(&mut doc, &data, &labels);
        let bytes = doc.save().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn yogini_accepts_both_name_fields() {
        assert_eq!(
            localize_yogini("Mangala", &Labels::resolve(LangCode::Hi)),
            "मंगला"
        );
        assert_eq!(
            localize_yogini("Unknown", &Labels::resolve(LangCode::Hi)),
            "Unknown"
        );

        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "yogini_dasha",
            json!([{"name": "Pingala", "start": "x", "end": "y"}]),
        )]);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_yogini(&mut doc, &data, &Labels::resolve(LangCode::En));
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn all_absent_renders_placeholders() {
        let data = AggregatedReportData::default();
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_vimshottari(&mut doc, &data, &labels);
        render_sub_dashas(&mut doc, &data, &labels);
        render_yogini(&mut doc, &data, &labels);
        render_char(&mut doc, &data, &labels);
    }

    #[test]
    fn char_dasha_localizes_numeric_signs() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "char_dasha",
            json!([
                {"sign_id": 1, "start": "1990", "end": "1998"},
                {"sign": "Taurus", "start": "1998", "end": "2007"}
            ]),
        )]);
        let labels = Labels::resolve(LangCode::Hi);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_char(&mut doc, &data, &labels);
        assert_eq!(doc.page_count(), 1);
    }
}
