// astro-report-service/src/renderers/charts.rs
//
// Birth / moon / navamsa chart pages. Each chart fragment is an array
// of 12 house objects in house order: `{"sign": 1..=12, "planet": [..]}`.

use serde_json::Value;

use crate::locale::{Labels, PLANETS_EN, PLANET_ABBR};
use crate::models::AggregatedReportData;
use crate::pdf::{ChartHouseMap, ReportDocument};

const CHART_SIZE_MM: f32 = 110.0;

pub fn render_birth(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    render_chart(doc, data, labels, "d1_chart", labels.ui.birth_chart);
}

pub fn render_moon(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    render_chart(doc, data, labels, "moon_chart", labels.ui.moon_chart);
}

pub fn render_navamsa(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    render_chart(doc, data, labels, "d9_chart", labels.ui.navamsa_chart);
}

fn render_chart(
    doc: &mut ReportDocument,
    data: &AggregatedReportData,
    labels: &Labels,
    key: &str,
    heading: &str,
) {
    let Some(map) = data.get(key).and_then(house_map) else {
        super::placeholder(doc, labels, heading);
        return;
    };
    doc.ensure_space(CHART_SIZE_MM + 30.0);
    doc.heading(heading);
    doc.spacer(2.0);
    doc.north_indian_chart(CHART_SIZE_MM, &map);
}

/// Builds the house map from a 12-element chart payload. Returns None
/// when the payload is malformed; the page then degrades to the
/// standard placeholder.
fn house_map(payload: &Value) -> Option<ChartHouseMap> {
    let houses = payload.as_array()?;
    if houses.len() != 12 {
        return None;
    }
    let asc_sign = houses[0].get("sign")?.as_u64()? as u8;
    let mut map = ChartHouseMap::from_ascendant(asc_sign).ok()?;
    for (i, house) in houses.iter().enumerate() {
        let Some(planets) = house.get("planet").and_then(Value::as_array) else {
            continue;
        };
        for planet in planets {
            if let Some(name) = planet.as_str() {
                map.place_planet(i + 1, abbreviate(name));
            }
        }
    }
    Some(map)
}

/// Canonical two-letter abbreviation; "As" for the ascendant marker and
/// the first two characters for anything else the backend may add.
fn abbreviate(name: &str) -> &str {
    if name.eq_ignore_ascii_case("ascendant") {
        return "As";
    }
    PLANETS_EN
        .iter()
        .position(|p| p.eq_ignore_ascii_case(name))
        .map(|i| PLANET_ABBR[i])
        .unwrap_or_else(|| {
            let end = name
                .char_indices()
                .nth(2)
                .map(|(i, _)| i)
                .unwrap_or(name.len());
            &name[..end]
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LangCode;
    use crate::models::FetchResult;
    use serde_json::json;

    fn chart_payload() -> Value {
        let mut houses: Vec<Value> = (0..12)
            .map(|i| json!({"sign": (i % 12) + 1, "planet": []}))
            .collect();
        houses[0] = json!({"sign": 1, "planet": ["Ascendant", "Sun", "Mercury", "Venus"]});
        houses[6] = json!({"sign": 7, "planet": ["Moon"]});
        Value::Array(houses)
    }

    #[test]
    fn valid_payload_draws_a_chart() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "d1_chart",
            chart_payload(),
        )]);
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_birth(&mut doc, &data, &labels);
        let bytes = doc.save().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn short_payload_degrades() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "moon_chart",
            json!([{"sign": 1, "planet": []}]),
        )]);
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_moon(&mut doc, &data, &labels);
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn abbreviations_cover_the_nine_planets() {
        assert_eq!(abbreviate("Sun"), "Su");
        assert_eq!(abbreviate("rahu"), "Ra");
        assert_eq!(abbreviate("Ascendant"), "As");
        assert_eq!(abbreviate("Uranus"), "Ur");
    }
}
