// astro-report-service/src/renderers/synastry.rs
//
// Two-person compatibility pages: the ashtakoot point table and the
// overall verdict.

use serde_json::Value;

use crate::locale::Labels;
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

/// The eight kootas in canonical scoring order.
const KOOTAS: [&str; 8] = [
    "varna", "vashya", "tara", "yoni", "maitri", "gan", "bhakut", "nadi",
];

pub fn render(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    if data.get("match_ashtakoot").is_none() {
        super::placeholder(doc, labels, labels.ui.compatibility);
        return;
    }

    doc.heading(labels.ui.compatibility);

    let rows: Vec<Vec<String>> = KOOTAS
        .iter()
        .map(|koota| {
            vec![
                data.str_at("match_ashtakoot", &[koota, "name"])
                    .unwrap_or_else(|| title_case(koota)),
                data.display_at("match_ashtakoot", &[koota, "male_koot_attribute"]),
                data.display_at("match_ashtakoot", &[koota, "female_koot_attribute"]),
                data.display_at("match_ashtakoot", &[koota, "received_points"]),
                data.display_at("match_ashtakoot", &[koota, "total_points"]),
            ]
        })
        .collect();

    doc.table(
        &["Koota", "Person 1", "Person 2", labels.ui.total_points, "Max"],
        &[34.0, 42.0, 42.0, 30.0, 22.0],
        &rows,
    );

    doc.spacer(4.0);
    let received = data.display_at("match_ashtakoot", &["total", "received_points"]);
    let maximum = data.display_at("match_ashtakoot", &["total", "total_points"]);
    doc.text(
        &format!("{}: {received} / {maximum}", labels.ui.total_points),
        13.0,
        true,
    );

    if let Some(conclusion) = data
        .str_at("match_ashtakoot", &["conclusion", "report"])
        .or_else(|| data.str_at("match_ashtakoot", &["conclusion"]))
    {
        doc.spacer(3.0);
        doc.paragraph(&conclusion, 10.5);
    }
}

/// Per-person birth detail block, rendered once for each side of the
/// match from the prefixed birth-details fragments.
pub fn render_person_details(
    doc: &mut ReportDocument,
    data: &AggregatedReportData,
    labels: &Labels,
    key: &str,
    person_name: &str,
) {
    doc.ensure_space(40.0);
    doc.spacer(3.0);
    doc.text(person_name, 13.0, true);
    doc.spacer(1.0);

    if data.get(key).is_none() {
        doc.text(labels.ui.not_available, 11.0, false);
        return;
    }
    doc.key_values(&[
        (
            labels.ui.nakshatra,
            data.display_at(key, &["nakshatra", "name"]),
        ),
        (labels.ui.sign, localized_sign(data, key, labels)),
    ]);
}

fn localized_sign(data: &AggregatedReportData, key: &str, labels: &Labels) -> String {
    if let Some(id) = data.at(key, &["moon_sign_id"]).and_then(Value::as_u64) {
        return labels.sign(id as usize).to_string();
    }
    data.display_at(key, &["moon_sign"])
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
