// astro-report-service/src/renderers/gemstone.rs

use serde_json::Value;

use crate::locale::Labels;
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

/// The backend keys its suggestions by purpose.
const PURPOSES: [&str; 3] = ["LIFE", "BENEFIC", "LUCKY"];

pub fn render(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let rows: Vec<Vec<String>> = PURPOSES
        .iter()
        .filter_map(|purpose| {
            data.at("gemstones", &[purpose]).map(|gem| {
                vec![
                    title_case(purpose),
                    field(gem, "name"),
                    field(gem, "gem_deity"),
                    field(gem, "wear_finger"),
                    field(gem, "weight_caret"),
                ]
            })
        })
        .collect();

    if rows.is_empty() {
        super::placeholder(doc, labels, labels.ui.gemstones);
        return;
    }

    doc.heading(labels.ui.gemstones);
    doc.table(
        &["", labels.ui.gemstones, "Deity", "Finger", "Carat"],
        &[28.0, 44.0, 40.0, 36.0, 22.0],
        &rows,
    );
}

fn field(gem: &Value, name: &str) -> String {
    match gem.get(name) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn title_case(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
