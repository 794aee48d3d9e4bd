// astro-report-service/src/renderers/ashtakvarga.rs
//
// Ashtakvarga score grid: one row per classical planet, twelve sign
// columns plus a row total, fed by the 7-planet per-element fan-out.

use serde_json::Value;

use crate::locale::{Labels, ASHTAKVARGA_PLANETS};
use crate::models::AggregatedReportData;
use crate::pdf::ReportDocument;

/// Points for one planet: the backend nests them under either
/// `ashtakvarga` or `points`.
fn points_for(data: &AggregatedReportData, planet: &str) -> Option<Vec<i64>> {
    let arr = data
        .array_at("ashtakvarga", &[planet, "ashtakvarga"])
        .or_else(|| data.array_at("ashtakvarga", &[planet, "points"]))?;
    if arr.len() != 12 {
        return None;
    }
    arr.iter().map(Value::as_i64).collect()
}

pub fn render(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let rows: Vec<Vec<String>> = ASHTAKVARGA_PLANETS
        .iter()
        .filter_map(|planet| {
            let points = points_for(data, planet)?;
            let mut row = vec![labels.planet(planet).to_string()];
            row.extend(points.iter().map(|p| p.to_string()));
            row.push(points.iter().sum::<i64>().to_string());
            Some(row)
        })
        .collect();

    if rows.is_empty() {
        super::placeholder(doc, labels, labels.ui.ashtakvarga);
        return;
    }

    doc.heading(labels.ui.ashtakvarga);

    // Planet column, 12 sign columns (1-12), total.
    let mut headers: Vec<String> = vec![labels.ui.planet.to_string()];
    headers.extend((1..=12).map(|i| i.to_string()));
    headers.push(labels.ui.total_points.to_string());
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let mut widths = vec![32.0];
    widths.extend(std::iter::repeat(10.5).take(12));
    widths.push(22.0);

    doc.table(&header_refs, &widths, &rows);
}
