// astro-report-service/src/renderers/cover.rs

use chrono::Utc;

use crate::locale::Labels;
use crate::models::BirthParameters;
use crate::pdf::ReportDocument;

/// Title page: report name, subject, birth details, generation date.
/// Always renders, even when every upstream call failed.
pub fn render(
    doc: &mut ReportDocument,
    subject: &str,
    params: &BirthParameters,
    labels: &Labels,
    report_title: &str,
) {
    doc.spacer(50.0);
    doc.text_centered(labels.ui.report, 22.0, true);
    doc.spacer(6.0);
    doc.text_centered(report_title, 15.0, false);
    doc.spacer(18.0);

    let subject = if subject.trim().is_empty() {
        labels.ui.not_available
    } else {
        subject
    };
    doc.text_centered(subject, 17.0, true);
    doc.spacer(10.0);

    doc.key_values(&[
        (labels.ui.date_of_birth, params.birth_line()),
        (
            labels.ui.place,
            format!("{:.4}, {:.4}", params.lat, params.lon),
        ),
    ]);

    doc.spacer(30.0);
    doc.text_centered(&Utc::now().format("%d-%m-%Y").to_string(), 10.0, false);
    doc.new_page();
}
