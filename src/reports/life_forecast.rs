// astro-report-service/src/reports/life_forecast.rs

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::locale::Labels;
use crate::models::{AggregatedReportData, BirthParameters, FetchStatus, ReportOutput};
use crate::pdf::ReportDocument;
use crate::renderers;
use crate::reports::{self, Report, ReportContext};
use crate::upstream::FetchCall;

/// Western-system life forecast: tropical positions plus long-form
/// prediction sections. Like the basic family it degrades to a
/// placeholder PDF when the upstream is unreachable.
pub struct LifeForecastReport;

#[async_trait]
impl Report for LifeForecastReport {
    fn name(&self) -> &'static str {
        "Life_Forecast"
    }

    async fn assemble(&self, ctx: &ReportContext, body: &Value) -> Result<ReportOutput> {
        let params = BirthParameters::from_body(body)?;
        let subject = reports::subject_name(body);
        let lang = reports::request_lang(body);
        let labels = Labels::resolve(lang);
        let font = reports::font_for(ctx, lang)?;

        let upstream_body = params.to_body();
        let (data, summary) = ctx
            .upstream
            .fetch_group(vec![
                FetchCall::new("planets", "western_planets", upstream_body.clone()),
                FetchCall::new("life_forecast", "life_forecast_report", upstream_body),
            ])
            .await;
        if summary.status == FetchStatus::Fail {
            warn!(report = self.name(), "all upstream calls failed, rendering degraded report");
        }

        let mut doc = ReportDocument::new(self.name(), font)?;
        renderers::cover::render(&mut doc, &subject, &params, &labels, "Life Forecast");
        renderers::positions::render(&mut doc, &data, &labels);
        render_forecast(&mut doc, &data, &labels);
        reports::finalize(doc, &labels, ctx, &subject, self.name())
    }
}

/// Prediction sections: an array of `{title, prediction}` blocks, each
/// opening its own heading.
fn render_forecast(doc: &mut ReportDocument, data: &AggregatedReportData, labels: &Labels) {
    let Some(sections) = data.array_at("life_forecast", &["life_forecast"]) else {
        doc.heading("Life Forecast");
        doc.text(labels.ui.not_available, 11.0, false);
        return;
    };
    for section in sections {
        let title = section
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(labels.ui.not_available);
        doc.heading(title);
        if let Some(prediction) = section.get("prediction").and_then(Value::as_str) {
            doc.paragraph(prediction, 10.5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LangCode;
    use crate::models::FetchResult;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn forecast_sections_render_in_order() {
        let data = AggregatedReportData::from_results(vec![FetchResult::ok(
            "life_forecast",
            json!({"life_forecast": [
                {"title": "Career", "prediction": "Saturn rewards sustained effort."},
                {"title": "Health", "prediction": "A strong year overall."}
            ]}),
        )]);
        let labels = Labels::resolve(LangCode::En);
        let mut doc = ReportDocument::new("t", None).unwrap();
        render_forecast(&mut doc, &data, &labels);
        assert!(doc.save().unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn unreachable_upstream_still_yields_a_pdf() {
        let ctx = ReportContext {
            upstream: crate::upstream::UpstreamClient::new(
                "http://127.0.0.1:1",
                Duration::from_millis(300),
            )
            .unwrap(),
            branding: String::new(),
            devanagari_font_path: String::new(),
        };
        let body = json!({
            "name": "Asha",
            "day": 15, "month": 6, "year": 1990,
            "hour": 10, "min": 30,
            "lat": 28.61, "lon": 77.21, "tzone": 5.5
        });
        let out = LifeForecastReport.assemble(&ctx, &body).await.unwrap();
        assert_eq!(out.filename, "Asha_Life_Forecast.pdf");
        assert!(out.bytes.starts_with(b"%PDF"));
    }
}
