// astro-report-service/src/reports/synastry.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::locale::Labels;
use crate::models::{FetchStatus, PersonParameters, ReportOutput};
use crate::pdf::ReportDocument;
use crate::renderers;
use crate::reports::{self, Report, ReportContext};
use crate::upstream::FetchCall;

/// Two-person compatibility report. Both persons arrive as nested
/// objects; their parameters are forwarded upstream merged into one
/// `p_*` / `s_*` prefixed body.
pub struct SynastryReport;

/// Merges the two prefixed bodies into the single object the two-person
/// endpoints expect.
pub(crate) fn merged_pair_body(primary: &PersonParameters, secondary: &PersonParameters) -> Value {
    let mut merged = primary.birth.to_prefixed_body("p_");
    if let (Value::Object(dst), Value::Object(src)) =
        (&mut merged, secondary.birth.to_prefixed_body("s_"))
    {
        dst.extend(src);
    }
    merged
}

pub(crate) fn pair_cover(
    doc: &mut ReportDocument,
    labels: &Labels,
    title: &str,
    primary: &PersonParameters,
    secondary: &PersonParameters,
) {
    doc.spacer(50.0);
    doc.text_centered(labels.ui.report, 22.0, true);
    doc.spacer(6.0);
    doc.text_centered(title, 15.0, false);
    doc.spacer(18.0);
    for person in [primary, secondary] {
        doc.text_centered(&person.name, 15.0, true);
        doc.spacer(2.0);
        doc.text_centered(&person.birth.birth_line(), 11.0, false);
        doc.spacer(8.0);
    }
    doc.new_page();
}

#[async_trait]
impl Report for SynastryReport {
    fn name(&self) -> &'static str {
        "Synastry"
    }

    async fn assemble(&self, ctx: &ReportContext, body: &Value) -> Result<ReportOutput> {
        let primary = PersonParameters::from_body(body, "primary")?;
        let secondary = PersonParameters::from_body(body, "secondary")?;
        let lang = reports::request_lang(body);
        let labels = Labels::resolve(lang);
        let font = reports::font_for(ctx, lang)?;

        let (data, summary) = ctx
            .upstream
            .fetch_group(vec![
                FetchCall::new(
                    "match_ashtakoot",
                    "match_ashtakoot_points",
                    merged_pair_body(&primary, &secondary),
                ),
                FetchCall::new("p_birth_details", "astro_details", primary.birth.to_body()),
                FetchCall::new(
                    "s_birth_details",
                    "astro_details",
                    secondary.birth.to_body(),
                ),
            ])
            .await;
        if summary.status == FetchStatus::Fail {
            return Err(ReportError::NatalDataUnavailable);
        }

        let mut doc = ReportDocument::new(self.name(), font)?;
        pair_cover(&mut doc, &labels, "Synastry", &primary, &secondary);
        doc.heading(labels.ui.birth_details);
        renderers::synastry::render_person_details(
            &mut doc,
            &data,
            &labels,
            "p_birth_details",
            &primary.name,
        );
        renderers::synastry::render_person_details(
            &mut doc,
            &data,
            &labels,
            "s_birth_details",
            &secondary.name,
        );
        renderers::synastry::render(&mut doc, &data, &labels);
        reports::finalize(doc, &labels, ctx, &primary.name, self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn ctx() -> ReportContext {
        ReportContext {
            upstream: crate::upstream::UpstreamClient::new(
                "http://127.0.0.1:1",
                Duration::from_millis(300),
            )
            .unwrap(),
            branding: String::new(),
            devanagari_font_path: String::new(),
        }
    }

    fn pair_body() -> Value {
        json!({
            "primary": {
                "name": "Asha", "date_of_birth": "15-06-1990",
                "time_of_birth": "10:30 AM",
                "lat": 28.61, "lon": 77.21, "tzone": 5.5
            },
            "secondary": {
                "name": "Ravi", "date_of_birth": "02-11-1988",
                "time_of_birth": "23:45",
                "lat": 19.07, "lon": 72.87, "tzone": 5.5
            }
        })
    }

    #[test]
    fn merged_body_carries_both_prefixes() {
        let body = pair_body();
        let p = PersonParameters::from_body(&body, "primary").unwrap();
        let s = PersonParameters::from_body(&body, "secondary").unwrap();
        let merged = merged_pair_body(&p, &s);
        assert_eq!(merged["p_day"], json!(15));
        assert_eq!(merged["s_day"], json!(2));
        assert_eq!(merged["s_hour"], json!(23));
        assert!(merged.get("day").is_none());
    }

    #[tokio::test]
    async fn missing_person_is_named() {
        let mut body = pair_body();
        body.as_object_mut().unwrap().remove("secondary");
        match SynastryReport.assemble(&ctx(), &body).await {
            Err(ReportError::MissingField(f)) => assert_eq!(f, "secondary"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_fatal() {
        assert!(matches!(
            SynastryReport.assemble(&ctx(), &pair_body()).await,
            Err(ReportError::NatalDataUnavailable)
        ));
    }
}
