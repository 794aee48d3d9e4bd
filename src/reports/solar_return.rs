// astro-report-service/src/reports/solar_return.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::locale::Labels;
use crate::models::{BirthParameters, FetchStatus, ReportOutput};
use crate::pdf::ReportDocument;
use crate::renderers;
use crate::reports::{self, Report, ReportContext};
use crate::upstream::FetchCall;

/// Solar return (varshaphal) report for one target year. Requires
/// `solar_return_year` on top of the birth parameters and a reachable
/// upstream; there is no meaningful degraded form.
pub struct SolarReturnReport;

#[async_trait]
impl Report for SolarReturnReport {
    fn name(&self) -> &'static str {
        "Solar_Return"
    }

    async fn assemble(&self, ctx: &ReportContext, body: &Value) -> Result<ReportOutput> {
        let params = BirthParameters::from_body(body)?;
        let year = match body.get("solar_return_year") {
            None | Some(Value::Null) => {
                return Err(ReportError::MissingField("solar_return_year".to_string()))
            }
            Some(v) => v.as_i64().ok_or_else(|| ReportError::OutOfRange {
                field: "solar_return_year".to_string(),
                reason: "must be a number".to_string(),
            })?,
        };

        let subject = reports::subject_name(body);
        let lang = reports::request_lang(body);
        let labels = Labels::resolve(lang);
        let font = reports::font_for(ctx, lang)?;

        let mut upstream_body = params.to_body();
        upstream_body["solar_return_year"] = Value::from(year);

        let (data, summary) = ctx
            .upstream
            .fetch_group(vec![
                FetchCall::new("planets", "solar_return_planets", upstream_body.clone()),
                FetchCall::new("d1_chart", "solar_return_chart", upstream_body.clone()),
                FetchCall::new("major_vdasha", "solar_return_dasha", upstream_body),
            ])
            .await;
        if summary.status == FetchStatus::Fail {
            return Err(ReportError::NatalDataUnavailable);
        }

        let mut doc = ReportDocument::new(self.name(), font)?;
        renderers::cover::render(
            &mut doc,
            &subject,
            &params,
            &labels,
            &format!("Solar Return {year}"),
        );
        renderers::positions::render(&mut doc, &data, &labels);
        renderers::charts::render_birth(&mut doc, &data, &labels);
        renderers::dasha::render_vimshottari(&mut doc, &data, &labels);
        reports::finalize(doc, &labels, ctx, &subject, self.name())
    }
}
