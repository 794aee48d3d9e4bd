// astro-report-service/src/reports/basic.rs

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

/// Standard natal horoscope. Degrades to a placeholder-heavy PDF with
/// HTTP 200 when the upstream is entirely unreachable.
pub struct BasicReport;

pub(crate) fn natal_calls(params: &BirthParameters) -> Vec<FetchCall> {
    let body = params.to_body();
    vec![
        FetchCall::named("planets", body.clone()),
        FetchCall::new("d1_chart", "horo_chart/D1", body.clone()),
        FetchCall::new("moon_chart", "horo_chart/MOON", body.clone()),
        FetchCall::named("major_vdasha", body.clone()),
        FetchCall::named("kalsarpa", body.clone()),
        FetchCall::named("manglik", body.clone()),
        FetchCall::named("sadhesati", body.clone()),
        FetchCall::new("gemstones", "basic_gem_suggestion", body.clone()),
        FetchCall::new("numerology", "numero_table", body),
    ]
}

fn render(
    ctx: &ReportContext,
    subject: &str,
    params: &BirthParameters,
    labels: &Labels,
    data: &AggregatedReportData,
    font: Option<&[u8]>,
    name: &'static str,
) -> Result<ReportOutput> {
    let mut doc = ReportDocument::new(name, font)?;
    renderers::cover::render(&mut doc, subject, params, labels, "Basic Horoscope");
    renderers::positions::render(&mut doc, data, labels);
    renderers::charts::render_birth(&mut doc, data, labels);
    renderers::charts::render_moon(&mut doc, data, labels);
    renderers::dasha::render_vimshottari(&mut doc, data, labels);
    renderers::kalsarpa::render(&mut doc, data, labels);
    renderers::afflictions::render_manglik(&mut doc, data, labels);
    renderers::afflictions::render_sadhesati(&mut doc, data, labels);
    renderers::gemstone::render(&mut doc, data, labels);
    renderers::numerology::render(&mut doc, data, labels);
    reports::finalize(doc, labels, ctx, subject, name)
}

#[async_trait]
impl Report for BasicReport {
    fn name(&self) -> &'static str {
        "Basic_Horoscope"
    }

    async fn assemble(&self, ctx: &ReportContext, body: &Value) -> Result<ReportOutput> {
        let params = BirthParameters::from_body(body)?;
        let subject = reports::subject_name(body);
        let lang = reports::request_lang(body);
        let labels = Labels::resolve(lang);
        let font = reports::font_for(ctx, lang)?;

        let (data, summary) = ctx.upstream.fetch_group(natal_calls(&params)).await;
        if summary.status == FetchStatus::Fail {
            warn!(report = self.name(), "all upstream calls failed, rendering degraded report");
        }

        render(ctx, &subject, &params, &labels, &data, font, self.name())
    }
}
