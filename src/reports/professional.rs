// astro-report-service/src/reports/professional.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::locale::{Labels, ASHTAKVARGA_PLANETS, PLANET_KEYS};
use crate::models::{AggregatedReportData, BirthParameters, FetchStatus, ReportOutput};
use crate::pdf::ReportDocument;
use crate::renderers;
use crate::reports::{self, basic, Report, ReportContext};
use crate::upstream::FetchCall;

/// Full-length report: every natal section plus navamsa, yogini dasha,
/// the 9-planet sub-period fan-out and the 7-planet ashtakvarga grid.
/// Unlike the basic family it requires a baseline natal dataset; when
/// every main call fails the request errors instead of degrading.
pub struct ProfessionalReport;

#[async_trait]
impl Report for ProfessionalReport {
    fn name(&self) -> &'static str {
        "Professional_Horoscope"
    }

    async fn assemble(&self, ctx: &ReportContext, body: &Value) -> Result<ReportOutput> {
        let params = BirthParameters::from_body(body)?;
        let subject = reports::subject_name(body);
        let lang = reports::request_lang(body);
        let labels = Labels::resolve(lang);
        let font = reports::font_for(ctx, lang)?;

        let upstream_body = params.to_body();
        let mut main_calls = basic::natal_calls(&params);
        main_calls.push(FetchCall::new(
            "d9_chart",
            "horo_chart/D9",
            upstream_body.clone(),
        ));
        main_calls.push(FetchCall::named("yogini_dasha", upstream_body.clone()));
        main_calls.push(FetchCall::named("char_dasha", upstream_body.clone()));

        // Three independent groups awaited together: the main natal
        // batch and the two per-element fan-outs.
        let (main, ashtakvarga, sub_vdasha) = tokio::join!(
            ctx.upstream.fetch_group(main_calls),
            ctx.upstream.fetch_per_element(
                "ashtakvarga",
                "planet_ashtakvarga",
                &ASHTAKVARGA_PLANETS,
                &upstream_body,
            ),
            ctx.upstream
                .fetch_per_element("sub_vdasha", "sub_vdasha", &PLANET_KEYS, &upstream_body),
        );

        let (mut data, summary) = main;
        if summary.status == FetchStatus::Fail {
            return Err(ReportError::NatalDataUnavailable);
        }
        data.merge(AggregatedReportData::from_results(vec![
            ashtakvarga,
            sub_vdasha,
        ]));

        render(ctx, &subject, &params, &labels, &data, font, self.name())
    }
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
    renderers::cover::render(&mut doc, subject, params, labels, "Professional Horoscope");
    renderers::positions::render(&mut doc, data, labels);
    renderers::charts::render_birth(&mut doc, data, labels);
    renderers::charts::render_moon(&mut doc, data, labels);
    renderers::charts::render_navamsa(&mut doc, data, labels);
    renderers::dasha::render_vimshottari(&mut doc, data, labels);
    renderers::dasha::render_sub_dashas(&mut doc, data, labels);
    renderers::dasha::render_yogini(&mut doc, data, labels);
    renderers::dasha::render_char(&mut doc, data, labels);
    renderers::ashtakvarga::render(&mut doc, data, labels);
    renderers::kalsarpa::render(&mut doc, data, labels);
    renderers::afflictions::render_manglik(&mut doc, data, labels);
    renderers::afflictions::render_sadhesati(&mut doc, data, labels);
    renderers::gemstone::render(&mut doc, data, labels);
    renderers::numerology::render(&mut doc, data, labels);
    reports::finalize(doc, labels, ctx, subject, name)
}
