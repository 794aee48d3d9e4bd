// astro-report-service/src/reports/mini.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::locale::Labels;
use crate::models::{BirthParameters, ReportOutput};
use crate::pdf::ReportDocument;
use crate::renderers;
use crate::reports::{self, Report, ReportContext};
use crate::upstream::FetchCall;

/// Short-form horoscope: positions, birth chart and major periods only.
pub struct MiniReport;

#[async_trait]
impl Report for MiniReport {
    fn name(&self) -> &'static str {
        "Mini_Horoscope"
    }

    async fn assemble(&self, ctx: &ReportContext, body: &Value) -> Result<ReportOutput> {
        let params = BirthParameters::from_body(body)?;
        let subject = reports::subject_name(body);
        let lang = reports::request_lang(body);
        let labels = Labels::resolve(lang);
        let font = reports::font_for(ctx, lang)?;

        let upstream_body = params.to_body();
        let (data, _) = ctx
            .upstream
            .fetch_group(vec![
                FetchCall::named("planets", upstream_body.clone()),
                FetchCall::new("d1_chart", "horo_chart/D1", upstream_body.clone()),
                FetchCall::named("major_vdasha", upstream_body),
            ])
            .await;

        let mut doc = ReportDocument::new(self.name(), font)?;
        renderers::cover::render(&mut doc, &subject, &params, &labels, "Mini Horoscope");
        renderers::positions::render(&mut doc, &data, &labels);
        renderers::charts::render_birth(&mut doc, &data, &labels);
        renderers::dasha::render_vimshottari(&mut doc, &data, &labels);
        reports::finalize(doc, &labels, ctx, &subject, self.name())
    }
}
