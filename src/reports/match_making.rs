// astro-report-service/src/reports/match_making.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::locale::Labels;
use crate::models::{AggregatedReportData, FetchStatus, PersonParameters, ReportOutput};
use crate::pdf::ReportDocument;
use crate::renderers;
use crate::reports::{self, synastry, Report, ReportContext};
use crate::upstream::FetchCall;

/// Marriage match-making: the synastry ashtakoot scoring plus a manglik
/// verdict for each person.
pub struct MatchMakingReport;

#[async_trait]
impl Report for MatchMakingReport {
    fn name(&self) -> &'static str {
        "Match_Making"
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
                    synastry::merged_pair_body(&primary, &secondary),
                ),
                FetchCall::new("p_birth_details", "astro_details", primary.birth.to_body()),
                FetchCall::new(
                    "s_birth_details",
                    "astro_details",
                    secondary.birth.to_body(),
                ),
                FetchCall::new("p_manglik", "manglik", primary.birth.to_body()),
                FetchCall::new("s_manglik", "manglik", secondary.birth.to_body()),
            ])
            .await;
        if summary.status == FetchStatus::Fail {
            return Err(ReportError::NatalDataUnavailable);
        }

        let mut doc = ReportDocument::new(self.name(), font)?;
        synastry::pair_cover(&mut doc, &labels, "Match Making", &primary, &secondary);
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
        manglik_for(&mut doc, &data, &labels, "p_manglik", &primary.name);
        manglik_for(&mut doc, &data, &labels, "s_manglik", &secondary.name);
        reports::finalize(doc, &labels, ctx, &primary.name, self.name())
    }
}

/// The shared manglik renderer reads the `manglik` key, so each side's
/// fragment is re-keyed into a scratch view before rendering.
fn manglik_for(
    doc: &mut ReportDocument,
    data: &AggregatedReportData,
    labels: &Labels,
    key: &str,
    person_name: &str,
) {
    let mut scratch = AggregatedReportData::default();
    if let Some(fragment) = data.get(key) {
        scratch.insert("manglik", fragment.clone());
    }
    doc.ensure_space(40.0);
    doc.spacer(3.0);
    doc.text(person_name, 13.0, true);
    renderers::afflictions::render_manglik(doc, &scratch, labels);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn unreachable_upstream_is_fatal() {
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
            "primary": {
                "name": "Asha", "date_of_birth": "15-06-1990",
                "time_of_birth": "10:30 AM",
                "lat": 28.61, "lon": 77.21, "tzone": 5.5
            },
            "secondary": {
                "name": "Ravi", "date_of_birth": "02-11-1988",
                "time_of_birth": "11:45 PM",
                "lat": 19.07, "lon": 72.87, "tzone": 5.5
            }
        });
        assert!(matches!(
            MatchMakingReport.assemble(&ctx, &body).await,
            Err(ReportError::NatalDataUnavailable)
        ));
    }
}
