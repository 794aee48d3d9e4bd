// astro-report-service/src/reports/mod.rs
//
// Report assemblers: per-type `validate -> fetch -> render -> footer ->
// serialize` pipelines behind a common trait, selected by a factory.

mod basic;
mod life_forecast;
mod match_making;
mod mini;
mod professional;
mod solar_return;
mod synastry;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::locale::{LangCode, Labels};
use crate::models::{pdf_filename, ReportOutput};
use crate::pdf::{devanagari_font_bytes, ReportDocument};
use crate::upstream::UpstreamClient;

pub use basic::BasicReport;
pub use life_forecast::LifeForecastReport;
pub use match_making::MatchMakingReport;
pub use mini::MiniReport;
pub use professional::ProfessionalReport;
pub use solar_return::SolarReturnReport;
pub use synastry::SynastryReport;

/// Shared per-request dependencies, cloned cheaply into each assembly.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub upstream: UpstreamClient,
    pub branding: String,
    pub devanagari_font_path: String,
}

#[async_trait]
pub trait Report: Send + Sync {
    /// Report name as it appears in the attachment filename.
    fn name(&self) -> &'static str;

    async fn assemble(&self, ctx: &ReportContext, body: &Value) -> Result<ReportOutput>;
}

pub fn create_report(kind: &str) -> Result<Box<dyn Report>> {
    match kind {
        "basic" => Ok(Box::new(BasicReport)),
        "mini" => Ok(Box::new(MiniReport)),
        "professional" => Ok(Box::new(ProfessionalReport)),
        "solar_return" => Ok(Box::new(SolarReturnReport)),
        "synastry" => Ok(Box::new(SynastryReport)),
        "life_forecast" => Ok(Box::new(LifeForecastReport)),
        "match_making" => Ok(Box::new(MatchMakingReport)),
        other => Err(ReportError::UnknownReportType(other.to_string())),
    }
}

/// Subject name from the request body; empty when absent, which the
/// filename helper turns into "Horoscope".
pub(crate) fn subject_name(body: &Value) -> String {
    body.get("name")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

pub(crate) fn request_lang(body: &Value) -> LangCode {
    LangCode::parse(body.get("lang").and_then(Value::as_str).unwrap_or("en"))
}

/// Resolves the Devanagari font only for languages that need it, so
/// Latin-script requests never touch the font file.
pub(crate) fn font_for(ctx: &ReportContext, lang: LangCode) -> Result<Option<&'static [u8]>> {
    if lang.uses_devanagari() {
        Ok(Some(devanagari_font_bytes(&ctx.devanagari_font_path)?))
    } else {
        Ok(None)
    }
}

/// Footer pass and serialization, shared by every assembler. Runs after
/// all content renderers so the page total is final.
pub(crate) fn finalize(
    mut doc: ReportDocument,
    labels: &Labels,
    ctx: &ReportContext,
    subject: &str,
    report_name: &str,
) -> Result<ReportOutput> {
    doc.footer_pass(&ctx.branding, labels.ui.page, labels.ui.of);
    let pages = doc.page_count();
    let bytes = doc.save()?;
    tracing::info!(
        report = report_name,
        pages,
        size_bytes = bytes.len(),
        "report serialized"
    );
    Ok(ReportOutput {
        bytes,
        filename: pdf_filename(subject, report_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn factory_covers_all_report_types() {
        for kind in [
            "basic",
            "mini",
            "professional",
            "solar_return",
            "synastry",
            "life_forecast",
            "match_making",
        ] {
            assert!(create_report(kind).is_ok(), "missing report: {kind}");
        }
        assert!(matches!(
            create_report("tarot"),
            Err(ReportError::UnknownReportType(_))
        ));
    }

    #[test]
    fn body_helpers_default_sensibly() {
        assert_eq!(subject_name(&json!({"name": "Asha"})), "Asha");
        assert_eq!(subject_name(&json!({})), "");
        assert_eq!(request_lang(&json!({"lang": "hi"})), LangCode::Hi);
        assert_eq!(request_lang(&json!({})), LangCode::En);
    }
}
