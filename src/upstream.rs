// astro-report-service/src/upstream.rs
//
// Fan-out/fan-in orchestrator over the astrology calculation backend.
// Every call is wrapped so that network errors, non-2xx statuses and
// JSON parse failures settle as failed FetchResults; no call may abort
// a batch.

use futures::future::join_all;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::{ReportError, Result};
use crate::models::{AggregatedReportData, FetchResult, FetchSummary};

/// One planned upstream call within a fan-out group.
#[derive(Debug, Clone)]
pub struct FetchCall {
    pub key: String,
    pub endpoint: String,
    pub body: Value,
}

impl FetchCall {
    pub fn new(key: &str, endpoint: &str, body: Value) -> Self {
        Self {
            key: key.to_string(),
            endpoint: endpoint.to_string(),
            body,
        }
    }

    /// Key and endpoint share a name, which is the common case.
    pub fn named(key: &str, body: Value) -> Self {
        Self::new(key, key, body)
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::HttpClient(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues one POST to `{base_url}/{endpoint}`. Infallible by design:
    /// every failure mode becomes a failed FetchResult.
    pub async fn fetch(&self, key: &str, endpoint: &str, body: &Value) -> FetchResult {
        let url = format!("{}/{}", self.base_url, endpoint);
        let started = Instant::now();

        let response = match self.http.post(&url).json(body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(key, endpoint, error = %e, "upstream call failed");
                return FetchResult::failed(key, e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(key, endpoint, status = status.as_u16(), "upstream returned error status");
            return FetchResult::failed(key, format!("upstream returned {status}"));
        }

        match response.json::<Value>().await {
            Ok(data) => {
                debug!(
                    key,
                    endpoint,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "fragment fetched"
                );
                FetchResult::ok(key, data)
            }
            Err(e) => {
                warn!(key, endpoint, error = %e, "upstream returned malformed JSON");
                FetchResult::failed(key, format!("malformed JSON: {e}"))
            }
        }
    }

    /// Fan-out: all calls are issued back-to-back and awaited together;
    /// wall-clock time is bounded by the slowest call. Returns exactly
    /// one FetchResult per requested key, folded into the aggregate map
    /// plus a Pass/Partial/Fail summary for diagnostics.
    pub async fn fetch_group(
        &self,
        calls: Vec<FetchCall>,
    ) -> (AggregatedReportData, FetchSummary) {
        let futures = calls
            .iter()
            .map(|c| self.fetch(&c.key, &c.endpoint, &c.body));
        let results: Vec<FetchResult> = join_all(futures).await;

        let summary = FetchSummary::from_results(&results);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            status = ?summary.status,
            failed_keys = ?summary.failed_keys,
            "upstream fan-out settled"
        );

        (AggregatedReportData::from_results(results), summary)
    }

    /// Per-element fan-out for enumerable sets (9 planets, 7 ashtakvarga
    /// planets, 12 signs): one call per element at
    /// `{endpoint}/{element}`, folded into a sub-map keyed by element.
    /// The group result succeeds when at least one element succeeded.
    pub async fn fetch_per_element(
        &self,
        group_key: &str,
        endpoint: &str,
        elements: &[&str],
        body: &Value,
    ) -> FetchResult {
        let futures = elements.iter().map(|element| {
            let endpoint = format!("{endpoint}/{element}");
            async move { (*element, self.fetch(element, &endpoint, body).await) }
        });
        let results = join_all(futures).await;

        let mut sub_map = Map::new();
        let mut failed: Vec<&str> = Vec::new();
        for (element, result) in results {
            if let (true, Some(data)) = (result.success, result.data) {
                sub_map.insert(element.to_string(), data);
            } else {
                failed.push(element);
            }
        }

        debug!(
            group = group_key,
            elements = elements.len(),
            failed = failed.len(),
            "per-element fan-out settled"
        );

        if sub_map.is_empty() {
            FetchResult::failed(
                group_key,
                format!("all elements failed: {}", failed.join(", ")),
            )
        } else {
            let mut result = FetchResult::ok(group_key, Value::Object(sub_map));
            if !failed.is_empty() {
                result.error = Some(format!("elements failed: {}", failed.join(", ")));
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FetchStatus;
    use serde_json::json;

    fn unreachable_client() -> UpstreamClient {
        // Port 1 is never listening; every call settles as a failure.
        UpstreamClient::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn batch_settles_with_one_result_per_key_when_unreachable() {
        let client = unreachable_client();
        let calls = vec![
            FetchCall::named("planets", json!({"day": 1})),
            FetchCall::named("major_vdasha", json!({"day": 1})),
            FetchCall::new("gems", "basic_gem_suggestion", json!({"day": 1})),
        ];
        let (data, summary) = client.fetch_group(calls).await;

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.status, FetchStatus::Fail);
        assert_eq!(summary.failed_keys.len(), 3);
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn per_element_fanout_fails_closed() {
        let client = unreachable_client();
        let result = client
            .fetch_per_element("ashtakvarga", "planet_ashtakvarga", &["sun", "moon"], &json!({}))
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("sun"));
    }

    #[tokio::test]
    async fn empty_group_classifies_as_fail() {
        let client = unreachable_client();
        let (_, summary) = client.fetch_group(Vec::new()).await;
        assert_eq!(summary.status, FetchStatus::Fail);
        assert_eq!(summary.total, 0);
    }
}
