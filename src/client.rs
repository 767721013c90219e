//! HTTP client for the analysis backend
//!
//! Two operations, one round trip each:
//!
//! - `fetch_results`: GET against the results feed. The transport payload is
//!   double-encoded: the response body is JSON whose `results` field holds a
//!   *string* that must itself be parsed as JSON to yield the section mapping.
//! - `analyze`: POST the connection parameters, receive the profiling report
//!   payload (one structured value plus three report URLs).
//!
//! Failures fall into three buckets (transport, HTTP status, payload parse).
//! All three collapse into one generic user-facing message; the specific
//! cause only ever reaches the log.

use crate::config::Endpoints;
use crate::render::ResultSet;
use log::error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Connection parameters for an on-demand analysis run.
///
/// All fields are free-text; the backend owns validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub table: String,
}

/// Response of the analyze endpoint: one inline structured dump and three
/// externally hosted report documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub pandas_profiling: serde_json::Value,
    pub sweetviz: String,
    pub autoviz: String,
    pub dtale: String,
}

impl AnalysisReport {
    /// The embedded report viewers, in display order.
    pub fn viewers(&self) -> [(&'static str, &str); 3] {
        [
            ("sweetviz", self.sweetviz.as_str()),
            ("autoviz", self.autoviz.as_str()),
            ("dtale", self.dtale.as_str()),
        ]
    }
}

/// Envelope of the results feed; `results` is itself JSON-encoded.
#[derive(Deserialize)]
struct FetchEnvelope {
    results: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ClientError {
    /// The one message users see, whatever actually went wrong. The real
    /// cause goes to the log only.
    pub fn user_message(&self) -> &'static str {
        "Error fetching analysis results"
    }
}

/// Blocking client bound to a resolved pair of endpoints.
pub struct AnalysisClient {
    http: reqwest::blocking::Client,
    endpoints: Endpoints,
}

impl AnalysisClient {
    pub fn new(endpoints: Endpoints) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// One GET against the results feed.
    pub fn fetch_results(&self) -> Result<ResultSet, ClientError> {
        let response = self
            .http
            .get(&self.endpoints.fetch_url)
            .send()
            .map_err(|e| self.log_failure("fetch", e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.log_failure("fetch", ClientError::Status(status.as_u16())));
        }

        let body = response
            .text()
            .map_err(|e| self.log_failure("fetch", e.into()))?;
        decode_results(&body).map_err(|e| self.log_failure("fetch", e))
    }

    /// One POST with the connection parameters.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, ClientError> {
        let response = self
            .http
            .post(&self.endpoints.analyze_url)
            .json(request)
            .send()
            .map_err(|e| self.log_failure("analyze", e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.log_failure("analyze", ClientError::Status(status.as_u16())));
        }

        let body = response
            .text()
            .map_err(|e| self.log_failure("analyze", e.into()))?;
        decode_report(&body).map_err(|e| self.log_failure("analyze", e))
    }

    fn log_failure(&self, operation: &str, err: ClientError) -> ClientError {
        error!("{operation} request failed: {err}");
        err
    }
}

/// Parse the double-encoded results feed body into the section mapping.
pub fn decode_results(body: &str) -> Result<ResultSet, ClientError> {
    let envelope: FetchEnvelope = serde_json::from_str(body)?;
    let results: ResultSet = serde_json::from_str(&envelope.results)?;
    Ok(results)
}

/// Parse the analyze endpoint's report payload.
pub fn decode_report(body: &str) -> Result<AnalysisReport, ClientError> {
    let report: AnalysisReport = serde_json::from_str(body)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PAYLOAD DECODING TESTS
    // ==========================================================================
    //
    // The results feed is double-encoded: outer JSON carries a string that is
    // itself JSON. Both layers must parse; either failing is a payload error.
    // ==========================================================================

    #[test]
    fn test_decode_results_double_encoded() {
        let body = r#"{"results": "{\"stats\": {\"rows\": 10}, \"chart\": \"<svg></svg>\"}"}"#;
        let results = decode_results(body).unwrap();

        let keys: Vec<&str> = results.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["stats", "chart"]);
        assert_eq!(results["chart"], serde_json::json!("<svg></svg>"));
    }

    #[test]
    fn test_decode_results_empty_mapping() {
        let body = r#"{"results": "{}"}"#;
        let results = decode_results(body).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_decode_results_rejects_bad_outer_json() {
        assert!(matches!(
            decode_results("not json"),
            Err(ClientError::Payload(_))
        ));
    }

    #[test]
    fn test_decode_results_rejects_bad_inner_json() {
        // Outer envelope fine, inner string is not a JSON object.
        let body = r#"{"results": "demon dog"}"#;
        assert!(matches!(decode_results(body), Err(ClientError::Payload(_))));
    }

    #[test]
    fn test_decode_results_rejects_non_string_results_field() {
        let body = r#"{"results": {"stats": 1}}"#;
        assert!(matches!(decode_results(body), Err(ClientError::Payload(_))));
    }

    #[test]
    fn test_decode_report() {
        let body = r#"{
            "pandas_profiling": {"rows": 10},
            "sweetviz": "http://x/s.html",
            "autoviz": "http://x/a.html",
            "dtale": "http://x/d.html"
        }"#;
        let report = decode_report(body).unwrap();
        assert_eq!(report.pandas_profiling, serde_json::json!({"rows": 10}));
        assert_eq!(
            report.viewers(),
            [
                ("sweetviz", "http://x/s.html"),
                ("autoviz", "http://x/a.html"),
                ("dtale", "http://x/d.html"),
            ]
        );
    }

    #[test]
    fn test_decode_report_rejects_missing_field() {
        let body = r#"{"pandas_profiling": {}, "sweetviz": "http://x/s.html"}"#;
        assert!(matches!(decode_report(body), Err(ClientError::Payload(_))));
    }

    // ==========================================================================
    // ERROR TAXONOMY TESTS
    // ==========================================================================

    #[test]
    fn test_all_errors_share_one_user_message() {
        let parse_err = decode_results("nope").unwrap_err();
        let status_err = ClientError::Status(500);
        assert_eq!(parse_err.user_message(), status_err.user_message());
        assert_eq!(status_err.user_message(), "Error fetching analysis results");
    }

    #[test]
    fn test_request_serializes_flat() {
        let request = AnalysisRequest {
            host: "h".to_string(),
            port: "5432".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
            database: "d".to_string(),
            table: "t".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "host": "h", "port": "5432", "username": "u",
                "password": "p", "database": "d", "table": "t"
            })
        );
    }
}
