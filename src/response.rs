//! Response classification, summary extraction, and persistence.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

/// Sentinel reported when the response document carries no CRS descriptor.
pub const UNKNOWN_CRS: &str = "unknown";

/// Summary fields read out of a successful response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub feature_count: usize,
    pub crs_name: String,
}

/// Outcome of a single run against the endpoint.
#[derive(Debug)]
pub enum Outcome {
    /// 200 response: parsed, summarized, and persisted.
    Success {
        summary: ResponseSummary,
        output_path: PathBuf,
    },
    /// Any non-200 response. Reported, not fatal; nothing is written.
    UnexpectedStatus { status: u16, body: String },
}

/// Classify a response and persist it on success.
///
/// A 200 body must parse as JSON (anything else is fatal) and is written
/// to `output_path` as indented UTF-8 JSON with non-ASCII characters kept
/// literal. Any other status is returned as a reportable outcome without
/// touching the filesystem.
pub fn handle_response(status: u16, body: &str, output_path: &Path) -> anyhow::Result<Outcome> {
    if status != 200 {
        return Ok(Outcome::UnexpectedStatus {
            status,
            body: body.to_string(),
        });
    }

    let document: Value =
        serde_json::from_str(body).context("endpoint returned 200 with a non-JSON body")?;
    let summary = summarize(&document);

    let pretty =
        serde_json::to_string_pretty(&document).context("failed to format response document")?;
    std::fs::write(output_path, pretty)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    Ok(Outcome::Success {
        summary,
        output_path: output_path.to_path_buf(),
    })
}

/// Read the reported fields out of a response document. Everything else
/// in the document is opaque to this client.
pub fn summarize(document: &Value) -> ResponseSummary {
    let feature_count = document
        .get("features")
        .and_then(Value::as_array)
        .map(|features| features.len())
        .unwrap_or(0);

    let crs_name = document
        .pointer("/crs/properties/name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_CRS)
        .to_string();

    ResponseSummary {
        feature_count,
        crs_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn output_in(dir: &TempDir) -> PathBuf {
        dir.path().join("out.geojson")
    }

    #[test]
    fn test_summarize_full_document() {
        let doc = json!({
            "features": [1, 2, 3],
            "crs": { "properties": { "name": "EPSG:4326" } },
        });
        let summary = summarize(&doc);
        assert_eq!(summary.feature_count, 3);
        assert_eq!(summary.crs_name, "EPSG:4326");
    }

    #[test]
    fn test_summarize_missing_crs_uses_sentinel() {
        let doc = json!({ "features": [] });
        let summary = summarize(&doc);
        assert_eq!(summary.feature_count, 0);
        assert_eq!(summary.crs_name, UNKNOWN_CRS);
    }

    #[test]
    fn test_summarize_missing_features_counts_zero() {
        let doc = json!({ "crs": { "properties": { "name": "EPSG:4326" } } });
        assert_eq!(summarize(&doc).feature_count, 0);
    }

    #[test]
    fn test_success_writes_exact_document() {
        let dir = TempDir::new().unwrap();
        let path = output_in(&dir);
        let body = r#"{"features": [1, 2, 3], "crs": {"properties": {"name": "EPSG:4326"}}}"#;

        let outcome = handle_response(200, body, &path).unwrap();
        match outcome {
            Outcome::Success {
                summary,
                output_path,
            } => {
                assert_eq!(summary.feature_count, 3);
                assert_eq!(summary.crs_name, "EPSG:4326");
                assert_eq!(output_path, path);
            }
            other => panic!("expected success, got {:?}", other),
        }

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_success_output_is_indented_and_keeps_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = output_in(&dir);
        let body = r#"{"features": [], "name": "Zaragoza — Casco Histórico"}"#;

        handle_response(200, body, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains('\n'), "output should be indented");
        assert!(
            written.contains("Casco Histórico"),
            "non-ASCII must stay literal, got: {}",
            written
        );
        assert!(!written.contains("\\u00"));
    }

    #[test]
    fn test_non_200_reports_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = output_in(&dir);

        let outcome = handle_response(500, "internal error", &path).unwrap();
        match outcome {
            Outcome::UnexpectedStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected unexpected-status, got {:?}", other),
        }
        assert!(!path.exists(), "no file may be created on a non-200");
    }

    #[test]
    fn test_non_200_does_not_modify_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = output_in(&dir);
        std::fs::write(&path, "previous run").unwrap();

        handle_response(503, "busy", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous run");
    }

    #[test]
    fn test_malformed_200_body_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = output_in(&dir);

        let err = handle_response(200, "<html>not json</html>", &path);
        assert!(err.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_output_path_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.geojson");

        let err = handle_response(200, r#"{"features": []}"#, &path);
        assert!(err.is_err());
    }
}
