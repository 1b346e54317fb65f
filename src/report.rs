//! Run reporting and formatting.

use std::time::Duration;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::config::TestConfig;
use crate::response::Outcome;

/// Final report for a single run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub timestamp: String,
    pub name: String,
    pub endpoint_url: String,
    pub vehicle: String,
    pub points_sent: usize,
    pub status: u16,
    pub elapsed_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_body: Option<String>,
}

impl RunReport {
    /// Build a report from a completed run.
    pub fn new(
        config: &TestConfig,
        points_sent: usize,
        elapsed: Duration,
        outcome: &Outcome,
    ) -> Self {
        let (status, feature_count, crs_name, output_path, error_body) = match outcome {
            Outcome::Success {
                summary,
                output_path,
            } => (
                200,
                Some(summary.feature_count),
                Some(summary.crs_name.clone()),
                Some(output_path.display().to_string()),
                None,
            ),
            Outcome::UnexpectedStatus { status, body } => {
                (*status, None, None, None, Some(body.clone()))
            }
        };

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            name: config.name.clone(),
            endpoint_url: config.endpoint_url.clone(),
            vehicle: config.vehicle.clone(),
            points_sent,
            status,
            elapsed_secs: elapsed.as_secs_f64(),
            feature_count,
            crs_name,
            output_path,
            error_body,
        }
    }

    /// Format the report as a console table.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![format!("Run Report: {}", self.name)]);

        table.add_row(vec!["Endpoint:", &self.endpoint_url]);
        table.add_row(vec!["Vehicle:", &self.vehicle]);
        table.add_row(vec!["Points Sent:", &format!("{}", self.points_sent)]);
        table.add_row(vec!["Status:", &format!("{}", self.status)]);
        table.add_row(vec!["Elapsed:", &format!("{:.3}s", self.elapsed_secs)]);

        match (&self.feature_count, &self.crs_name, &self.output_path) {
            (Some(features), Some(crs), Some(output)) => {
                table.add_row(vec!["Features:", &format!("{}", features)]);
                table.add_row(vec!["CRS:", crs]);
                table.add_row(vec!["Output:", output]);
            }
            _ => {
                if let Some(body) = &self.error_body {
                    table.add_row(vec!["Error Body:", body]);
                }
            }
        }

        table.to_string()
    }

    /// Format the report as JSON.
    pub fn format_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Format the report as a CSV row.
    pub fn format_csv(&self) -> String {
        format!(
            "{},{},{},{},{:.3},{},{}",
            self.timestamp,
            self.name,
            self.points_sent,
            self.status,
            self.elapsed_secs,
            self.feature_count
                .map(|f| f.to_string())
                .unwrap_or_default(),
            self.crs_name.as_deref().unwrap_or_default(),
        )
    }

    /// CSV header row.
    pub fn csv_header() -> &'static str {
        "timestamp,name,points,status,elapsed_secs,features,crs"
    }
}
