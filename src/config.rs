//! Configuration loading and management.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main run configuration, loaded from a YAML scenario file or assembled
/// from CLI defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    #[serde(default = "default_vehicle")]
    pub vehicle: String,
    #[serde(default = "default_total_points")]
    pub total_points: usize,
    #[serde(default)]
    pub center: Center,
    #[serde(default = "default_bands")]
    pub bands: Vec<BandConfig>,
    #[serde(default)]
    pub seed: Option<u64>, // Optional RNG seed for reproducible runs
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

/// Center of the synthetic point cloud, in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Center {
    pub lon: f64,
    pub lat: f64,
}

impl Default for Center {
    fn default() -> Self {
        // Zaragoza city center
        Self {
            lon: -0.878,
            lat: 41.658,
        }
    }
}

/// A density band: a share of the total point count, drawn within
/// `half_width_deg` of the center independently on both axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandConfig {
    pub weight: f64,
    pub half_width_deg: f64,
}

fn default_endpoint_url() -> String {
    "http://localhost:1616/orders/aragon".to_string()
}

fn default_vehicle() -> String {
    "bike".to_string()
}

fn default_total_points() -> usize {
    2000
}

fn default_bands() -> Vec<BandConfig> {
    vec![
        // dense urban core (~1 km)
        BandConfig {
            weight: 0.60,
            half_width_deg: 0.010,
        },
        // middle ring (~3 km)
        BandConfig {
            weight: 0.25,
            half_width_deg: 0.030,
        },
        // wide periphery (~7 km)
        BandConfig {
            weight: 0.15,
            half_width_deg: 0.070,
        },
    ]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_path() -> PathBuf {
    PathBuf::from("s2_orders_2000.geojson")
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            name: "adhoc".to_string(),
            description: String::new(),
            endpoint_url: default_endpoint_url(),
            vehicle: default_vehicle(),
            total_points: default_total_points(),
            center: Center::default(),
            bands: default_bands(),
            seed: None,
            timeout_secs: default_timeout_secs(),
            output_path: default_output_path(),
        }
    }
}

impl TestConfig {
    /// Load configuration from a YAML scenario file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file: {}", path.display()))?;
        let config: TestConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse scenario file: {}", path.display()))?;
        tracing::debug!(name = %config.name, path = %path.display(), "loaded scenario");
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint_url.is_empty() {
            anyhow::bail!("endpoint_url must not be empty");
        }
        if self.vehicle.is_empty() {
            anyhow::bail!("vehicle must not be empty");
        }
        if self.total_points == 0 {
            anyhow::bail!("total_points must be > 0");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be > 0");
        }
        if self.bands.is_empty() {
            anyhow::bail!("at least one band must be specified");
        }
        for (i, band) in self.bands.iter().enumerate() {
            if band.weight <= 0.0 {
                anyhow::bail!("band {} weight must be > 0", i);
            }
            if band.half_width_deg <= 0.0 {
                anyhow::bail!("band {} half_width_deg must be > 0", i);
            }
        }

        // Every drawn point must stay a valid lon/lat pair.
        let max_width = self.max_half_width();
        if self.center.lon - max_width < -180.0 || self.center.lon + max_width > 180.0 {
            anyhow::bail!("center longitude ± widest band leaves [-180, 180]");
        }
        if self.center.lat - max_width < -90.0 || self.center.lat + max_width > 90.0 {
            anyhow::bail!("center latitude ± widest band leaves [-90, 90]");
        }

        Ok(())
    }

    /// Widest band half-width, i.e. the maximum offset any generated point
    /// can have from the center on either axis.
    pub fn max_half_width(&self) -> f64 {
        self.bands
            .iter()
            .map(|b| b.half_width_deg)
            .fold(0.0, f64::max)
    }
}
