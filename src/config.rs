use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::collaborators::Easing;
use crate::tracker::{TrackerMetrics, BOTTOM_SNAP_MARGIN};

/// Tuning for the scroll coordinator.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TabScrollConfig {
    /// Height of the pinned tab bar, in logical pixels.
    #[serde(default = "default_tab_bar_height")]
    pub tab_bar_height: f64,
    /// How far before a tab section's top the tab bar starts showing.
    #[serde(default = "default_reach_threshold")]
    pub reach_threshold: f64,
    /// Offsets below this always reset to the overview state.
    #[serde(default = "default_top_reset_threshold")]
    pub top_reset_threshold: f64,
    #[serde(default = "default_bottom_snap_margin")]
    pub bottom_snap_margin: f64,
    #[serde(default = "default_scroll_duration_ms")]
    pub scroll_duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
    /// Buffered events per subscriber before slow receivers lag.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_tab_bar_height() -> f64 {
    56.0
}

fn default_reach_threshold() -> f64 {
    56.0
}

fn default_top_reset_threshold() -> f64 {
    10.0
}

fn default_bottom_snap_margin() -> f64 {
    BOTTOM_SNAP_MARGIN
}

fn default_scroll_duration_ms() -> u64 {
    300
}

fn default_event_capacity() -> usize {
    64
}

impl Default for TabScrollConfig {
    fn default() -> Self {
        Self {
            tab_bar_height: default_tab_bar_height(),
            reach_threshold: default_reach_threshold(),
            top_reset_threshold: default_top_reset_threshold(),
            bottom_snap_margin: default_bottom_snap_margin(),
            scroll_duration_ms: default_scroll_duration_ms(),
            easing: Easing::default(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl TabScrollConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).context("Failed to parse tab scroll config as YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let metrics = [
            ("tab_bar_height", self.tab_bar_height),
            ("reach_threshold", self.reach_threshold),
            ("top_reset_threshold", self.top_reset_threshold),
            ("bottom_snap_margin", self.bottom_snap_margin),
        ];
        for (name, value) in metrics {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a non-negative number, got {}", name, value);
            }
        }

        if self.event_capacity == 0 {
            anyhow::bail!("event_capacity must be at least 1");
        }

        Ok(())
    }

    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    pub fn tracker_metrics(&self, max_scroll_extent: f64) -> TrackerMetrics {
        TrackerMetrics::new(self.tab_bar_height, max_scroll_extent)
            .with_bottom_snap_margin(self.bottom_snap_margin)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
