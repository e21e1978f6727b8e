//! Panel settings loaded from TOML
//!
//! Holds the bar settings and the per-monitor position plans. Monitors
//! without a `[[plan]]` table use the stock plan.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::{LayoutError, MonitorPlans, PanelSettings, PositionPlan};

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid position plan for monitor {monitor}: {source}")]
    InvalidPlan {
        monitor: usize,
        #[source]
        source: LayoutError,
    },
    #[error("Invalid host description: {0}")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub panel: PanelSettings,
    pub plans: MonitorPlans,
}

#[derive(Deserialize)]
struct TomlSettings {
    #[serde(default)]
    panel: PanelSettings,
    #[serde(default)]
    plan: Vec<TomlPlan>,
}

#[derive(Deserialize)]
struct TomlPlan {
    monitor: usize,
    elements: PositionPlan,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;

        let mut plans = MonitorPlans::new();
        for plan in parsed.plan {
            plans
                .insert(plan.monitor, plan.elements)
                .map_err(|source| SettingsError::InvalidPlan {
                    monitor: plan.monitor,
                    source,
                })?;
        }

        tracing::debug!(
            position = %parsed.panel.position,
            monitors = ?plans.configured_monitors().collect::<Vec<_>>(),
            "loaded panel settings"
        );

        Ok(Settings {
            panel: parsed.panel,
            plans,
        })
    }

    /// The plan used for `monitor`
    pub fn plan_for(&self, monitor: usize) -> &PositionPlan {
        self.plans.plan_for(monitor)
    }
}
