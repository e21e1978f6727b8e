//! Top-level error type for the panel layout pipeline

use thiserror::Error;

use crate::layout::LayoutError;
use crate::settings::SettingsError;

/// Errors that can occur between loading a scenario and producing a report
#[derive(Debug, Error)]
pub enum PanelError {
    /// The scenario could not be loaded
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// The scenario loaded but cannot be laid out
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_wraps() {
        let err: PanelError = LayoutError::monitor_not_found(2, 1).into();
        assert_eq!(
            err.to_string(),
            "layout error: monitor 2 not found (1 monitors available)"
        );
    }

    #[test]
    fn test_settings_error_wraps() {
        let err: PanelError = SettingsError::InvalidHost("no monitors".to_string()).into();
        assert!(err.to_string().starts_with("settings error: "));
    }
}
