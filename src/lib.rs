//! Panel Layout - allocation engine for a desktop panel bar
//!
//! This library computes where a thin bar sits on a monitor and assigns each
//! of its elements (buttons, taskbar, clock, status menus) an interval along
//! the bar, honoring a per-monitor position plan.
//!
//! # Example
//!
//! ```rust
//! use panel_layout::layout_scenario;
//!
//! let report = layout_scenario("[host.elements.taskbar]\nwidth = 400\n", None).unwrap();
//! assert!(report.outcome.converged);
//! ```

pub mod error;
pub mod host;
pub mod layout;
pub mod renderer;
pub mod settings;

pub use error::PanelError;
pub use host::{PanelReport, Scenario, StaticElement};
pub use layout::{LayoutConfig, LayoutError, PanelAllocator};
pub use renderer::{render_svg, SvgConfig};
pub use settings::{Settings, SettingsError};

/// Configuration for the complete pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Monitor to lay out; the primary monitor when unset
    pub monitor: Option<usize>,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Select the monitor to lay out
    pub fn with_monitor(mut self, monitor: usize) -> Self {
        self.monitor = Some(monitor);
        self
    }
}

/// Load a scenario from TOML and lay out one monitor's bar with default
/// configuration
///
/// # Example
///
/// ```rust
/// use panel_layout::layout::ElementId;
/// use panel_layout::layout_scenario;
///
/// let report = layout_scenario(r#"
/// [[host.monitors]]
/// width = 1000
/// height = 600
///
/// [host.elements.showAppsButton]
/// size = 48
/// "#, None).unwrap();
///
/// let rect = report.outcome.rect(ElementId::ShowAppsButton).unwrap();
/// assert_eq!((rect.x1, rect.x2), (0.0, 48.0));
/// ```
pub fn layout_scenario(source: &str, monitor: Option<usize>) -> Result<PanelReport, PanelError> {
    let mut config = RenderConfig::new();
    config.monitor = monitor;
    layout_with_config(source, &config)
}

/// Load a scenario from TOML and lay out one monitor's bar
pub fn layout_with_config(source: &str, config: &RenderConfig) -> Result<PanelReport, PanelError> {
    let scenario = Scenario::from_str(source)?;
    let monitor = config.monitor.unwrap_or_else(|| scenario.primary_monitor());
    scenario.run(monitor, &config.layout)
}

/// Lay out a scenario and render the bar as SVG
///
/// # Example
///
/// ```rust
/// use panel_layout::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new().with_svg(SvgConfig::default().with_viewbox_padding(0.0));
/// let svg = render_with_config("[host.elements.dateMenu]\nwidth = 80\n", &config).unwrap();
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("dateMenu"));
/// ```
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<String, PanelError> {
    let report = layout_with_config(source, config)?;
    Ok(render_svg(&report, &config.svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ElementId;

    #[test]
    fn test_layout_empty_scenario() {
        // only the show-desktop button has a size by default
        let report = layout_scenario("", None).unwrap();
        assert_eq!(report.outcome.placements.len(), 1);
        let rect = report.outcome.rect(ElementId::DesktopButton).unwrap();
        // 8px wide plus a 1px border
        assert_eq!((rect.x1, rect.x2), (1911.0, 1920.0));
        assert_eq!((rect.y1, rect.y2), (0.0, 48.0));
    }

    #[test]
    fn test_missing_monitor_is_layout_error() {
        let err = layout_scenario("", Some(3)).unwrap_err();
        assert!(matches!(err, PanelError::Layout(LayoutError::MonitorNotFound { .. })));
    }

    #[test]
    fn test_invalid_toml_is_settings_error() {
        let err = layout_scenario("not toml {{", None).unwrap_err();
        assert!(matches!(err, PanelError::Settings(_)));
    }

    #[test]
    fn test_render_uses_selected_monitor() {
        let source = r#"
[[host.monitors]]
width = 800
height = 600

[[host.monitors]]
x = 800
width = 640
height = 480
primary = true
"#;
        let report = layout_scenario(source, None).unwrap();
        assert_eq!(report.monitor, 1);
        assert_eq!(report.geometry.w, 640.0);

        let config = RenderConfig::new().with_monitor(0);
        let svg = render_with_config(source, &config).unwrap();
        assert!(svg.contains(r#"width="800" height="48""#));
    }
}
