//! Static host for running allocation passes offline
//!
//! A scenario file combines the panel settings with a `[host]` table that
//! stands in for the windowing system: monitors, theme padding, scale factor
//! and the natural sizes of every panel element.
//!
//! ```toml
//! [panel]
//! position = "TOP"
//!
//! [host]
//! corner_size = 6
//!
//! [[host.monitors]]
//! width = 1920
//! height = 1080
//!
//! [host.elements.taskbar]
//! width = 900
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::PanelError;
use crate::layout::{
    ActorBox, AllocationFlags, AllocationOutcome, ElementHandle, ElementId, ElementRegistry,
    GeometryInput, LayoutConfig, LayoutError, Monitor, PanelAllocator, PanelGeometry, SizeQuery,
    ThemePadding,
};
use crate::settings::{Settings, SettingsError};

/// Border drawn on the bar-facing side of the show-desktop button
pub const DESKTOP_BUTTON_BORDER: f64 = 1.0;

/// A host element with fixed natural sizes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticElement {
    pub width: f64,
    pub height: f64,
    /// Rect received in the last pass, if any
    pub last_rect: Option<ActorBox>,
    pub last_flags: AllocationFlags,
}

impl StaticElement {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Same natural size on both axes
    pub fn square(size: f64) -> Self {
        Self::new(size, size)
    }
}

impl ElementHandle for StaticElement {
    fn preferred_size(&self, query: SizeQuery) -> f64 {
        match query {
            SizeQuery::PreferredWidth => self.width,
            SizeQuery::PreferredHeight => self.height,
        }
    }

    fn allocate(&mut self, rect: &ActorBox, flags: AllocationFlags) {
        self.last_rect = Some(*rect);
        self.last_flags = flags;
    }
}

/// One monitor of the simulated host
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HostMonitor {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub primary: bool,
}

/// Natural size description of one element
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    /// Shorthand for equal width and height
    pub size: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub container: bool,
    /// `false` models an element the host does not provide
    pub present: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostDescription {
    pub scale_factor: f64,
    pub legacy_top_panel_height: f64,
    pub corner_size: f64,
    pub theme: ThemePadding,
    pub monitors: Vec<HostMonitor>,
    pub elements: BTreeMap<String, ElementSpec>,
}

impl Default for HostDescription {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            legacy_top_panel_height: 0.0,
            corner_size: 0.0,
            theme: ThemePadding::default(),
            monitors: vec![HostMonitor {
                x: 0.0,
                y: 0.0,
                width: 1920.0,
                height: 1080.0,
                primary: true,
            }],
            elements: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
struct TomlScenario {
    #[serde(default)]
    host: HostDescription,
}

/// Settings plus a host description
#[derive(Debug, Clone)]
pub struct Scenario {
    pub settings: Settings,
    pub host: HostDescription,
    elements: BTreeMap<ElementId, ElementSpec>,
}

impl Scenario {
    pub fn new(settings: Settings, host: HostDescription) -> Result<Self, SettingsError> {
        if host.scale_factor.is_nan() || host.scale_factor <= 0.0 {
            return Err(SettingsError::InvalidHost(format!(
                "scale_factor must be positive, got {}",
                host.scale_factor
            )));
        }
        if host.monitors.is_empty() {
            return Err(SettingsError::InvalidHost(
                "at least one monitor is required".to_string(),
            ));
        }

        let mut elements = BTreeMap::new();
        for (name, spec) in &host.elements {
            let id = name
                .parse::<ElementId>()
                .map_err(|e| SettingsError::InvalidHost(e.to_string()))?;
            elements.insert(id, *spec);
        }

        Ok(Self {
            settings,
            host,
            elements,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let settings = Settings::from_str(content)?;
        let parsed: TomlScenario = toml::from_str(content)?;
        Self::new(settings, parsed.host)
    }

    /// Index of the primary monitor (the first one when none is flagged)
    pub fn primary_monitor(&self) -> usize {
        self.host
            .monitors
            .iter()
            .position(|m| m.primary)
            .unwrap_or(0)
    }

    pub fn monitor_count(&self) -> usize {
        self.host.monitors.len()
    }

    /// Geometry of the bar on `monitor`
    pub fn geometry(&self, monitor: usize) -> Result<PanelGeometry, LayoutError> {
        let host_monitor = self
            .host
            .monitors
            .get(monitor)
            .ok_or_else(|| LayoutError::monitor_not_found(monitor, self.host.monitors.len()))?;

        if !is_positive(host_monitor.width) || !is_positive(host_monitor.height) {
            return Err(LayoutError::invalid_geometry(format!(
                "monitor {} has an empty rectangle",
                monitor
            )));
        }
        if !is_positive(self.settings.panel.size) {
            return Err(LayoutError::invalid_geometry(format!(
                "panel size must be positive, got {}",
                self.settings.panel.size
            )));
        }

        let input = GeometryInput::new(Monitor::new(
            host_monitor.x,
            host_monitor.y,
            host_monitor.width,
            host_monitor.height,
        ))
        .with_scale_factor(self.host.scale_factor)
        .with_theme_padding(self.host.theme)
        .with_legacy_top_panel_height(self.host.legacy_top_panel_height)
        .with_primary(monitor == self.primary_monitor());

        Ok(PanelGeometry::compute(&self.settings.panel, &input))
    }

    /// Build a registry with every described element
    pub fn registry(&self) -> ElementRegistry<StaticElement> {
        let mut registry = ElementRegistry::new();

        for id in ElementId::ALL {
            let spec = self.elements.get(&id).copied().unwrap_or_default();
            if spec.present == Some(false) {
                registry.register_absent(id);
                continue;
            }

            let handle = self.element_handle(id, &spec);
            if spec.container {
                registry.register_container(id, handle);
            } else {
                registry.register(id, handle);
            }
        }

        if self.host.corner_size > 0.0 {
            registry.set_corners(
                StaticElement::square(self.host.corner_size),
                StaticElement::square(self.host.corner_size),
            );
        }

        registry
    }

    fn element_handle(&self, id: ElementId, spec: &ElementSpec) -> StaticElement {
        // The show-desktop button is sized by its setting plus its border
        // unless described
        let fallback = if id == ElementId::DesktopButton {
            self.settings.panel.showdesktop_button_width + DESKTOP_BUTTON_BORDER
        } else {
            0.0
        };
        let width = spec.width.or(spec.size).unwrap_or(fallback);
        let height = spec.height.or(spec.size).unwrap_or(fallback);
        StaticElement::new(width, height)
    }

    /// Compute geometry and run one allocation pass for `monitor`
    pub fn run(&self, monitor: usize, config: &LayoutConfig) -> Result<PanelReport, PanelError> {
        let geometry = self.geometry(monitor)?;
        let frame = geometry.frame();
        let plan = self.settings.plan_for(monitor);
        let mut registry = self.registry();
        let mut allocator = PanelAllocator::new(config.clone());

        let outcome = allocator.allocate(&frame, plan, &mut registry);
        let clip = geometry.clip(allocator.corner_size());

        tracing::info!(
            monitor,
            position = %geometry.position,
            placed = outcome.placements.len(),
            converged = outcome.converged,
            "allocated panel"
        );

        Ok(PanelReport {
            monitor,
            geometry,
            outcome,
            clip,
        })
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Everything one offline pass produced
#[derive(Debug, Clone, PartialEq)]
pub struct PanelReport {
    pub monitor: usize,
    pub geometry: PanelGeometry,
    pub outcome: AllocationOutcome,
    /// Clip region of the bar container, including the corners
    pub clip: ActorBox,
}

impl fmt::Display for PanelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let geom = &self.geometry;
        let axis = geom.frame().adapter.variable;
        let stage = geom.stage_rect();

        writeln!(
            f,
            "monitor {}: {} bar at ({}, {}) size {}x{}",
            self.monitor,
            geom.position,
            stage.x1,
            stage.y1,
            stage.width(),
            stage.height()
        )?;
        writeln!(
            f,
            "passes: {} ({})",
            self.outcome.iterations,
            if self.outcome.converged {
                "converged"
            } else {
                "incomplete"
            }
        )?;
        writeln!(
            f,
            "{:<18}{:<19}{:>8}{:>8}{:>8}  resolved",
            "element", "intent", "start", "end", "size"
        )?;

        for placement in &self.outcome.placements {
            let (start, end) = placement.interval(axis);
            let intent = format!("{:?}", placement.intent);
            writeln!(
                f,
                "{:<18}{:<19}{:>8}{:>8}{:>8}  {}",
                placement.id.as_str(),
                intent,
                start,
                end,
                placement.size,
                if placement.resolved { "yes" } else { "no" }
            )?;
        }

        if let Some(corners) = &self.outcome.corners {
            writeln!(f, "corners: {}", corners.size)?;
        }

        Ok(())
    }
}
