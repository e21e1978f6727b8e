//! Bar geometry: where the bar sits on its monitor and how big it is

use serde::{Deserialize, Serialize};

use super::engine::BarFrame;
use super::types::{ActorBox, Edge};

/// Horizontal padding on each side of an ungrouped app icon label
pub const APP_ICON_PADDING: f64 = 4.0;

/// A monitor rectangle in stage coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Monitor {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Theme padding around the bar's content box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ThemePadding {
    /// Left + right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Top + bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// User-facing bar settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Edge the bar is mounted on
    #[serde(deserialize_with = "deserialize_edge")]
    pub position: Edge,
    /// Bar thickness in logical pixels
    pub size: f64,
    /// Whether app icons are grouped (no window titles)
    pub group_apps: bool,
    /// Widest window title shown by ungrouped app icons
    pub group_apps_label_max_width: f64,
    /// Keep the stock top bar on the primary monitor
    pub keep_legacy_top_panel: bool,
    /// Extent of the show-desktop button along the bar
    pub showdesktop_button_width: f64,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            position: Edge::Bottom,
            size: 48.0,
            group_apps: true,
            group_apps_label_max_width: 160.0,
            keep_legacy_top_panel: false,
            showdesktop_button_width: 8.0,
        }
    }
}

impl PanelSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Edge) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_group_apps(mut self, group_apps: bool) -> Self {
        self.group_apps = group_apps;
        self
    }

    pub fn with_label_max_width(mut self, width: f64) -> Self {
        self.group_apps_label_max_width = width;
        self
    }

    pub fn with_legacy_top_panel(mut self, keep: bool) -> Self {
        self.keep_legacy_top_panel = keep;
        self
    }
}

fn deserialize_edge<'de, D>(deserializer: D) -> Result<Edge, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(Edge::from_setting(&value))
}

/// Host state the geometry depends on besides the settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryInput {
    pub monitor: Monitor,
    pub scale_factor: f64,
    pub theme_padding: ThemePadding,
    /// Height of the legacy top bar's box, when one is kept
    pub legacy_top_panel_height: f64,
    pub is_primary: bool,
}

impl GeometryInput {
    pub fn new(monitor: Monitor) -> Self {
        Self {
            monitor,
            scale_factor: 1.0,
            theme_padding: ThemePadding::default(),
            legacy_top_panel_height: 0.0,
            is_primary: true,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_theme_padding(mut self, padding: ThemePadding) -> Self {
        self.theme_padding = padding;
        self
    }

    pub fn with_legacy_top_panel_height(mut self, height: f64) -> Self {
        self.legacy_top_panel_height = height;
        self
    }

    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }
}

/// The bar rectangle on its monitor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub lr_padding: f64,
    pub tb_padding: f64,
    pub position: Edge,
    /// Resolved thickness in device pixels
    pub thickness: f64,
}

impl PanelGeometry {
    pub fn compute(settings: &PanelSettings, input: &GeometryInput) -> Self {
        let monitor = input.monitor;
        let scale = input.scale_factor;
        let padding = input.theme_padding;
        let lr_padding = padding.horizontal();
        let tb_padding = padding.vertical();
        let position = settings.position;

        let mut size = settings.size * scale;

        let legacy_offset = if settings.keep_legacy_top_panel && input.is_primary {
            input.legacy_top_panel_height - padding.top
        } else {
            0.0
        };

        let (w, h) = if position.is_vertical() {
            if !settings.group_apps {
                size += settings.group_apps_label_max_width + APP_ICON_PADDING * 2.0 / scale;
            }
            (size, monitor.height - tb_padding - legacy_offset)
        } else {
            (monitor.width - lr_padding, size)
        };

        let (x, y) = match position {
            Edge::Top | Edge::Left => (monitor.x, monitor.y + legacy_offset),
            Edge::Right => (
                monitor.x + monitor.width - size - lr_padding,
                monitor.y + legacy_offset,
            ),
            Edge::Bottom => (monitor.x, monitor.y + monitor.height - size - tb_padding),
        };

        tracing::debug!(%position, x, y, w, h, "computed panel geometry");

        Self {
            x,
            y,
            w,
            h,
            lr_padding,
            tb_padding,
            position,
            thickness: size,
        }
    }

    /// Bar-local frame handed to the allocation engine
    pub fn frame(&self) -> BarFrame {
        BarFrame::new(ActorBox::from_size(0.0, 0.0, self.w, self.h), self.position)
    }

    /// Stage rect of the bar content
    pub fn stage_rect(&self) -> ActorBox {
        ActorBox::from_size(self.x, self.y, self.w, self.h)
    }

    /// Clip region for the bar's container, extended downwards by the corners
    pub fn clip(&self, corner_size: f64) -> ActorBox {
        ActorBox::from_size(
            self.x,
            self.y,
            self.w + self.lr_padding,
            self.h + self.tb_padding + corner_size,
        )
    }

    /// Size of the placeholder that reserves the bar's space in the overview
    pub fn ghost_size(&self) -> (f64, f64) {
        if self.position.is_vertical() {
            (self.w, 1.0)
        } else {
            (self.w, self.h)
        }
    }
}
