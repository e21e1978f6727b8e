//! Core types for the panel layout engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LayoutError;

/// One of the two geometry axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// A rectangle expressed by its two corners, matching the host's allocation box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ActorBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a box at `(x, y)` with the given size
    pub fn from_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// The `(c1, c2)` coordinate pair along `axis`
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.x1, self.x2),
            Axis::Y => (self.y1, self.y2),
        }
    }

    pub fn set_span(&mut self, axis: Axis, c1: f64, c2: f64) {
        match axis {
            Axis::X => {
                self.x1 = c1;
                self.x2 = c2;
            }
            Axis::Y => {
                self.y1 = c1;
                self.y2 = c2;
            }
        }
    }

    /// Length of the box along `axis`
    pub fn extent(&self, axis: Axis) -> f64 {
        let (c1, c2) = self.span(axis);
        c2 - c1
    }

    /// Leading coordinate along `axis`
    pub fn start(&self, axis: Axis) -> f64 {
        self.span(axis).0
    }

    /// Trailing coordinate along `axis`
    pub fn end(&self, axis: Axis) -> f64 {
        self.span(axis).1
    }
}

/// Screen edge the bar is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Edge {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl Edge {
    /// Parse the stored edge setting.
    ///
    /// Anything that is not `TOP`, `RIGHT` or `BOTTOM` means `LEFT`.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "TOP" => Edge::Top,
            "RIGHT" => Edge::Right,
            "BOTTOM" => Edge::Bottom,
            _ => Edge::Left,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Edge::Left | Edge::Right => Orientation::Vertical,
            Edge::Top | Edge::Bottom => Orientation::Horizontal,
        }
    }

    pub fn is_vertical(self) -> bool {
        self.orientation() == Orientation::Vertical
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Top => "TOP",
            Edge::Right => "RIGHT",
            Edge::Bottom => "BOTTOM",
            Edge::Left => "LEFT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Logical identifiers of the placeable panel elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementId {
    ShowAppsButton,
    ActivitiesButton,
    LeftBox,
    Taskbar,
    CenterBox,
    DateMenu,
    SystemMenu,
    RightBox,
    DesktopButton,
}

impl ElementId {
    pub const ALL: [ElementId; 9] = [
        ElementId::ShowAppsButton,
        ElementId::ActivitiesButton,
        ElementId::LeftBox,
        ElementId::Taskbar,
        ElementId::CenterBox,
        ElementId::DateMenu,
        ElementId::SystemMenu,
        ElementId::RightBox,
        ElementId::DesktopButton,
    ];

    /// Only the taskbar may shrink below its natural size
    pub fn is_elastic(self) -> bool {
        self == ElementId::Taskbar
    }

    /// Name used in settings files
    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::ShowAppsButton => "showAppsButton",
            ElementId::ActivitiesButton => "activitiesButton",
            ElementId::LeftBox => "leftBox",
            ElementId::Taskbar => "taskbar",
            ElementId::CenterBox => "centerBox",
            ElementId::DateMenu => "dateMenu",
            ElementId::SystemMenu => "systemMenu",
            ElementId::RightBox => "rightBox",
            ElementId::DesktopButton => "desktopButton",
        }
    }
}

impl FromStr for ElementId {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LayoutError::unknown_element(s))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an element wants to sit along the variable axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementIntent {
    /// Stacked from the leading (top/left) end
    #[serde(rename = "stackedTL")]
    StartAnchored,
    /// Stacked from the trailing (bottom/right) end
    #[serde(rename = "stackedBR")]
    EndAnchored,
    /// Centered in the space left between its fixed neighbours
    #[serde(rename = "centered")]
    CenteredOnBar,
    /// Centered on the whole bar length, ignoring siblings
    #[serde(rename = "centerMonitor")]
    CenteredOnMonitor,
}

impl PlacementIntent {
    pub fn is_centered(self) -> bool {
        matches!(
            self,
            PlacementIntent::CenteredOnBar | PlacementIntent::CenteredOnMonitor
        )
    }
}
