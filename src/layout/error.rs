//! Error types for the layout engine
//!
//! The allocation pass itself never fails; these errors come from validating
//! plans and geometry inputs before a pass is run.

use thiserror::Error;

use super::types::ElementId;

/// Errors that can occur while preparing a layout
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The same element appears twice in a position plan
    #[error("element '{element}' appears more than once in the position plan")]
    DuplicateElement { element: ElementId },

    /// An element name that is not one of the known panel elements
    #[error("unknown panel element '{name}'")]
    UnknownElement { name: String },

    /// A monitor index that the host does not know about
    #[error("monitor {index} not found ({available} monitors available)")]
    MonitorNotFound { index: usize, available: usize },

    /// Geometry input that cannot produce a bar
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
}

impl LayoutError {
    pub fn duplicate(element: ElementId) -> Self {
        Self::DuplicateElement { element }
    }

    pub fn unknown_element(name: impl Into<String>) -> Self {
        Self::UnknownElement { name: name.into() }
    }

    pub fn monitor_not_found(index: usize, available: usize) -> Self {
        Self::MonitorNotFound { index, available }
    }

    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}
