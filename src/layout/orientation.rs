//! Axis selection for horizontal and vertical bars
//!
//! The allocation engine only ever talks about a "variable" axis (where
//! elements are ordered) and a "fixed" axis (the bar thickness). This adapter
//! maps those onto concrete coordinates for the current orientation.

use super::types::{ActorBox, Axis, Edge, Orientation};

/// Which natural-size query to ask an element for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeQuery {
    PreferredWidth,
    PreferredHeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationAdapter {
    pub orientation: Orientation,
    /// Main axis, along which elements are placed
    pub variable: Axis,
    /// Cross axis, spanned fully by every element
    pub fixed: Axis,
    pub size_query: SizeQuery,
}

impl OrientationAdapter {
    pub fn for_orientation(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self {
                orientation,
                variable: Axis::X,
                fixed: Axis::Y,
                size_query: SizeQuery::PreferredWidth,
            },
            Orientation::Vertical => Self {
                orientation,
                variable: Axis::Y,
                fixed: Axis::X,
                size_query: SizeQuery::PreferredHeight,
            },
        }
    }

    pub fn for_edge(edge: Edge) -> Self {
        Self::for_orientation(edge.orientation())
    }

    /// Length of `bounds` along the variable axis
    pub fn variable_length(&self, bounds: &ActorBox) -> f64 {
        bounds.extent(self.variable)
    }

    /// Thickness of `bounds` along the fixed axis
    pub fn fixed_length(&self, bounds: &ActorBox) -> f64 {
        bounds.extent(self.fixed)
    }
}
