//! Layout engine for placing panel elements along the bar
//!
//! This module computes the bar's geometry on its monitor and then assigns
//! each element of a position plan its rect within the bar.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod plan;
pub mod registry;
pub mod types;

pub use config::{LayoutConfig, DEFAULT_MAX_ITERATIONS};
pub use engine::{
    allocate, AllocationOutcome, BarFrame, CornerLayout, PanelAllocator, Placement,
};
pub use error::LayoutError;
pub use geometry::{GeometryInput, Monitor, PanelGeometry, PanelSettings, ThemePadding};
pub use orientation::{OrientationAdapter, SizeQuery};
pub use plan::{MonitorPlans, PlanEntry, PositionPlan};
pub use registry::{AllocationFlags, ElementHandle, ElementRegistry};
pub use types::*;
