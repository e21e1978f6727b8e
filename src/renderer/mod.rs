//! SVG renderer for allocation reports
//!
//! Draws the bar, every placed element and the corner decorations in
//! bar-local coordinates. Unresolved elements get their own CSS class.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::render_svg;
