//! Configuration for the allocation engine

/// Number of solver passes before giving up on unresolved elements
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Configuration options for an allocation pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Upper bound on fixed-point passes over the working list
    pub max_iterations: usize,

    /// Place the corner decorations when the bar is on the top edge
    pub place_corners: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            place_corners: true,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pass cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable corner placement
    pub fn with_corners(mut self, place_corners: bool) -> Self {
        self.place_corners = place_corners;
        self
    }
}
