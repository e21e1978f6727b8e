//! Position plans: the desired order and visibility of panel elements

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::types::{ElementId, PlacementIntent};

/// One element's requested placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub element: ElementId,
    pub position: PlacementIntent,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl PlanEntry {
    pub fn new(element: ElementId, position: PlacementIntent, visible: bool) -> Self {
        Self {
            element,
            position,
            visible,
        }
    }
}

/// Ordered plan for one monitor's bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionPlan {
    entries: Vec<PlanEntry>,
}

impl PositionPlan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, element: ElementId) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.element == element)
    }

    /// Whether the plan shows `element`
    pub fn is_visible(&self, element: ElementId) -> bool {
        self.entry(element).is_some_and(|e| e.visible)
    }

    /// Reject plans that name an element more than once
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.element) {
                return Err(LayoutError::duplicate(entry.element));
            }
        }
        Ok(())
    }
}

impl Default for PositionPlan {
    fn default() -> Self {
        use ElementId::*;
        use PlacementIntent::*;

        Self::new(vec![
            PlanEntry::new(ShowAppsButton, StartAnchored, true),
            PlanEntry::new(ActivitiesButton, StartAnchored, false),
            PlanEntry::new(LeftBox, StartAnchored, true),
            PlanEntry::new(Taskbar, StartAnchored, true),
            PlanEntry::new(CenterBox, EndAnchored, true),
            PlanEntry::new(RightBox, EndAnchored, true),
            PlanEntry::new(DateMenu, EndAnchored, true),
            PlanEntry::new(SystemMenu, EndAnchored, true),
            PlanEntry::new(DesktopButton, EndAnchored, true),
        ])
    }
}

impl FromIterator<PlanEntry> for PositionPlan {
    fn from_iter<T: IntoIterator<Item = PlanEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Plans for every monitor, keyed by monitor index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorPlans {
    plans: BTreeMap<usize, PositionPlan>,
    fallback: PositionPlan,
}

impl MonitorPlans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, monitor: usize, plan: PositionPlan) -> Result<(), LayoutError> {
        plan.validate()?;
        self.plans.insert(monitor, plan);
        Ok(())
    }

    /// The plan for `monitor`, or the stock plan when none was configured
    pub fn plan_for(&self, monitor: usize) -> &PositionPlan {
        self.plans.get(&monitor).unwrap_or(&self.fallback)
    }

    pub fn configured_monitors(&self) -> impl Iterator<Item = usize> + '_ {
        self.plans.keys().copied()
    }
}
