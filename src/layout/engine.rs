//! Panel allocation engine
//!
//! Assigns every visible element of a position plan a non-overlapping interval
//! along the bar's variable axis. Elements span the full bar thickness on the
//! fixed axis.
//!
//! ## Pass structure
//!
//! 1. **Working list**: walk the plan in order, keep visible elements with a
//!    handle and a positive natural size, and tag the taskbar as elastic.
//! 2. **Monitor centering**: the first contiguous run of `CenteredOnMonitor`
//!    elements is centered on the whole bar length before anything else.
//! 3. **Fixed-point solve**: repeatedly scan the list. Start-anchored elements
//!    wait for their predecessor, end-anchored ones for their successor, and
//!    centered runs for the nearest fixed neighbours on both sides. The scan
//!    stops when every element is fixed or after `max_iterations` passes.
//! 4. **Corners**: on a top bar the two corner decorations are placed just
//!    below the bar at both ends of the variable axis.
//!
//! A plan that cannot be resolved within the pass cap is not an error: the
//! unresolved elements keep the rect they had after the previous pass.

use std::collections::HashSet;

use super::config::LayoutConfig;
use super::orientation::OrientationAdapter;
use super::plan::PositionPlan;
use super::registry::{AllocationFlags, ElementHandle, ElementRegistry};
use super::types::{ActorBox, Axis, Edge, ElementId, PlacementIntent};

/// The bar's own allocation box, in bar-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarFrame {
    pub bounds: ActorBox,
    pub edge: Edge,
    pub adapter: OrientationAdapter,
}

impl BarFrame {
    pub fn new(bounds: ActorBox, edge: Edge) -> Self {
        Self {
            bounds,
            edge,
            adapter: OrientationAdapter::for_edge(edge),
        }
    }

    /// Length of the variable axis
    pub fn length(&self) -> f64 {
        self.adapter.variable_length(&self.bounds).max(0.0)
    }
}

/// Final state of one element after a pass
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: ElementId,
    /// Intent the solver ended up using
    pub intent: PlacementIntent,
    /// Size reported by the element
    pub natural_size: f64,
    /// Size after elastic shrinking
    pub size: f64,
    pub rect: ActorBox,
    /// Whether this pass fixed the element
    pub resolved: bool,
}

impl Placement {
    /// Leading and trailing coordinate on the variable axis
    pub fn interval(&self, axis: Axis) -> (f64, f64) {
        self.rect.span(axis)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CornerLayout {
    pub left: ActorBox,
    pub right: ActorBox,
    pub size: f64,
    /// The corner size differs from the previous pass; the bar clip needs
    /// to be recomputed
    pub size_changed: bool,
}

/// Result of one allocation pass
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    /// Placements in working-list order
    pub placements: Vec<Placement>,
    /// Solver passes actually run
    pub iterations: usize,
    /// Every element was fixed
    pub converged: bool,
    pub corners: Option<CornerLayout>,
}

impl AllocationOutcome {
    pub fn placement(&self, id: ElementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn rect(&self, id: ElementId) -> Option<ActorBox> {
        self.placement(id).map(|p| p.rect)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| !p.resolved)
    }
}

/// Allocation engine for one bar.
///
/// The only state carried between passes is the corner size, used to detect
/// when the bar clip must be refreshed.
#[derive(Debug, Clone, Default)]
pub struct PanelAllocator {
    config: LayoutConfig,
    corner_size: f64,
}

impl PanelAllocator {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            corner_size: 0.0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Corner size measured during the last pass
    pub fn corner_size(&self) -> f64 {
        self.corner_size
    }

    /// Run one allocation pass and push the resolved rects to their handles
    pub fn allocate<H: ElementHandle>(
        &mut self,
        frame: &BarFrame,
        plan: &PositionPlan,
        registry: &mut ElementRegistry<H>,
    ) -> AllocationOutcome {
        let mut solver = Solver::build(frame, plan, registry);

        solver.center_on_monitor();
        let iterations = solver.solve(self.config.max_iterations);
        let converged = solver.all_fixed();

        if converged {
            tracing::debug!(
                iterations,
                elements = solver.elements.len(),
                "panel allocation converged"
            );
        } else {
            let unresolved: Vec<_> = solver
                .elements
                .iter()
                .filter(|e| !e.fixed)
                .map(|e| e.id.as_str())
                .collect();
            tracing::debug!(
                iterations,
                ?unresolved,
                "panel allocation stopped at the pass cap"
            );
        }

        let placements = solver.commit(registry);

        let corners = if self.config.place_corners && frame.edge == Edge::Top {
            self.place_corners(frame, registry)
        } else {
            None
        };

        AllocationOutcome {
            placements,
            iterations,
            converged,
            corners,
        }
    }

    fn place_corners<H: ElementHandle>(
        &mut self,
        frame: &BarFrame,
        registry: &mut ElementRegistry<H>,
    ) -> Option<CornerLayout> {
        let adapter = frame.adapter;
        let corners = registry.corners_mut()?;

        let previous = self.corner_size;
        let size = corners.left.preferred_size(adapter.size_query).max(0.0);
        self.corner_size = size;

        let length = frame.length();
        let thickness = adapter.fixed_length(&frame.bounds);

        let mut left = ActorBox::default();
        left.set_span(adapter.variable, 0.0, size);
        left.set_span(adapter.fixed, thickness, thickness + size);

        let mut right = ActorBox::default();
        right.set_span(adapter.variable, length - size, length);
        right.set_span(adapter.fixed, thickness, thickness + size);

        corners.left.allocate(&left, AllocationFlags::default());
        corners.right.allocate(&right, AllocationFlags::default());

        let size_changed = size != previous;
        if size_changed {
            tracing::debug!(previous, size, "corner size changed");
        }

        Some(CornerLayout {
            left,
            right,
            size,
            size_changed,
        })
    }
}

/// Run a pass with the default configuration.
///
/// Corner size changes cannot be tracked across calls; use a
/// [`PanelAllocator`] for that.
pub fn allocate<H: ElementHandle>(
    frame: &BarFrame,
    plan: &PositionPlan,
    registry: &mut ElementRegistry<H>,
) -> AllocationOutcome {
    PanelAllocator::default().allocate(frame, plan, registry)
}

/// Per-pass solver state for one element
#[derive(Debug, Clone)]
struct WorkingElement {
    id: ElementId,
    intent: PlacementIntent,
    original_size: f64,
    natural_size: f64,
    elastic: bool,
    is_container: bool,
    fixed: bool,
    rect: ActorBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

/// What lies between an element and its nearest fixed neighbour
#[derive(Debug, Clone, Copy)]
struct Siblings {
    /// Natural size of the unfixed elements in between
    unfixed: f64,
    /// Part of `unfixed` that belongs to the element's own centered run
    centered: f64,
    /// Facing edge of the fixed neighbour, or the bar boundary
    limit: f64,
}

struct Solver {
    elements: Vec<WorkingElement>,
    length: f64,
    axis: Axis,
    fixed_count: usize,
}

impl Solver {
    fn build<H: ElementHandle>(
        frame: &BarFrame,
        plan: &PositionPlan,
        registry: &ElementRegistry<H>,
    ) -> Self {
        let adapter = frame.adapter;
        let (cross_start, cross_end) = frame.bounds.span(adapter.fixed);
        let mut seen = HashSet::new();
        let mut elements = Vec::new();

        for entry in plan.iter() {
            if !entry.visible || !seen.insert(entry.element) {
                continue;
            }
            let Some(element) = registry.get(entry.element) else {
                continue;
            };
            let Some(handle) = element.handle.as_ref() else {
                continue;
            };

            let natural_size = handle.preferred_size(adapter.size_query);
            if !natural_size.is_finite() || natural_size <= 0.0 {
                tracing::trace!(element = %entry.element, natural_size, "skipping empty element");
                continue;
            }

            let mut rect = element.rect;
            rect.set_span(adapter.fixed, cross_start, cross_end);

            elements.push(WorkingElement {
                id: entry.element,
                intent: entry.position,
                original_size: natural_size,
                natural_size,
                elastic: entry.element.is_elastic(),
                is_container: element.is_container,
                fixed: false,
                rect,
            });
        }

        Self {
            elements,
            length: frame.length(),
            axis: adapter.variable,
            fixed_count: 0,
        }
    }

    fn all_fixed(&self) -> bool {
        self.fixed_count >= self.elements.len()
    }

    fn start(&self, index: usize) -> f64 {
        self.elements[index].rect.start(self.axis)
    }

    fn end(&self, index: usize) -> f64 {
        self.elements[index].rect.end(self.axis)
    }

    fn is_fixed(&self, index: usize) -> bool {
        self.elements[index].fixed
    }

    /// Center the first contiguous run of monitor-centered elements on the
    /// full bar length
    fn center_on_monitor(&mut self) {
        let Some(first) = self
            .elements
            .iter()
            .position(|e| e.intent == PlacementIntent::CenteredOnMonitor)
        else {
            return;
        };

        let run: Vec<usize> = (first..self.elements.len())
            .take_while(|&i| self.elements[i].intent == PlacementIntent::CenteredOnMonitor)
            .collect();

        self.place_centered(&run, 0.0, self.length);
    }

    /// Run passes until everything is fixed or the cap is hit
    fn solve(&mut self, max_iterations: usize) -> usize {
        let mut iterations = 0;
        while !self.all_fixed() && iterations < max_iterations {
            iterations += 1;
            self.pass();
        }
        iterations
    }

    fn pass(&mut self) {
        let count = self.elements.len();
        let mut i = 0;

        while i < count {
            if self.is_fixed(i) {
                i += 1;
                continue;
            }

            let prev = i.checked_sub(1);
            let next = (i + 1 < count).then_some(i + 1);

            // A start-anchored element after an end-anchored one joins the end group
            if self.elements[i].intent == PlacementIntent::StartAnchored
                && prev.is_some_and(|p| self.elements[p].intent == PlacementIntent::EndAnchored)
            {
                self.elements[i].intent = PlacementIntent::EndAnchored;
            }

            match self.elements[i].intent {
                PlacementIntent::StartAnchored => {
                    if prev.map_or(true, |p| self.is_fixed(p)) {
                        let start = prev.map_or(0.0, |p| self.end(p));
                        self.place(i, start);
                    }
                }
                PlacementIntent::EndAnchored => {
                    if next.map_or(true, |n| self.is_fixed(n)) {
                        let limit = next.map_or(self.length, |n| self.start(n));
                        let start = limit - self.elements[i].natural_size;
                        self.place(i, start);
                    }
                }
                PlacementIntent::CenteredOnBar | PlacementIntent::CenteredOnMonitor => {
                    i = self.try_center_run(i);
                }
            }

            i += 1;
        }
    }

    /// Place the contiguous centered run starting at `first` if both of its
    /// limits are known. Returns the index of the last element examined.
    fn try_center_run(&mut self, first: usize) -> usize {
        let count = self.elements.len();

        let mut prev = first.checked_sub(1);
        while let Some(p) = prev {
            if self.elements[p].intent != PlacementIntent::EndAnchored {
                break;
            }
            prev = p.checked_sub(1);
        }
        if prev.is_some_and(|p| !self.is_fixed(p)) {
            return first;
        }

        let mut last = first;
        while last + 1 < count
            && self.elements[last + 1].intent.is_centered()
            && !self.is_fixed(last + 1)
        {
            last += 1;
        }

        let mut next = last + 1;
        while next < count && self.elements[next].intent == PlacementIntent::StartAnchored {
            next += 1;
        }
        let next = (next < count).then_some(next);

        if next.map_or(true, |n| self.is_fixed(n)) {
            let start_limit = prev.map_or(0.0, |p| self.end(p));
            let end_limit = next.map_or(self.length, |n| self.start(n));
            let run: Vec<usize> = (first..=last).collect();
            self.place_centered(&run, start_limit, end_limit);
        }

        last
    }

    /// Center `run` as one block between the two limits
    fn place_centered(&mut self, run: &[usize], start_limit: f64, end_limit: f64) {
        if run.is_empty() {
            return;
        }

        for &index in run {
            if self.elements[index].elastic {
                self.adjust_elastic(index, false);
            }
        }

        let width: f64 = run.iter().map(|&i| self.elements[i].natural_size).sum();
        let offset = ((end_limit - start_limit - width) * 0.5).round().max(0.0);

        let mut cursor = start_limit + offset;
        for &index in run {
            self.place(index, cursor);
            cursor += self.elements[index].natural_size;
        }
    }

    /// Fix element `index` starting at `start`
    fn place(&mut self, index: usize, start: f64) {
        let length = self.length;
        let axis = self.axis;

        {
            let element = &mut self.elements[index];
            let c1 = start.clamp(0.0, length);
            let c2 = (c1 + element.natural_size).clamp(c1, length);
            element.rect.set_span(axis, c1, c2);
        }

        if self.elements[index].elastic {
            self.adjust_elastic(index, true);
        }

        let element = &mut self.elements[index];
        if !element.fixed {
            element.fixed = true;
            self.fixed_count += 1;
        }
    }

    /// Walk from `index` towards the nearest fixed neighbour in `direction`.
    ///
    /// Members of the element's own centered run are skipped even when fixed.
    fn siblings(&self, index: usize, direction: Direction) -> Siblings {
        let element = &self.elements[index];
        let centered = element.intent.is_centered();
        let mut unfixed = 0.0;
        let mut centered_size = 0.0;

        let step = |j: usize| match direction {
            Direction::Backward => j.checked_sub(1),
            Direction::Forward => (j + 1 < self.elements.len()).then_some(j + 1),
        };

        let mut cursor = step(index);
        while let Some(j) = cursor {
            let sibling = &self.elements[j];
            let same_run = centered && sibling.intent == element.intent;
            if sibling.fixed && !same_run {
                break;
            }
            if same_run {
                centered_size += sibling.natural_size;
            }
            unfixed += sibling.natural_size;
            cursor = step(j);
        }

        let limit = match (cursor, direction) {
            (Some(j), Direction::Backward) => self.end(j),
            (Some(j), Direction::Forward) => self.start(j),
            (None, Direction::Backward) => 0.0,
            (None, Direction::Forward) => self.length,
        };

        Siblings {
            unfixed,
            centered: centered_size,
            limit,
        }
    }

    /// Shrink the elastic element to the space its neighbours leave.
    ///
    /// Runs at most once per pass for a given element. With `adjust_rect` the
    /// already assigned interval is trimmed as well.
    fn adjust_elastic(&mut self, index: usize, adjust_rect: bool) {
        let before = self.siblings(index, Direction::Backward);
        let after = self.siblings(index, Direction::Forward);
        let axis = self.axis;
        let length = self.length;

        let element = &mut self.elements[index];
        let asymmetry = if element.intent.is_centered() {
            ((before.unfixed - before.centered) - (after.unfixed - after.centered)).abs()
        } else {
            0.0
        };
        let available =
            after.limit - before.limit - before.unfixed - after.unfixed - asymmetry;

        if available < element.natural_size {
            tracing::trace!(
                element = %element.id,
                natural = element.natural_size,
                available,
                "shrinking elastic element"
            );
            element.natural_size = available.max(0.0);

            if adjust_rect {
                let (c1, c2) = element.rect.span(axis);
                let start = c1.max(before.limit + before.unfixed).min(length);
                let end = c2.min(after.limit - after.unfixed).max(start);
                element.rect.set_span(axis, start, end);
            }
        }

        element.elastic = false;
    }

    /// Write rects back to the registry and hand resolved ones to the host
    fn commit<H: ElementHandle>(self, registry: &mut ElementRegistry<H>) -> Vec<Placement> {
        let mut placements = Vec::with_capacity(self.elements.len());

        for element in self.elements {
            if let Some(entry) = registry.get_mut(element.id) {
                entry.rect = element.rect;
                if element.fixed {
                    if let Some(handle) = entry.handle.as_mut() {
                        let flags = AllocationFlags {
                            container: element.is_container,
                        };
                        handle.allocate(&element.rect, flags);
                    }
                }
            }

            placements.push(Placement {
                id: element.id,
                intent: element.intent,
                natural_size: element.original_size,
                size: element.natural_size,
                rect: element.rect,
                resolved: element.fixed,
            });
        }

        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::orientation::SizeQuery;
    use crate::layout::plan::PlanEntry;
    use pretty_assertions::assert_eq;

    use ElementId::*;
    use PlacementIntent::*;

    #[derive(Debug, Clone, Default)]
    struct Probe {
        width: f64,
        height: f64,
        allocated: Vec<(ActorBox, AllocationFlags)>,
    }

    impl Probe {
        fn sized(size: f64) -> Self {
            Self {
                width: size,
                height: size,
                allocated: Vec::new(),
            }
        }
    }

    impl ElementHandle for Probe {
        fn preferred_size(&self, query: SizeQuery) -> f64 {
            match query {
                SizeQuery::PreferredWidth => self.width,
                SizeQuery::PreferredHeight => self.height,
            }
        }

        fn allocate(&mut self, rect: &ActorBox, flags: AllocationFlags) {
            self.allocated.push((*rect, flags));
        }
    }

    fn frame(length: f64) -> BarFrame {
        BarFrame::new(ActorBox::new(0.0, 0.0, length, 48.0), Edge::Bottom)
    }

    fn setup(items: &[(ElementId, PlacementIntent, f64)]) -> (PositionPlan, ElementRegistry<Probe>) {
        let mut registry = ElementRegistry::new();
        let plan = items
            .iter()
            .map(|&(id, intent, size)| {
                registry.register(id, Probe::sized(size));
                PlanEntry::new(id, intent, true)
            })
            .collect();
        (plan, registry)
    }

    fn span(outcome: &AllocationOutcome, id: ElementId) -> (f64, f64) {
        outcome.rect(id).unwrap().span(Axis::X)
    }

    #[test]
    fn test_start_and_end_stacks() {
        let (plan, mut registry) = setup(&[
            (ShowAppsButton, StartAnchored, 40.0),
            (LeftBox, StartAnchored, 60.0),
            (DateMenu, EndAnchored, 80.0),
            (SystemMenu, EndAnchored, 50.0),
        ]);
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);

        assert!(outcome.converged);
        assert_eq!(span(&outcome, ShowAppsButton), (0.0, 40.0));
        assert_eq!(span(&outcome, LeftBox), (40.0, 100.0));
        assert_eq!(span(&outcome, DateMenu), (870.0, 950.0));
        assert_eq!(span(&outcome, SystemMenu), (950.0, 1000.0));
    }

    #[test]
    fn test_end_stack_resolves_one_element_per_pass() {
        let (plan, mut registry) = setup(&[
            (DateMenu, EndAnchored, 10.0),
            (SystemMenu, EndAnchored, 10.0),
            (DesktopButton, EndAnchored, 10.0),
        ]);
        let outcome = allocate(&frame(100.0), &plan, &mut registry);
        assert_eq!(outcome.iterations, 3);
        assert_eq!(span(&outcome, DateMenu), (70.0, 80.0));
    }

    #[test]
    fn test_start_after_end_joins_end_group() {
        let (plan, mut registry) = setup(&[
            (DateMenu, EndAnchored, 30.0),
            (LeftBox, StartAnchored, 20.0),
        ]);
        let outcome = allocate(&frame(200.0), &plan, &mut registry);

        assert_eq!(outcome.placement(LeftBox).unwrap().intent, EndAnchored);
        assert_eq!(span(&outcome, LeftBox), (180.0, 200.0));
        assert_eq!(span(&outcome, DateMenu), (150.0, 180.0));
    }

    #[test]
    fn test_centered_between_fixed_neighbours() {
        let (plan, mut registry) = setup(&[
            (LeftBox, StartAnchored, 100.0),
            (DateMenu, CenteredOnBar, 50.0),
            (RightBox, EndAnchored, 150.0),
        ]);
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);

        // gap [100, 850), offset round((750 - 50) / 2) = 350
        assert_eq!(span(&outcome, DateMenu), (450.0, 500.0));
        assert_eq!(outcome.iterations, 2);
    }

    #[test]
    fn test_centered_offset_rounds() {
        let (plan, mut registry) = setup(&[
            (LeftBox, StartAnchored, 10.0),
            (DateMenu, CenteredOnBar, 5.0),
            (RightBox, EndAnchored, 10.0),
        ]);
        let outcome = allocate(&frame(100.0), &plan, &mut registry);
        // (90 - 10 - 5) / 2 = 37.5 -> 38
        assert_eq!(span(&outcome, DateMenu), (48.0, 53.0));
    }

    #[test]
    fn test_centered_run_is_placed_as_block() {
        let (plan, mut registry) = setup(&[
            (DateMenu, CenteredOnBar, 30.0),
            (CenterBox, CenteredOnBar, 70.0),
        ]);
        let outcome = allocate(&frame(300.0), &plan, &mut registry);

        assert_eq!(span(&outcome, DateMenu), (100.0, 130.0));
        assert_eq!(span(&outcome, CenterBox), (130.0, 200.0));
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_monitor_centered_ignores_siblings() {
        let (plan, mut registry) = setup(&[
            (LeftBox, StartAnchored, 300.0),
            (DateMenu, CenteredOnMonitor, 100.0),
        ]);
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);
        assert_eq!(span(&outcome, DateMenu), (450.0, 550.0));
        assert_eq!(span(&outcome, LeftBox), (0.0, 300.0));
    }

    #[test]
    fn test_non_contiguous_monitor_run_uses_fallback() {
        let (plan, mut registry) = setup(&[
            (DateMenu, CenteredOnMonitor, 100.0),
            (LeftBox, StartAnchored, 50.0),
            (SystemMenu, CenteredOnMonitor, 20.0),
        ]);
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);

        assert_eq!(span(&outcome, DateMenu), (450.0, 550.0));
        assert_eq!(span(&outcome, LeftBox), (550.0, 600.0));
        // centered in [600, 1000)
        assert_eq!(span(&outcome, SystemMenu), (790.0, 810.0));
    }

    #[test]
    fn test_elastic_taskbar_shrinks_by_overflow() {
        let (plan, mut registry) = setup(&[
            (ShowAppsButton, StartAnchored, 100.0),
            (Taskbar, StartAnchored, 900.0),
            (DateMenu, EndAnchored, 100.0),
        ]);
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);

        let taskbar = outcome.placement(Taskbar).unwrap();
        assert_eq!(taskbar.natural_size, 900.0);
        assert_eq!(taskbar.size, 800.0);
        assert_eq!(span(&outcome, Taskbar), (100.0, 900.0));
        assert_eq!(span(&outcome, DateMenu), (900.0, 1000.0));
    }

    #[test]
    fn test_elastic_taskbar_not_grown() {
        let (plan, mut registry) = setup(&[
            (ShowAppsButton, StartAnchored, 100.0),
            (Taskbar, StartAnchored, 300.0),
            (DateMenu, EndAnchored, 100.0),
        ]);
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);
        assert_eq!(span(&outcome, Taskbar), (100.0, 400.0));
        assert_eq!(outcome.placement(Taskbar).unwrap().size, 300.0);
    }

    #[test]
    fn test_centered_elastic_taskbar_fills_gap() {
        let (plan, mut registry) = setup(&[
            (ShowAppsButton, StartAnchored, 100.0),
            (Taskbar, CenteredOnBar, 2000.0),
            (DateMenu, EndAnchored, 100.0),
        ]);
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);
        assert_eq!(span(&outcome, Taskbar), (100.0, 900.0));
    }

    #[test]
    fn test_empty_and_hidden_elements_skipped() {
        let mut registry = ElementRegistry::new();
        registry.register(LeftBox, Probe::sized(0.0));
        registry.register(DateMenu, Probe::sized(40.0));
        registry.register(SystemMenu, Probe::sized(40.0));
        registry.register_absent(ActivitiesButton);
        let plan = PositionPlan::new(vec![
            PlanEntry::new(ActivitiesButton, StartAnchored, true),
            PlanEntry::new(LeftBox, StartAnchored, true),
            PlanEntry::new(DateMenu, StartAnchored, false),
            PlanEntry::new(SystemMenu, StartAnchored, true),
            PlanEntry::new(Taskbar, StartAnchored, true),
        ]);

        let outcome = allocate(&frame(500.0), &plan, &mut registry);
        let ids: Vec<_> = outcome.placements.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![SystemMenu]);
        assert_eq!(span(&outcome, SystemMenu), (0.0, 40.0));
        assert!(registry.handle(DateMenu).unwrap().allocated.is_empty());
    }

    #[test]
    fn test_cross_axis_spans_bar() {
        let (plan, mut registry) = setup(&[(LeftBox, StartAnchored, 20.0)]);
        let bar = BarFrame::new(ActorBox::new(0.0, 0.0, 48.0, 800.0), Edge::Left);
        let outcome = allocate(&bar, &plan, &mut registry);

        let rect = outcome.rect(LeftBox).unwrap();
        assert_eq!(rect, ActorBox::new(0.0, 0.0, 48.0, 20.0));
    }

    #[test]
    fn test_handles_receive_rects_and_container_flag() {
        let mut registry = ElementRegistry::new();
        registry.register_container(RightBox, Probe::sized(60.0));
        registry.register(DateMenu, Probe::sized(40.0));
        let plan = PositionPlan::new(vec![
            PlanEntry::new(RightBox, StartAnchored, true),
            PlanEntry::new(DateMenu, StartAnchored, true),
        ]);

        allocate(&frame(500.0), &plan, &mut registry);

        let right = registry.handle(RightBox).unwrap();
        assert_eq!(right.allocated.len(), 1);
        assert!(right.allocated[0].1.container);
        let date = registry.handle(DateMenu).unwrap();
        assert!(!date.allocated[0].1.container);
        assert_eq!(date.allocated[0].0, ActorBox::new(60.0, 0.0, 100.0, 48.0));
        assert_eq!(registry.rect(DateMenu), Some(ActorBox::new(60.0, 0.0, 100.0, 48.0)));
    }

    #[test]
    fn test_pass_cap_leaves_partial_layout() {
        let (plan, mut registry) = setup(&[
            (LeftBox, StartAnchored, 10.0),
            (DateMenu, CenteredOnBar, 10.0),
            (RightBox, EndAnchored, 10.0),
        ]);
        let mut allocator = PanelAllocator::new(LayoutConfig::new().with_max_iterations(1));
        let outcome = allocator.allocate(&frame(100.0), &plan, &mut registry);

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 1);
        let unresolved: Vec<_> = outcome.unresolved().map(|p| p.id).collect();
        assert_eq!(unresolved, vec![DateMenu]);
        assert_eq!(span(&outcome, DateMenu), (0.0, 0.0));
        assert!(registry.handle(DateMenu).unwrap().allocated.is_empty());
    }

    #[test]
    fn test_deadlocked_plan_terminates() {
        // c1 waits for the end element, which waits for c2, which waits for c1
        let (plan, mut registry) = setup(&[
            (DateMenu, CenteredOnBar, 10.0),
            (RightBox, EndAnchored, 10.0),
            (SystemMenu, CenteredOnBar, 10.0),
        ]);
        let outcome = allocate(&frame(100.0), &plan, &mut registry);

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 10);
        assert_eq!(outcome.unresolved().count(), 3);
    }

    #[test]
    fn test_unresolved_elements_keep_previous_rect() {
        let (plan, mut registry) = setup(&[
            (LeftBox, StartAnchored, 10.0),
            (DateMenu, CenteredOnBar, 10.0),
            (RightBox, EndAnchored, 10.0),
        ]);
        allocate(&frame(100.0), &plan, &mut registry);
        assert_eq!(registry.rect(DateMenu).unwrap().span(Axis::X), (45.0, 55.0));

        let mut allocator = PanelAllocator::new(LayoutConfig::new().with_max_iterations(1));
        let outcome = allocator.allocate(&frame(100.0), &plan, &mut registry);
        assert!(!outcome.converged);
        assert_eq!(span(&outcome, DateMenu), (45.0, 55.0));
    }

    #[test]
    fn test_corners_on_top_bar() {
        let (plan, mut registry) = setup(&[(LeftBox, StartAnchored, 10.0)]);
        registry.set_corners(Probe::sized(6.0), Probe::sized(6.0));
        let bar = BarFrame::new(ActorBox::new(0.0, 0.0, 1000.0, 32.0), Edge::Top);
        let mut allocator = PanelAllocator::default();

        let corners = allocator.allocate(&bar, &plan, &mut registry).corners.unwrap();
        assert_eq!(corners.left, ActorBox::new(0.0, 32.0, 6.0, 38.0));
        assert_eq!(corners.right, ActorBox::new(994.0, 32.0, 1000.0, 38.0));
        assert!(corners.size_changed);

        let again = allocator.allocate(&bar, &plan, &mut registry).corners.unwrap();
        assert!(!again.size_changed);
        assert_eq!(allocator.corner_size(), 6.0);
        assert_eq!(registry.corners().unwrap().right.allocated.len(), 2);
    }

    #[test]
    fn test_no_corners_off_top_edge() {
        let (plan, mut registry) = setup(&[(LeftBox, StartAnchored, 10.0)]);
        registry.set_corners(Probe::sized(6.0), Probe::sized(6.0));
        let outcome = allocate(&frame(1000.0), &plan, &mut registry);
        assert!(outcome.corners.is_none());
        assert!(registry.corners().unwrap().left.allocated.is_empty());
    }

    #[test]
    fn test_duplicate_plan_entries_ignored() {
        let (mut plan, mut registry) = setup(&[(LeftBox, StartAnchored, 10.0)]);
        plan = plan
            .iter()
            .copied()
            .chain(std::iter::once(PlanEntry::new(LeftBox, EndAnchored, true)))
            .collect();
        let outcome = allocate(&frame(100.0), &plan, &mut registry);
        assert_eq!(outcome.placements.len(), 1);
        assert_eq!(span(&outcome, LeftBox), (0.0, 10.0));
    }
}
