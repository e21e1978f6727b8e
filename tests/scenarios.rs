//! End-to-end allocation scenarios
//!
//! Drive the engine through the public API, both with a hand-built registry
//! and through TOML scenarios.

use panel_layout::layout::{
    allocate, ActorBox, Axis, BarFrame, Edge, ElementId, ElementRegistry, PlacementIntent,
    PlanEntry, PositionPlan,
};
use panel_layout::{layout_scenario, LayoutConfig, PanelAllocator, Scenario, StaticElement};
use pretty_assertions::assert_eq;

use ElementId::*;
use PlacementIntent::*;

fn bar(length: f64) -> BarFrame {
    BarFrame::new(ActorBox::new(0.0, 0.0, length, 48.0), Edge::Bottom)
}

fn build(
    items: &[(ElementId, PlacementIntent, f64)],
) -> (PositionPlan, ElementRegistry<StaticElement>) {
    let mut registry = ElementRegistry::new();
    let plan = items
        .iter()
        .map(|&(id, intent, size)| {
            registry.register(id, StaticElement::square(size));
            PlanEntry::new(id, intent, true)
        })
        .collect();
    (plan, registry)
}

fn span(registry: &ElementRegistry<StaticElement>, id: ElementId) -> (f64, f64) {
    registry
        .handle(id)
        .and_then(|h| h.last_rect)
        .map(|r| r.span(Axis::X))
        .unwrap_or((f64::NAN, f64::NAN))
}

#[test]
fn test_monitor_centered_clock_squeezes_taskbar() {
    let (plan, mut registry) = build(&[
        (ShowAppsButton, StartAnchored, 100.0),
        (Taskbar, StartAnchored, 500.0),
        (DateMenu, CenteredOnMonitor, 50.0),
        (SystemMenu, EndAnchored, 100.0),
    ]);
    let outcome = allocate(&bar(1000.0), &plan, &mut registry);

    assert!(outcome.converged);
    assert_eq!(outcome.iterations, 1);
    assert_eq!(span(&registry, ShowAppsButton), (0.0, 100.0));
    assert_eq!(span(&registry, DateMenu), (475.0, 525.0));
    assert_eq!(span(&registry, Taskbar), (100.0, 475.0));
    assert_eq!(span(&registry, SystemMenu), (900.0, 1000.0));
}

#[test]
fn test_bar_centered_clock_uses_remaining_gap() {
    let (plan, mut registry) = build(&[
        (ShowAppsButton, StartAnchored, 100.0),
        (Taskbar, StartAnchored, 500.0),
        (DateMenu, CenteredOnBar, 50.0),
        (SystemMenu, EndAnchored, 100.0),
    ]);
    let outcome = allocate(&bar(1000.0), &plan, &mut registry);

    assert!(outcome.converged);
    assert_eq!(outcome.iterations, 2);
    assert_eq!(span(&registry, Taskbar), (100.0, 600.0));
    // gap [600, 900), offset round((300 - 50) / 2) = 125
    assert_eq!(span(&registry, DateMenu), (725.0, 775.0));
}

#[test]
fn test_end_element_waits_for_centered_successor() {
    let (plan, mut registry) = build(&[
        (ShowAppsButton, StartAnchored, 100.0),
        (Taskbar, StartAnchored, 500.0),
        (SystemMenu, EndAnchored, 100.0),
        (DateMenu, CenteredOnBar, 50.0),
    ]);
    let outcome = allocate(&bar(1000.0), &plan, &mut registry);

    assert!(outcome.converged);
    assert_eq!(outcome.iterations, 2);
    assert_eq!(span(&registry, ShowAppsButton), (0.0, 100.0));
    // taskbar still fits next to the 150 of unplaced successors
    assert_eq!(span(&registry, Taskbar), (100.0, 600.0));
    // the centered run skips its end-anchored predecessor: gap [600, 1000)
    assert_eq!(span(&registry, DateMenu), (775.0, 825.0));
    // the end element stacks against its centered successor
    assert_eq!(span(&registry, SystemMenu), (675.0, 775.0));
}

#[test]
fn test_deadlocked_plan_reports_unresolved() {
    let (plan, mut registry) = build(&[
        (DateMenu, CenteredOnBar, 10.0),
        (RightBox, EndAnchored, 10.0),
        (SystemMenu, CenteredOnBar, 10.0),
    ]);
    let outcome = allocate(&bar(100.0), &plan, &mut registry);

    assert!(!outcome.converged);
    assert_eq!(outcome.iterations, 10);
    let unresolved: Vec<_> = outcome.unresolved().map(|p| p.id).collect();
    assert_eq!(unresolved, vec![DateMenu, RightBox, SystemMenu]);
    assert!(registry.handle(DateMenu).unwrap().last_rect.is_none());
}

#[test]
fn test_allocator_reuse_keeps_corner_state() {
    let (plan, mut registry) = build(&[(LeftBox, StartAnchored, 20.0)]);
    registry.set_corners(StaticElement::square(8.0), StaticElement::square(8.0));
    let top = BarFrame::new(ActorBox::new(0.0, 0.0, 500.0, 30.0), Edge::Top);
    let mut allocator = PanelAllocator::new(LayoutConfig::default());

    let first = allocator.allocate(&top, &plan, &mut registry);
    assert!(first.corners.unwrap().size_changed);

    registry.set_corners(StaticElement::square(12.0), StaticElement::square(12.0));
    let second = allocator.allocate(&top, &plan, &mut registry);
    let corners = second.corners.unwrap();
    assert!(corners.size_changed);
    assert_eq!(corners.left, ActorBox::new(0.0, 30.0, 12.0, 42.0));
    assert_eq!(allocator.corner_size(), 12.0);
}

#[test]
fn test_corners_disabled() {
    let (plan, mut registry) = build(&[(LeftBox, StartAnchored, 20.0)]);
    registry.set_corners(StaticElement::square(8.0), StaticElement::square(8.0));
    let top = BarFrame::new(ActorBox::new(0.0, 0.0, 500.0, 30.0), Edge::Top);
    let mut allocator = PanelAllocator::new(LayoutConfig::new().with_corners(false));

    let outcome = allocator.allocate(&top, &plan, &mut registry);
    assert!(outcome.corners.is_none());
    assert_eq!(allocator.corner_size(), 0.0);
}

#[test]
fn test_vertical_bar_uses_heights() {
    let source = r#"
[panel]
position = "LEFT"

[[host.monitors]]
width = 1920
height = 1080

[host.elements.showAppsButton]
size = 48
[host.elements.dateMenu]
width = 200
height = 30
"#;
    let report = layout_scenario(source, None).unwrap();

    assert_eq!((report.geometry.w, report.geometry.h), (48.0, 1080.0));
    let rect = |id| report.outcome.rect(id).unwrap();
    assert_eq!(rect(ShowAppsButton), ActorBox::new(0.0, 0.0, 48.0, 48.0));
    assert_eq!(rect(DesktopButton), ActorBox::new(0.0, 1071.0, 48.0, 1080.0));
    assert_eq!(rect(DateMenu), ActorBox::new(0.0, 1041.0, 48.0, 1071.0));
}

#[test]
fn test_per_monitor_plans() {
    let source = r#"
[[plan]]
monitor = 1
elements = [
    { element = "dateMenu", position = "stackedTL" },
    { element = "desktopButton", position = "stackedBR", visible = false },
]

[[host.monitors]]
width = 800
height = 600

[[host.monitors]]
x = 800
width = 800
height = 600

[host.elements.dateMenu]
width = 90
"#;
    let scenario = Scenario::from_str(source).unwrap();

    let first = scenario.run(0, &LayoutConfig::default()).unwrap();
    assert_eq!(first.outcome.rect(DateMenu).unwrap().span(Axis::X), (701.0, 791.0));
    assert!(first.outcome.placement(DesktopButton).is_some());

    let second = scenario.run(1, &LayoutConfig::default()).unwrap();
    assert_eq!(second.outcome.rect(DateMenu).unwrap().span(Axis::X), (0.0, 90.0));
    assert!(second.outcome.placement(DesktopButton).is_none());
}

#[test]
fn test_report_text() {
    let source = r#"
[[plan]]
monitor = 0
elements = [
    { element = "showAppsButton", position = "stackedTL" },
    { element = "taskbar", position = "stackedTL" },
    { element = "dateMenu", position = "centerMonitor" },
    { element = "systemMenu", position = "stackedBR" },
]

[[host.monitors]]
width = 1000
height = 600

[host.elements.showAppsButton]
size = 100
[host.elements.taskbar]
width = 500
[host.elements.dateMenu]
width = 50
[host.elements.systemMenu]
width = 100
"#;
    let report = layout_scenario(source, None).unwrap();

    insta::assert_snapshot!(report.to_string(), @r###"
    monitor 0: BOTTOM bar at (0, 552) size 1000x48
    passes: 1 (converged)
    element           intent                start     end    size  resolved
    showAppsButton    StartAnchored             0     100     100  yes
    taskbar           StartAnchored           100     475     375  yes
    dateMenu          CenteredOnMonitor       475     525      50  yes
    systemMenu        EndAnchored             900    1000     100  yes
    "###);
}
