//! Element registry: maps logical element ids to host visual objects

use std::collections::HashMap;

use super::orientation::SizeQuery;
use super::types::{ActorBox, ElementId};

/// Extra information handed to a handle when it receives its rect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocationFlags {
    /// The element holds children and must run its own allocation
    pub container: bool,
}

/// A host-owned visual object the engine can measure and place.
///
/// Size queries must answer from already computed metrics; the engine calls
/// them in the middle of a pass.
pub trait ElementHandle {
    /// Natural extent for the given query
    fn preferred_size(&self, query: SizeQuery) -> f64;

    /// Receive the final rect for this pass
    fn allocate(&mut self, rect: &ActorBox, flags: AllocationFlags);
}

/// A registered element and its last output rect
#[derive(Debug, Clone)]
pub struct Element<H> {
    pub id: ElementId,
    pub handle: Option<H>,
    pub is_container: bool,
    pub rect: ActorBox,
}

/// The two corner-masking decorations drawn under a top bar
#[derive(Debug, Clone)]
pub struct Corners<H> {
    pub left: H,
    pub right: H,
}

#[derive(Debug, Clone)]
pub struct ElementRegistry<H> {
    elements: HashMap<ElementId, Element<H>>,
    corners: Option<Corners<H>>,
}

impl<H> Default for ElementRegistry<H> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
            corners: None,
        }
    }
}

impl<H> ElementRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, id: ElementId, handle: Option<H>, is_container: bool) {
        // Re-registering keeps the last rect so unresolved elements stay put
        let rect = self.elements.get(&id).map(|e| e.rect).unwrap_or_default();
        self.elements.insert(
            id,
            Element {
                id,
                handle,
                is_container,
                rect,
            },
        );
    }

    /// Register a leaf element
    pub fn register(&mut self, id: ElementId, handle: H) {
        self.insert(id, Some(handle), false);
    }

    /// Register an element that lays out its own children
    pub fn register_container(&mut self, id: ElementId, handle: H) {
        self.insert(id, Some(handle), true);
    }

    /// Record an element the host does not currently provide
    pub fn register_absent(&mut self, id: ElementId) {
        self.insert(id, None, false);
    }

    pub fn get(&self, id: ElementId) -> Option<&Element<H>> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element<H>> {
        self.elements.get_mut(&id)
    }

    pub fn handle(&self, id: ElementId) -> Option<&H> {
        self.get(id).and_then(|e| e.handle.as_ref())
    }

    /// Last rect computed for `id`
    pub fn rect(&self, id: ElementId) -> Option<ActorBox> {
        self.get(id).map(|e| e.rect)
    }

    pub fn set_corners(&mut self, left: H, right: H) {
        self.corners = Some(Corners { left, right });
    }

    pub fn corners(&self) -> Option<&Corners<H>> {
        self.corners.as_ref()
    }

    pub fn corners_mut(&mut self) -> Option<&mut Corners<H>> {
        self.corners.as_mut()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
