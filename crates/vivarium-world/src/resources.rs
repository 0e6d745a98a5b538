//! Registry of static world resources.
//!
//! Resources are kept in placement order. Lookups are exhaustive linear
//! scans; there is no spatial index.

use tracing::debug;
use vivarium_types::{Position, Resource, ResourceId, ResourceKind};

/// All resources currently in the world.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// Place a resource and return its new identity.
    pub fn place(&mut self, kind: ResourceKind, position: Position, size: f64) -> ResourceId {
        let id = ResourceId::new();
        self.resources.push(Resource {
            id,
            kind,
            position,
            size,
        });
        debug!(resource_id = %id, ?kind, x = position.x, y = position.y, "Resource placed");
        id
    }

    /// Remove the resource closest to `position`, if one lies within `radius`.
    ///
    /// At most one resource is removed. Returns the removed resource.
    pub fn remove_near(&mut self, position: Position, radius: f64) -> Option<Resource> {
        let index = closest_index(
            self.resources.iter().map(|r| r.position),
            position,
            radius,
        )?;
        if index >= self.resources.len() {
            return None;
        }
        let removed = self.resources.remove(index);
        debug!(resource_id = %removed.id, kind = ?removed.kind, "Resource removed");
        Some(removed)
    }

    /// Position of the resource of `kind` nearest to `from`.
    ///
    /// Ties keep the resource placed first.
    pub fn nearest_of_kind(&self, from: Position, kind: ResourceKind) -> Option<Position> {
        let mut best: Option<(f64, Position)> = None;
        for resource in self.resources.iter().filter(|r| r.kind == kind) {
            let distance = from.distance_to(resource.position);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, resource.position));
            }
        }
        best.map(|(_, position)| position)
    }

    /// Look up a resource by identity.
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Iterate resources in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Number of resources.
    pub const fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the world has no resources.
    pub const fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Index of the position closest to `center` within `radius`.
fn closest_index(
    positions: impl Iterator<Item = Position>,
    center: Position,
    radius: f64,
) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;
    for (index, position) in positions.enumerate() {
        let distance = center.distance_to(position);
        if distance <= radius && best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, index));
        }
    }
    best.map(|(_, index)| index)
}
