//! Body registry: an arena of bodies plus a name index, rooted at one star.

use std::collections::HashMap;

use super::body::{Body, BodyKind, Star};
use super::formulas::{self, HabitableZone};
use super::position::OrbitalPosition;
use crate::api::types::BodyId;
use crate::error::{SimError, SimResult};

/// A star and everything orbiting it.
///
/// Bodies are only ever appended under an existing parent, so every parent
/// chain ends at the root and cannot loop.
#[derive(Debug, Clone)]
pub struct PlanetarySystem {
    bodies: Vec<Body>,
    names: HashMap<String, BodyId>,
}

impl PlanetarySystem {
    /// Start a system with its root star.
    pub fn new(name: impl Into<String>, star: Star) -> Self {
        let name = name.into();
        let root = Body::new(BodyId(0), name.clone(), BodyKind::Star(star));
        Self {
            bodies: vec![root],
            names: HashMap::from([(name, BodyId(0))]),
        }
    }

    /// Attach a new body under `parent`. Returns the new body's id.
    pub fn attach(
        &mut self,
        parent: BodyId,
        name: impl Into<String>,
        kind: BodyKind,
        position: OrbitalPosition,
    ) -> SimResult<BodyId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(SimError::DuplicateName { name });
        }
        self.body(parent)?;
        Ok(self.insert(parent, name, kind, position))
    }

    /// Append without validation. `parent` must exist and `name` must be unused.
    pub(crate) fn insert(
        &mut self,
        parent: BodyId,
        name: String,
        kind: BodyKind,
        position: OrbitalPosition,
    ) -> BodyId {
        let parent_world = self.bodies[parent.index()].world;
        let id = BodyId(self.bodies.len() as u32);
        let mut body = Body::new(id, name.clone(), kind)
            .with_position(position)
            .with_parent(parent);
        body.world = parent_world + position.offset();

        self.bodies.push(body);
        self.bodies[parent.index()].satellites.push(id);
        self.names.insert(name, id);
        id
    }

    pub fn root_id(&self) -> BodyId {
        BodyId(0)
    }

    pub fn root(&self) -> &Body {
        &self.bodies[0]
    }

    /// The root star's properties.
    pub fn star(&self) -> &Star {
        match &self.bodies[0].kind {
            BodyKind::Star(star) => star,
            _ => unreachable!("root is always a star"),
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Like [`PlanetarySystem::get`], but an unknown id is an error.
    pub fn body(&self, id: BodyId) -> SimResult<&Body> {
        self.get(id).ok_or(SimError::UnknownBody { id })
    }

    pub(crate) fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Body> {
        self.names.get(name).and_then(|&id| self.get(id))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Iterate bodies in creation order (root first).
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Ids in strict pre-order from the root: every parent before its satellites.
    pub fn preorder(&self) -> Vec<BodyId> {
        let mut order = Vec::with_capacity(self.bodies.len());
        let mut stack = vec![self.root_id()];
        while let Some(id) = stack.pop() {
            order.push(id);
            // Reverse so the first satellite is visited first
            stack.extend(self.bodies[id.index()].satellites.iter().rev());
        }
        order
    }

    /// Walk parent links upward from `id` (excluding `id` itself).
    /// Stops after as many hops as there are bodies, so a corrupt chain cannot spin forever.
    pub fn ancestors(&self, id: BodyId) -> impl Iterator<Item = BodyId> + '_ {
        let mut current = self.get(id).and_then(|b| b.parent);
        let mut hops = 0;
        std::iter::from_fn(move || {
            let next = current?;
            hops += 1;
            if hops > self.bodies.len() {
                return None;
            }
            current = self.get(next).and_then(|b| b.parent);
            Some(next)
        })
    }

    /// Whether `id`'s parent chain reaches the root without repeating a body.
    pub fn reaches_root(&self, id: BodyId) -> bool {
        if id == self.root_id() {
            return true;
        }
        let mut seen = vec![id];
        for ancestor in self.ancestors(id) {
            if seen.contains(&ancestor) {
                return false;
            }
            if ancestor == self.root_id() {
                return true;
            }
            seen.push(ancestor);
        }
        false
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn habitable_zone(&self) -> &HabitableZone {
        &self.star().habitable_zone
    }

    /// Hill-sphere radius of `id` around its parent, in AU.
    pub fn hill_radius(&self, id: BodyId) -> SimResult<f64> {
        let body = self.body(id)?;
        let parent_id = body.parent.ok_or_else(|| SimError::MissingParent { body: body.name.clone() })?;
        let parent = self.body(parent_id)?;
        let mass = usable_mass(body)?;
        let parent_mass = usable_mass(parent)?;
        Ok(formulas::hill_radius(body.position.r, mass, parent_mass))
    }

    /// Roche limit of `satellite` around `primary`, in metres.
    pub fn roche_limit(&self, primary: BodyId, satellite: BodyId) -> SimResult<f64> {
        let primary = self.body(primary)?;
        let satellite = self.body(satellite)?;
        let primary_mass = usable_mass(primary)?;
        let satellite_mass = usable_mass(satellite)?;
        Ok(formulas::roche_limit(primary_mass, satellite.kind.radius_m(), satellite_mass))
    }
}

/// Mass in kilograms, or an error naming the body when it is not positive and finite.
fn usable_mass(body: &Body) -> SimResult<f64> {
    let kg = body.kind.mass_kg();
    if kg.is_finite() && kg > 0.0 {
        Ok(kg)
    } else {
        Err(SimError::MissingMass { body: body.name.clone() })
    }
}
