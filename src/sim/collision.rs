//! Collision detection and response between circular bodies
//!
//! Candidate pairs come from the 3x3 cell neighborhood of the grid built at
//! the start of the substep. Overlapping pairs are pushed apart by mass
//! ratio, then their normal velocity components are exchanged using the 1-D
//! collision formula for unequal masses and scaled by restitution.

use std::collections::HashSet;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::grid::SpatialGrid;
use super::particle::Particle;
use crate::consts::DEGENERATE_SEPARATION;

/// When overlapping bodies receive a velocity response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactPolicy {
    /// Correct and apply the impulse on every overlap, even if the bodies are
    /// already moving apart. Resting contacts re-collide each substep.
    #[default]
    Always,
    /// Correct every overlap but skip the impulse for separating pairs
    ApproachingOnly,
}

/// Geometry of a contact between two circles
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit vector from the first body toward the second
    pub normal: DVec2,
    /// Center distance (never zero)
    pub distance: f64,
    /// Sum of radii minus distance; positive when overlapping
    pub penetration: f64,
}

impl Contact {
    /// Build the contact frame for `a` and `b`.
    ///
    /// Coincident centers get a nominal +x separation so the normal is
    /// always defined.
    pub fn between(a: &Particle, b: &Particle) -> Self {
        let mut delta = b.pos - a.pos;
        let mut distance = delta.length();
        if distance == 0.0 {
            delta = DVec2::new(DEGENERATE_SEPARATION, 0.0);
            distance = DEGENERATE_SEPARATION;
        }
        Self {
            normal: delta / distance,
            distance,
            penetration: a.radius + b.radius - distance,
        }
    }
}

/// Circle-circle overlap test (touching counts)
#[inline]
pub fn circles_overlap(a: &Particle, b: &Particle) -> bool {
    let rsum = a.radius + b.radius;
    a.pos.distance_squared(b.pos) <= rsum * rsum
}

/// Push overlapping bodies apart along the normal.
///
/// Each body moves by the penetration depth weighted by the other body's
/// share of the total mass, so the heavier one moves less.
pub fn separate(a: &mut Particle, b: &mut Particle, contact: &Contact) {
    if contact.penetration <= 0.0 {
        return;
    }
    let total = a.mass + b.mass;
    let shift = contact.normal * contact.penetration;
    a.pos -= shift * (b.mass / total);
    b.pos += shift * (a.mass / total);
}

/// Exchange normal velocity components, keep tangential ones.
///
/// Normal components follow the 1-D collision formula for unequal masses and
/// are then scaled by `restitution`. Tangential components are untouched
/// (frictionless).
pub fn apply_impulse(a: &mut Particle, b: &mut Particle, normal: DVec2, restitution: f64) {
    let tangent = normal.perp();

    let va_n = a.vel.dot(normal);
    let vb_n = b.vel.dot(normal);
    let va_t = a.vel.dot(tangent);
    let vb_t = b.vel.dot(tangent);

    let (m1, m2) = (a.mass, b.mass);
    let va_n_new = (va_n * (m1 - m2) + 2.0 * m2 * vb_n) / (m1 + m2) * restitution;
    let vb_n_new = (vb_n * (m2 - m1) + 2.0 * m1 * va_n) / (m1 + m2) * restitution;

    a.vel = va_n_new * normal + va_t * tangent;
    b.vel = vb_n_new * normal + vb_t * tangent;
}

/// True when the pair's relative velocity along `normal` points apart
#[inline]
pub fn is_separating(a: &Particle, b: &Particle, normal: DVec2) -> bool {
    (b.vel - a.vel).dot(normal) > 0.0
}

/// Resolve one overlapping pair: positional correction, then velocity response
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, restitution: f64, policy: ContactPolicy) {
    let contact = Contact::between(a, b);
    separate(a, b, &contact);

    if policy == ContactPolicy::ApproachingOnly && is_separating(a, b, contact.normal) {
        return;
    }

    apply_impulse(a, b, contact.normal, restitution);
}

/// Mutable access to two distinct elements, in argument order
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Detect and resolve every overlapping pair found through `grid`.
///
/// `grid` must be the one built at the start of this substep; it is reused,
/// not rebuilt, so cell assignments predate this substep's movement. Each
/// unordered pair is tested at most once. Returns the number of pairs
/// resolved.
pub fn resolve_collisions(
    particles: &mut [Particle],
    grid: &SpatialGrid,
    restitution: f64,
    policy: ContactPolicy,
) -> u32 {
    let mut checked: HashSet<(usize, usize)> = HashSet::new();
    let mut collisions = 0;

    for (key, indices) in grid.cells() {
        for neighbor in key.neighborhood() {
            let others = grid.bucket(neighbor);
            if others.is_empty() {
                continue;
            }
            for &i in indices {
                for &j in others {
                    if i >= j || !checked.insert((i, j)) {
                        continue;
                    }
                    let (a, b) = pair_mut(particles, i, j);
                    if circles_overlap(a, b) {
                        resolve_pair(a, b, restitution, policy);
                        collisions += 1;
                    }
                }
            }
        }
    }

    collisions
}
