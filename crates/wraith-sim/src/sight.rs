//! Line-of-sight queries against the world's colliders.
//!
//! `WorldSight` copies collider geometry out of the world once per tick so
//! probes can run while agent components are mutably borrowed.

use glam::DVec3;
use hecs::World;

use wraith_core::ports::LineOfSightQuery;
use wraith_core::types::{EntityId, LayerMask, RayHit};

use crate::components::{Collider, Position, Shape};

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: EntityId,
    center: DVec3,
    shape: Shape,
    layers: LayerMask,
}

/// Ray caster over a frozen copy of the world's colliders.
#[derive(Debug, Clone, Default)]
pub struct WorldSight {
    bodies: Vec<Body>,
}

impl WorldSight {
    /// Snapshot every entity that has both a position and a collider.
    pub fn collect(world: &World) -> Self {
        let mut bodies: Vec<Body> = world
            .query::<(&Position, &Collider)>()
            .iter()
            .map(|(entity, (pos, collider))| Body {
                entity: EntityId(entity.id()),
                center: pos.0 + collider.offset,
                shape: collider.shape,
                layers: collider.layers,
            })
            .collect();
        bodies.sort_by_key(|b| b.entity.0);
        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl LineOfSightQuery for WorldSight {
    fn cast(
        &self,
        origin: DVec3,
        direction: DVec3,
        max_distance: f64,
        layers: LayerMask,
    ) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for body in &self.bodies {
            if !body.layers.intersects(layers) {
                continue;
            }
            let hit = match body.shape {
                Shape::Sphere { radius } => {
                    ray_sphere(origin, direction, body.center, radius, max_distance)
                }
                Shape::Box { half_extents } => ray_aabb(
                    origin,
                    direction,
                    body.center - half_extents,
                    body.center + half_extents,
                    max_distance,
                ),
            };
            if let Some((distance, normal)) = hit {
                if nearest.map_or(true, |n| distance < n.distance) {
                    nearest = Some(RayHit {
                        entity: body.entity,
                        point: origin + direction * distance,
                        normal,
                        distance,
                    });
                }
            }
        }
        nearest
    }
}

/// Entry distance and surface normal of a ray against a sphere.
/// A ray starting inside hits at distance 0.
fn ray_sphere(
    origin: DVec3,
    direction: DVec3,
    center: DVec3,
    radius: f64,
    max_distance: f64,
) -> Option<(f64, DVec3)> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some((0.0, -direction));
    }
    let b = oc.dot(direction);
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t > max_distance {
        return None;
    }
    let point = origin + direction * t;
    Some((t, (point - center).normalize_or_zero()))
}

/// Slab test against an axis-aligned box.
fn ray_aabb(
    origin: DVec3,
    direction: DVec3,
    min: DVec3,
    max: DVec3,
    max_distance: f64,
) -> Option<(f64, DVec3)> {
    let mut t_enter = 0.0_f64;
    let mut t_exit = max_distance;
    let mut normal = -direction;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < 1e-12 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            let mut n = DVec3::ZERO;
            n[axis] = -d.signum();
            normal = n;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }
    Some((t_enter, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_distance() {
        let hit = ray_sphere(DVec3::ZERO, DVec3::Z, DVec3::new(0.0, 0.0, 5.0), 1.0, 10.0);
        let (t, n) = hit.unwrap();
        assert!((t - 4.0).abs() < 1e-12);
        assert!((n + DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_sphere_behind_or_beyond_missed() {
        assert!(ray_sphere(DVec3::ZERO, DVec3::Z, DVec3::new(0.0, 0.0, -5.0), 1.0, 10.0).is_none());
        assert!(ray_sphere(DVec3::ZERO, DVec3::Z, DVec3::new(0.0, 0.0, 20.0), 1.0, 10.0).is_none());
        assert!(ray_sphere(DVec3::ZERO, DVec3::Z, DVec3::new(3.0, 0.0, 5.0), 1.0, 10.0).is_none());
    }

    #[test]
    fn test_box_hit_face_normal() {
        let (t, n) = ray_aabb(
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(2.0, -1.0, -1.0),
            DVec3::new(3.0, 1.0, 1.0),
            10.0,
        )
        .unwrap();
        assert!((t - 2.0).abs() < 1e-12);
        assert_eq!(n, DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_box_parallel_outside_slab_missed() {
        let hit = ray_aabb(
            DVec3::new(0.0, 5.0, 0.0),
            DVec3::X,
            DVec3::new(2.0, -1.0, -1.0),
            DVec3::new(3.0, 1.0, 1.0),
            10.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_box_out_of_reach_missed() {
        let hit = ray_aabb(
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(8.0, -1.0, -1.0),
            DVec3::new(9.0, 1.0, 1.0),
            5.0,
        );
        assert!(hit.is_none());
    }
}
