//! Target motion system.
//!
//! A target with a `ScriptedPath` walks its loop of points; otherwise it
//! drifts at its `Velocity`. In both cases `Velocity` ends up holding the
//! motion applied this tick.

use glam::DVec3;
use hecs::World;

use crate::components::{Position, ScriptedPath, Target, Velocity};

/// Distance at which a path point counts as reached (m).
const PATH_POINT_TOLERANCE: f64 = 1e-6;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (_target, pos, vel, path)) in world.query_mut::<(
        &Target,
        &mut Position,
        &mut Velocity,
        Option<&mut ScriptedPath>,
    )>() {
        match path {
            Some(path) => {
                let start = pos.0;
                pos.0 = follow_path(path, start, dt);
                vel.0 = if dt > 0.0 {
                    (pos.0 - start) / dt
                } else {
                    DVec3::ZERO
                };
            }
            None => pos.0 += vel.0 * dt,
        }
    }
}

/// Move along the loop for `dt` seconds, carrying leftover travel across
/// path points.
fn follow_path(path: &mut ScriptedPath, from: DVec3, dt: f64) -> DVec3 {
    if path.points.is_empty() || path.speed <= 0.0 {
        return from;
    }
    let mut position = from;
    let mut budget = path.speed * dt;
    // One full lap per tick at most.
    for _ in 0..=path.points.len() {
        let goal = path.points[path.index % path.points.len()];
        let to = goal - position;
        let dist = to.length();
        if dist <= budget + PATH_POINT_TOLERANCE {
            position = goal;
            budget -= dist;
            path.index = (path.index + 1) % path.points.len();
            if budget <= 0.0 {
                break;
            }
        } else {
            position += to / dist * budget;
            break;
        }
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_carries_over_corners() {
        let mut path = ScriptedPath {
            points: vec![DVec3::new(1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 1.0)],
            speed: 1.5,
            index: 0,
        };
        let pos = follow_path(&mut path, DVec3::ZERO, 1.0);
        assert!((pos - DVec3::new(1.0, 0.0, 0.5)).length() < 1e-9);
        assert_eq!(path.index, 1);
    }

    #[test]
    fn test_velocity_drift() {
        let mut world = World::new();
        let e = world.spawn((Target, Position(DVec3::ZERO), Velocity(DVec3::X * 2.0)));
        run(&mut world, 0.5);
        let pos = world.get::<&Position>(e).unwrap();
        assert_eq!(pos.0, DVec3::new(1.0, 0.0, 0.0));
    }
}
