//! One explicit step of the spring-damper model.

use crate::config::MotionConfig;
use crate::point::Point;
use glam::DVec2;

/// Advances `point` by one simulated step.
///
/// Spring toward `target`, then the repulsion `impulse`, then friction,
/// then position. With friction below one, bounded forcing keeps the
/// velocity bounded.
pub fn integrate(point: &mut Point, target: DVec2, impulse: DVec2, motion: &MotionConfig) {
    point.velocity += (target - point.position) * motion.spring;
    point.velocity += impulse;
    point.velocity *= motion.friction;
    point.position += point.velocity;
}
