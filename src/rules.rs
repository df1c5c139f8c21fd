//! The velocity rules applied to each boid during a step.
//!
//! The neighbor rules take the whole population and the index of the boid being updated and
//! return a velocity change. They read whatever state the population holds at call time, so
//! boids earlier in the population have already moved this tick. `limit_speed` and
//! `keep_within_bounds` act on a single boid in place.

use crate::boid::{distance, Boid};
use flock_common::{SimParams, Vec2};

/// Cohesion: steer toward the centroid of every boid within the visual range, the boid itself included.
pub fn fly_towards_center(boids: &[Boid], idx: usize, params: &SimParams) -> Vec2 {
    let boid = &boids[idx];
    let mut center = Vec2::ZERO;
    let mut num_neighbors = 0u32;

    for other in boids {
        if distance(boid, other) < params.visual_range {
            center += other.position;
            num_neighbors += 1;
        }
    }

    if num_neighbors == 0 {
        return Vec2::ZERO;
    }
    let center = center / num_neighbors as f32;
    (center - boid.position) * params.centering_factor
}

/// Separation: move away from every other boid closer than `min_distance`.
pub fn avoid_others(boids: &[Boid], idx: usize, params: &SimParams) -> Vec2 {
    let boid = &boids[idx];
    let mut movement = Vec2::ZERO;

    for (other_idx, other) in boids.iter().enumerate() {
        if other_idx != idx && distance(boid, other) < params.min_distance {
            movement += boid.position - other.position;
        }
    }

    movement * params.avoid_factor
}

/// Alignment: nudge velocity toward the average velocity of boids within the visual range.
pub fn match_velocity(boids: &[Boid], idx: usize, params: &SimParams) -> Vec2 {
    let boid = &boids[idx];
    let mut avg_velocity = Vec2::ZERO;
    let mut num_neighbors = 0u32;

    for other in boids {
        if distance(boid, other) < params.visual_range {
            avg_velocity += other.velocity;
            num_neighbors += 1;
        }
    }

    if num_neighbors == 0 {
        return Vec2::ZERO;
    }
    let avg_velocity = avg_velocity / num_neighbors as f32;
    (avg_velocity - boid.velocity) * params.matching_factor
}

/// Rescales the velocity to exactly `speed_limit` when it is faster, keeping its direction.
pub fn limit_speed(boid: &mut Boid, speed_limit: f32) {
    let speed = boid.speed();
    // speed > speed_limit > 0, so the division is safe
    if speed > speed_limit {
        boid.velocity = boid.velocity / speed * speed_limit;
    }
}

/// Turns the boid back when it is within `margin` of an edge. Each axis and each edge is
/// checked on its own; on bounds narrower than twice the margin both edges apply and cancel.
pub fn keep_within_bounds(boid: &mut Boid, params: &SimParams) {
    let margin = params.margin;
    let turn = params.turn_factor;
    let bounds = params.bounds;

    if boid.position.x < margin {
        boid.velocity.x += turn;
    }
    if boid.position.x > bounds.width - margin {
        boid.velocity.x -= turn;
    }
    if boid.position.y < margin {
        boid.velocity.y += turn;
    }
    if boid.position.y > bounds.height - margin {
        boid.velocity.y -= turn;
    }
}
