use flock_common::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One flocking agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Most recent positions, oldest first, truncated toward zero.
    history: VecDeque<(i32, i32)>,
}

impl Boid {
    /// Creates a boid with an empty trail.
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Boid {
            position,
            velocity,
            history: VecDeque::new(),
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Direction of travel in radians, used by renderers to rotate the sprite.
    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    pub fn history(&self) -> &VecDeque<(i32, i32)> {
        &self.history
    }

    /// Appends the current position to the trail and drops the oldest points beyond `max_len`.
    pub(crate) fn record_position(&mut self, max_len: usize) {
        self.history.push_back(self.position.truncate_to_i32());
        self.truncate_history(max_len);
    }

    pub(crate) fn truncate_history(&mut self, max_len: usize) {
        while self.history.len() > max_len {
            self.history.pop_front();
        }
    }
}

/// Euclidean distance between two boids' positions.
#[inline(always)]
pub fn distance(a: &Boid, b: &Boid) -> f32 {
    a.position.distance(b.position)
}
