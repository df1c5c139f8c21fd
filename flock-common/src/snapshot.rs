use serde::{Deserialize, Serialize};

/// State of a single boid as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoidSample {
    pub x: f32,
    pub y: f32,
    /// Direction of travel in radians, `atan2(dy, dx)`.
    pub heading: f32,
    pub trail: Option<Vec<(i32, i32)>>,
}

/// A snapshot of the flock and its metrics at a specific tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// The tick at which the snapshot was taken (0 = freshly initialized).
    pub tick: u64,
    pub boid_count: u32,
    pub mean_speed: f32,
    pub max_speed: f32,
    /// `neighbor_counts_distribution[N]` is the number of boids with exactly N others within the visual range.
    /// The last bin also absorbs every count above it.
    pub neighbor_counts_distribution: Vec<u32>,
    // Always written, even as null: bincode has no field names to skip by.
    pub boids: Option<Vec<BoidSample>>,
}
