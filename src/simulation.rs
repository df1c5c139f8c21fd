use crate::boid::{distance, Boid};
use crate::rules;
use anyhow::Result;
use flock_common::{BoidSample, Bounds, OutputConfig, SimParams, Snapshot, Vec2};
use log::{debug, info, trace, warn};
use rand::distr::Uniform;
use rand::prelude::*;
use rayon::prelude::*;

/// Initial velocity components are drawn from `[-INITIAL_VELOCITY_RANGE, INITIAL_VELOCITY_RANGE]`.
pub const INITIAL_VELOCITY_RANGE: f32 = 5.0;

const MAX_EXPECTED_NEIGHBORS: usize = 20; // Histogram size for snapshots; larger counts land in the last bin

/// How much per-boid detail a snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotDetail {
    /// Aggregate metrics only.
    Summary,
    /// Position and heading of every boid.
    Boids,
    /// Position, heading and a copy of the trail of every boid.
    BoidsWithTrails,
}

impl SnapshotDetail {
    pub fn from_output_config(output: &OutputConfig) -> Self {
        match (output.save_boids_in_snapshot, output.save_trails) {
            (false, _) => SnapshotDetail::Summary,
            (true, false) => SnapshotDetail::Boids,
            (true, true) => SnapshotDetail::BoidsWithTrails,
        }
    }
}

/// Owns the boid population and advances it one tick at a time.
///
/// `step` updates boids in population order and in place: each boid sees the already-moved
/// state of the boids before it. Hosts render between steps through the read accessors.
pub struct FlockSimulation {
    params: SimParams,
    boids: Vec<Boid>,
    rng: StdRng,
    tick: u64,
    recorded_snapshots: Vec<Snapshot>,
}

impl FlockSimulation {
    /// Creates a simulation and populates it with `params.population_size` random boids.
    /// A `seed` makes placement reproducible; without one the RNG is seeded from the OS.
    pub fn new(params: SimParams, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(params, rng)
    }

    /// Creates a simulation drawing initial placement from the given RNG.
    pub fn with_rng(params: SimParams, rng: StdRng) -> Result<Self> {
        params.validate()?;

        let mut sim = Self {
            params,
            boids: Vec::new(),
            rng,
            tick: 0,
            recorded_snapshots: Vec::new(),
        };
        sim.initialize(sim.params.population_size, sim.params.bounds)?;
        Ok(sim)
    }

    /// Replaces the whole population with `count` fresh boids inside `bounds`.
    /// Invalid bounds are rejected and leave the simulation unchanged.
    pub fn initialize(&mut self, count: usize, bounds: Bounds) -> Result<()> {
        bounds.validate()?;

        let x_dist = Uniform::new(0.0f32, bounds.width)?;
        let y_dist = Uniform::new(0.0f32, bounds.height)?;
        let v_dist = Uniform::new_inclusive(-INITIAL_VELOCITY_RANGE, INITIAL_VELOCITY_RANGE)?;

        let rng = &mut self.rng;
        self.boids = (0..count)
            .map(|_| {
                let position = Vec2::new(rng.sample(x_dist), rng.sample(y_dist));
                let velocity = Vec2::new(rng.sample(v_dist), rng.sample(v_dist));
                Boid::new(position, velocity)
            })
            .collect();

        self.params.population_size = count;
        self.params.bounds = bounds;
        self.tick = 0;
        self.recorded_snapshots.clear();

        info!(
            "Initialized {} boids in a {:.0}x{:.0} area.",
            count, bounds.width, bounds.height
        );
        Ok(())
    }

    /// Advances every boid by one tick.
    pub fn step(&mut self) {
        let params = &self.params;

        for idx in 0..self.boids.len() {
            let cohesion = rules::fly_towards_center(&self.boids, idx, params);
            self.boids[idx].velocity += cohesion;

            let separation = rules::avoid_others(&self.boids, idx, params);
            self.boids[idx].velocity += separation;

            let alignment = rules::match_velocity(&self.boids, idx, params);
            self.boids[idx].velocity += alignment;

            let boid = &mut self.boids[idx];
            rules::limit_speed(boid, params.speed_limit);
            // Turning runs after the cap so the correction is never clipped.
            rules::keep_within_bounds(boid, params);

            boid.position += boid.velocity;
            boid.record_position(params.history_length);
        }

        self.tick += 1;
        trace!("Tick {} complete for {} boids.", self.tick, self.boids.len());
    }

    /// Changes the area used for boundary turning without touching the population.
    pub fn resize(&mut self, bounds: Bounds) -> Result<()> {
        bounds.validate()?;
        debug!(
            "Resizing bounds from {:.0}x{:.0} to {:.0}x{:.0}.",
            self.params.bounds.width, self.params.bounds.height, bounds.width, bounds.height
        );
        self.params.bounds = bounds;
        Ok(())
    }

    /// Replaces the rule tunables between steps.
    ///
    /// `population_size` and `bounds` are kept as they are; change them through
    /// [`initialize`](Self::initialize) and [`resize`](Self::resize). Trails longer than the
    /// new `history_length` are cut immediately.
    pub fn reconfigure(&mut self, params: SimParams) -> Result<()> {
        let params = SimParams {
            population_size: self.params.population_size,
            bounds: self.params.bounds,
            ..params
        };
        params.validate()?;

        for boid in &mut self.boids {
            boid.truncate_history(params.history_length);
        }
        debug!("Reconfigured simulation: {:?}", params);
        self.params = params;
        Ok(())
    }

    /// Indices of the `n` boids closest to boid `idx`, nearest first, excluding `idx` itself.
    /// Equal distances keep population order.
    pub fn n_closest(&self, idx: usize, n: usize) -> Vec<usize> {
        let Some(boid) = self.boids.get(idx) else {
            return Vec::new();
        };

        let mut others: Vec<(usize, f32)> = self
            .boids
            .iter()
            .enumerate()
            .filter(|(other_idx, _)| *other_idx != idx)
            .map(|(other_idx, other)| (other_idx, distance(boid, other)))
            .collect();
        others.sort_by(|a, b| a.1.total_cmp(&b.1));

        others.into_iter().take(n).map(|(other_idx, _)| other_idx).collect()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Mutable access to existing boids. The population itself cannot grow or shrink this way.
    pub fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn boid_count(&self) -> usize {
        self.boids.len()
    }

    /// Number of steps taken since the last `initialize`.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn bounds(&self) -> Bounds {
        self.params.bounds
    }

    /// Retrieves the current positions of all boids as (x, y) tuples.
    pub fn final_positions(&self) -> Vec<(f32, f32)> {
        self.boids.iter().map(|b| (b.position.x, b.position.y)).collect()
    }

    /// Average speed over the population, 0.0 for an empty flock.
    pub fn mean_speed(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        self.boids.iter().map(Boid::speed).sum::<f32>() / self.boids.len() as f32
    }

    /// Counts, for every boid, the other boids within the visual range.
    fn calculate_neighbor_counts_parallel(&self) -> Vec<u32> {
        let boids = &self.boids;
        let visual_range = self.params.visual_range;

        (0..boids.len())
            .into_par_iter()
            .map(|idx| {
                boids
                    .iter()
                    .enumerate()
                    .filter(|&(other_idx, other)| {
                        other_idx != idx && distance(&boids[idx], other) < visual_range
                    })
                    .count() as u32
            })
            .collect()
    }

    /// Builds a snapshot of the current tick without storing it.
    pub fn snapshot(&self, detail: SnapshotDetail) -> Snapshot {
        let boid_count = self.boids.len();

        let mean_speed = self.mean_speed();
        let max_speed = self.boids.iter().map(Boid::speed).fold(0.0f32, f32::max);

        let mut neighbor_counts_distribution = vec![0u32; MAX_EXPECTED_NEIGHBORS + 1];
        let mut overflowed = 0usize;
        for count in self.calculate_neighbor_counts_parallel() {
            let count = count as usize;
            if count > MAX_EXPECTED_NEIGHBORS {
                overflowed += 1;
            }
            neighbor_counts_distribution[count.min(MAX_EXPECTED_NEIGHBORS)] += 1;
        }
        if overflowed > 0 {
            warn!(
                "{} boids have more than {} neighbors; counted in the last histogram bin.",
                overflowed, MAX_EXPECTED_NEIGHBORS
            );
        }

        let boids = match detail {
            SnapshotDetail::Summary => None,
            SnapshotDetail::Boids | SnapshotDetail::BoidsWithTrails => Some(
                self.boids
                    .iter()
                    .map(|boid| BoidSample {
                        x: boid.position.x,
                        y: boid.position.y,
                        heading: boid.heading(),
                        trail: (detail == SnapshotDetail::BoidsWithTrails)
                            .then(|| boid.history().iter().copied().collect()),
                    })
                    .collect(),
            ),
        };

        Snapshot {
            tick: self.tick,
            boid_count: boid_count as u32,
            mean_speed,
            max_speed,
            neighbor_counts_distribution,
            boids,
        }
    }

    /// Takes a snapshot of the current tick and stores it.
    pub fn record_snapshot(&mut self, detail: SnapshotDetail) {
        debug!("Recording snapshot at tick {}...", self.tick);
        let snapshot = self.snapshot(detail);
        self.recorded_snapshots.push(snapshot);
    }

    pub fn recorded_snapshots(&self) -> &[Snapshot] {
        &self.recorded_snapshots
    }
}
