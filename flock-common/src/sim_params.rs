use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Width and height of the area boids are steered to stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }

    /// Rejects zero, negative and non-finite extents.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            anyhow::bail!("bounds width must be positive, got {}.", self.width);
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            anyhow::bail!("bounds height must be positive, got {}.", self.height);
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(1920.0, 1080.0)
    }
}

/// Tunables read by every simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    pub population_size: usize,
    /// Neighbor radius for cohesion and alignment.
    pub visual_range: f32,
    /// Separation kicks in below this distance.
    pub min_distance: f32,
    pub centering_factor: f32,
    pub avoid_factor: f32,
    pub matching_factor: f32,
    pub speed_limit: f32,
    /// Distance from an edge at which boids start turning back.
    pub margin: f32,
    pub turn_factor: f32,
    /// Number of trail points kept per boid.
    pub history_length: usize,
    pub bounds: Bounds,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            population_size: 12,
            visual_range: 75.0,
            min_distance: 20.0,
            centering_factor: 0.05,
            avoid_factor: 0.05,
            matching_factor: 0.05,
            speed_limit: 15.0,
            margin: 200.0,
            turn_factor: 1.0,
            history_length: 50,
            bounds: Bounds::default(),
        }
    }
}

impl SimParams {
    /// Checks every tunable so that a step can never produce NaN from a bad parameter.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;

        let non_negative = [
            ("visual_range", self.visual_range),
            ("min_distance", self.min_distance),
            ("margin", self.margin),
            ("centering_factor", self.centering_factor),
            ("avoid_factor", self.avoid_factor),
            ("matching_factor", self.matching_factor),
            ("turn_factor", self.turn_factor),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a non-negative number, got {}.", name, value);
            }
        }

        if !self.speed_limit.is_finite() || self.speed_limit <= 0.0 {
            anyhow::bail!("speed_limit must be positive, got {}.", self.speed_limit);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.population_size, 12);
        assert_eq!(params.history_length, 50);
        assert_eq!(params.speed_limit, 15.0);
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(Bounds::new(0.0, 10.0).validate().is_err());
        assert!(Bounds::new(10.0, -1.0).validate().is_err());
        assert!(Bounds::new(f32::NAN, 10.0).validate().is_err());
        assert!(Bounds::new(f32::INFINITY, 10.0).validate().is_err());
        assert!(Bounds::new(1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn rejects_bad_tunables() {
        let params = SimParams { speed_limit: 0.0, ..SimParams::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("speed_limit"));

        let params = SimParams { visual_range: -1.0, ..SimParams::default() };
        assert!(params.validate().is_err());

        let params = SimParams { avoid_factor: f32::NAN, ..SimParams::default() };
        assert!(params.validate().is_err());

        let params = SimParams { centering_factor: -0.05, ..SimParams::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn turn_factor_and_blend_factors_must_not_be_negative() {
        let params = SimParams { turn_factor: -1.0, ..SimParams::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("turn_factor"));

        let params = SimParams { avoid_factor: -0.05, ..SimParams::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("avoid_factor"));

        let params = SimParams { matching_factor: -0.01, ..SimParams::default() };
        assert!(params.validate().is_err());

        // Zero switches a rule off and stays valid.
        let params = SimParams {
            turn_factor: 0.0,
            centering_factor: 0.0,
            avoid_factor: 0.0,
            matching_factor: 0.0,
            ..SimParams::default()
        };
        assert!(params.validate().is_ok());
    }
}
