// src/config.rs
// Defaults for a gasket run. Coordinates are clip-space units, so the
// default triangle fills the [-1, 1] square.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GasketError, Result};
use crate::generator::{PointGenerator, SeedStrategy};
use crate::geometry::{Point2, Triangle};
use crate::retained::PresentationMode;

pub const DEFAULT_POINT_COUNT: i64 = 5000;
pub const DEFAULT_VERTICES: [Point2; 3] = [
    Point2::new(-1.0, -1.0),
    Point2::new(0.0, 1.0),
    Point2::new(1.0, -1.0),
];
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasketConfig {
    pub vertices: Vec<Point2>,
    pub count: i64,
    pub seed_strategy: SeedStrategy,
    /// Fixed RNG seed for reproducible walks; entropy when absent.
    pub rng_seed: Option<u64>,
    pub color: [f32; 4],
    pub presentation: PresentationMode,
}

impl Default for GasketConfig {
    fn default() -> Self {
        Self {
            vertices: DEFAULT_VERTICES.to_vec(),
            count: DEFAULT_POINT_COUNT,
            seed_strategy: SeedStrategy::default(),
            rng_seed: None,
            color: DEFAULT_COLOR,
            presentation: PresentationMode::default(),
        }
    }
}

impl GasketConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GasketError::invalid(format!("malformed config: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            GasketError::invalid(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Checks the config and returns the triangle and step count it describes.
    pub fn validate(&self) -> Result<(Triangle, usize)> {
        let triangle = Triangle::from_points(&self.vertices)?;
        let count = PointGenerator::checked_count(self.count)?;
        Ok((triangle, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GasketConfig::default();
        let (triangle, count) = config.validate().unwrap();
        assert_eq!(count, 5000);
        assert_eq!(triangle.vertices(), &DEFAULT_VERTICES);
        assert_eq!(config.seed_strategy, SeedStrategy::EdgeMidpoints);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = GasketConfig::from_json_str(r#"{ "count": 12, "rng_seed": 9 }"#).unwrap();
        assert_eq!(config.count, 12);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.vertices, DEFAULT_VERTICES.to_vec());
        assert_eq!(config.presentation, PresentationMode::Uploaded);
    }

    #[test]
    fn test_seed_strategy_from_json() {
        let config = GasketConfig::from_json_str(
            r#"{ "seed_strategy": { "fixed": { "x": 0.0, "y": -0.5 } } }"#,
        )
        .unwrap();
        assert_eq!(config.seed_strategy, SeedStrategy::Fixed(Point2::new(0.0, -0.5)));

        let config = GasketConfig::from_json_str(r#"{ "seed_strategy": "random_interior" }"#).unwrap();
        assert_eq!(config.seed_strategy, SeedStrategy::RandomInterior);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GasketConfig::default();
        config.count = -3;
        assert!(matches!(config.validate(), Err(GasketError::InvalidArgument(_))));

        let mut config = GasketConfig::default();
        config.vertices.pop();
        assert!(matches!(config.validate(), Err(GasketError::InvalidArgument(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(GasketConfig::from_json_str("{ count: }").is_err());
        assert!(GasketConfig::load("/definitely/not/here.json").is_err());
    }
}
