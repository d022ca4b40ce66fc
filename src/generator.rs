// src/generator.rs

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{GasketError, Result};
use crate::geometry::{Point2, Triangle};

/// Picks which of the three triangle vertices the next step moves toward.
///
/// Implementations must return an index in `0..3`; the generator rejects
/// anything else with `InvalidArgument`.
pub trait VertexSelector {
    fn select(&mut self) -> usize;
}

impl<S: VertexSelector + ?Sized> VertexSelector for &mut S {
    fn select(&mut self) -> usize {
        (**self).select()
    }
}

/// Independent, uniform choice over {0, 1, 2}.
pub struct UniformSelector<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformSelector<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> VertexSelector for UniformSelector<R> {
    fn select(&mut self) -> usize {
        self.rng.gen_range(0..3)
    }
}

/// Replays a fixed list of vertex indices, starting over once exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedSelector {
    indices: Vec<usize>,
    cursor: usize,
}

impl ScriptedSelector {
    pub fn new(indices: impl Into<Vec<usize>>) -> Result<Self> {
        let indices = indices.into();
        if indices.is_empty() {
            return Err(GasketError::invalid("scripted index sequence is empty"));
        }
        if let Some(bad) = indices.iter().find(|&&i| i >= 3) {
            return Err(GasketError::invalid(format!(
                "vertex index {} out of range 0..3",
                bad
            )));
        }
        Ok(Self { indices, cursor: 0 })
    }
}

impl VertexSelector for ScriptedSelector {
    fn select(&mut self) -> usize {
        let index = self.indices[self.cursor];
        self.cursor = (self.cursor + 1) % self.indices.len();
        index
    }
}

/// How the first point of a walk is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// Midpoint of the midpoints of edges v0-v1 and v0-v2.
    #[default]
    EdgeMidpoints,
    RandomInterior,
    Fixed(Point2),
}

impl SeedStrategy {
    pub fn resolve<R: Rng + ?Sized>(&self, triangle: &Triangle, rng: &mut R) -> Point2 {
        match self {
            SeedStrategy::EdgeMidpoints => triangle.edge_midpoint_seed(),
            SeedStrategy::RandomInterior => triangle.random_interior_point(rng),
            SeedStrategy::Fixed(p) => *p,
        }
    }
}

/// Ordered points produced by one walk; the seed is always first.
///
/// Only the generator appends; callers get read access.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PointSequence {
    points: Vec<Point2>,
}

impl PointSequence {
    fn with_capacity(capacity: usize) -> Self {
        Self { points: Vec::with_capacity(capacity) }
    }

    fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn seed(&self) -> Option<Point2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point2> {
        self.points.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Point2> {
        self.points.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point2] {
        &self.points
    }

    pub fn into_vec(self) -> Vec<Point2> {
        self.points
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point2;
    type IntoIter = std::slice::Iter<'a, Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

pub struct PointGenerator;

impl PointGenerator {
    /// Walks `count` steps from `seed` using an entropy-seeded uniform selector.
    ///
    /// Fails with `InvalidArgument` when `vertices` is not exactly three
    /// points or `count` is negative.
    pub fn generate(vertices: &[Point2], count: i64, seed: Point2) -> Result<PointSequence> {
        let triangle = Triangle::from_points(vertices)?;
        let count = Self::checked_count(count)?;
        let mut selector = UniformSelector::from_entropy();
        Self::generate_with(&triangle, count, seed, &mut selector)
    }

    pub fn checked_count(count: i64) -> Result<usize> {
        usize::try_from(count)
            .map_err(|_| GasketError::invalid(format!("count must be >= 0, got {}", count)))
    }

    /// Fails only if `selector` hands back an index outside `0..3`.
    pub fn generate_with<S: VertexSelector + ?Sized>(
        triangle: &Triangle,
        count: usize,
        seed: Point2,
        selector: &mut S,
    ) -> Result<PointSequence> {
        debug!("generating {} points from seed ({}, {})", count, seed.x, seed.y);
        if !triangle.contains(&seed, 1e-6) {
            warn!("seed ({}, {}) lies outside the triangle; early points will be off the gasket", seed.x, seed.y);
        }

        let mut sequence = PointSequence::with_capacity(count.saturating_add(1));
        Self::stream(triangle, count, seed, selector, |p| sequence.push(p))?;
        Ok(sequence)
    }

    /// Immediate-mode walk: hands each point to `sink` as soon as it is
    /// computed, seed first, and keeps nothing but the current point.
    pub fn stream<S, F>(
        triangle: &Triangle,
        count: usize,
        seed: Point2,
        selector: &mut S,
        mut sink: F,
    ) -> Result<()>
    where
        S: VertexSelector + ?Sized,
        F: FnMut(Point2),
    {
        let mut current = seed;
        sink(current);
        for _ in 0..count {
            let index = selector.select();
            let target = triangle.vertex(index).ok_or_else(|| {
                GasketError::invalid(format!("selector returned vertex index {}, expected 0..3", index))
            })?;
            current = current.midpoint(&target);
            sink(current);
        }
        Ok(())
    }
}
