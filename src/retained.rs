// src/retained.rs

use glam::{Affine2, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GasketError, Result};
use crate::generator::{PointGenerator, PointSequence, VertexSelector};
use crate::geometry::{Point2, Triangle};
use crate::vertex::{self, Vertex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Draw each point as it is computed, keep nothing.
    Immediate,
    /// Keep the points, rebuild vertices on every redraw.
    Retained,
    /// Keep the points, build vertices once and reuse them until the transform changes.
    #[default]
    Uploaded,
}

/// Immediate-mode presentation: each vertex reaches `draw` the moment
/// its point is generated.
pub fn draw_immediate<S, F>(
    triangle: &Triangle,
    count: usize,
    seed: Point2,
    selector: &mut S,
    color: [f32; 4],
    mut draw: F,
) -> Result<()>
where
    S: VertexSelector + ?Sized,
    F: FnMut(Vertex),
{
    PointGenerator::stream(triangle, count, seed, selector, |p| {
        draw(Vertex::from_point(p, color))
    })
}

/// Keeps a generated sequence around for redisplay.
///
/// The source sequence is never touched; transforms only affect the
/// staged vertices.
pub struct RetainedPoints {
    mode: PresentationMode,
    source: PointSequence,
    color: [f32; 4],
    transform: Affine2,
    staged: Vec<Vertex>,
    dirty: bool,
    staging_count: usize,
    redraw_count: usize,
}

impl RetainedPoints {
    pub fn new(mode: PresentationMode, source: PointSequence, color: [f32; 4]) -> Result<Self> {
        if mode == PresentationMode::Immediate {
            return Err(GasketError::invalid(
                "immediate presentation does not retain points; use draw_immediate",
            ));
        }

        let mut retained = Self {
            mode,
            source,
            color,
            transform: Affine2::IDENTITY,
            staged: Vec::new(),
            dirty: true,
            staging_count: 0,
            redraw_count: 0,
        };
        if mode == PresentationMode::Uploaded {
            retained.stage();
        }
        Ok(retained)
    }

    fn stage(&mut self) {
        let transform = self.transform;
        let transformed: Vec<Point2> = self
            .source
            .iter()
            .map(|p| transform.transform_point2(Vec2::from(*p)).into())
            .collect();
        self.staged = vertex::pack_points(&transformed, self.color);
        self.staging_count += 1;
        self.dirty = false;
        debug!("staged {} vertices ({:?})", self.staged.len(), self.mode);
    }

    /// Composes `transform` on top of any earlier request.
    pub fn apply_transform(&mut self, transform: Affine2) {
        self.transform = transform * self.transform;
        self.dirty = true;
    }

    pub fn reset_transform(&mut self) {
        self.transform = Affine2::IDENTITY;
        self.dirty = true;
    }

    pub fn redraw(&mut self) -> &[Vertex] {
        match self.mode {
            PresentationMode::Retained => self.stage(),
            PresentationMode::Uploaded => {
                if self.dirty {
                    self.stage();
                }
            }
            PresentationMode::Immediate => unreachable!("rejected by RetainedPoints::new"),
        }
        self.redraw_count += 1;
        &self.staged
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.staged
    }

    pub fn as_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.staged)
    }

    /// Staged vertices inside clip coordinates [-1, 1] on both axes.
    pub fn visible_count(&self) -> usize {
        self.staged
            .iter()
            .filter(|v| v.position.iter().all(|c| (-1.0..=1.0).contains(c)))
            .count()
    }

    pub fn source(&self) -> &PointSequence {
        &self.source
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    pub fn staging_count(&self) -> usize {
        self.staging_count
    }

    pub fn redraw_count(&self) -> usize {
        self.redraw_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ScriptedSelector, UniformSelector};

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    fn canonical() -> Triangle {
        Triangle::new(
            Point2::new(-1.0, -1.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, -1.0),
        )
    }

    fn walk(count: usize) -> PointSequence {
        let tri = canonical();
        PointGenerator::generate_with(&tri, count, tri.edge_midpoint_seed(), &mut UniformSelector::from_seed(17)).unwrap()
    }

    #[test]
    fn test_immediate_mode_is_not_retained() {
        let result = RetainedPoints::new(PresentationMode::Immediate, walk(10), WHITE);
        assert!(matches!(result, Err(GasketError::InvalidArgument(_))));
    }

    #[test]
    fn test_draw_immediate_emits_every_point() {
        let tri = canonical();
        let mut selector = ScriptedSelector::new([0, 2, 1]).unwrap();
        let mut drawn = Vec::new();
        draw_immediate(&tri, 3, Point2::new(0.0, -0.5), &mut selector, WHITE, |v| drawn.push(v)).unwrap();

        assert_eq!(drawn.len(), 4);
        assert_eq!(drawn[1].position, [-0.5, -0.75]);
        assert_eq!(drawn[3].position, [0.125, 0.0625]);
    }

    #[test]
    fn test_uploaded_stages_once_until_transformed() {
        let mut points = RetainedPoints::new(PresentationMode::Uploaded, walk(100), WHITE).unwrap();
        assert_eq!(points.staging_count(), 1);

        for _ in 0..5 {
            assert_eq!(points.redraw().len(), 101);
        }
        assert_eq!(points.staging_count(), 1);
        assert_eq!(points.redraw_count(), 5);

        points.apply_transform(Affine2::from_scale(Vec2::splat(0.5)));
        points.redraw();
        points.redraw();
        assert_eq!(points.staging_count(), 2);
    }

    #[test]
    fn test_retained_restages_every_redraw() {
        let mut points = RetainedPoints::new(PresentationMode::Retained, walk(50), WHITE).unwrap();
        assert_eq!(points.staging_count(), 0);
        assert!(points.vertices().is_empty());

        points.redraw();
        points.redraw();
        points.redraw();
        assert_eq!(points.staging_count(), 3);
        assert_eq!(points.vertices().len(), 51);
    }

    #[test]
    fn test_transform_leaves_source_untouched() {
        let source = walk(20);
        let mut points = RetainedPoints::new(PresentationMode::Uploaded, source.clone(), WHITE).unwrap();

        points.apply_transform(Affine2::from_translation(Vec2::new(3.0, 0.0)));
        let staged = points.redraw().to_vec();

        assert_eq!(points.source(), &source);
        for (v, p) in staged.iter().zip(source.iter()) {
            assert_eq!(v.position, [p.x + 3.0, p.y]);
        }
        assert_eq!(points.visible_count(), 0);

        points.reset_transform();
        points.redraw();
        assert_eq!(points.visible_count(), 21);
    }

    #[test]
    fn test_transforms_compose() {
        let mut points = RetainedPoints::new(PresentationMode::Uploaded, walk(0), WHITE).unwrap();
        points.apply_transform(Affine2::from_scale(Vec2::splat(2.0)));
        points.apply_transform(Affine2::from_translation(Vec2::new(1.0, 1.0)));

        // seed (-0.25, -0.5) scaled then shifted
        assert_eq!(points.redraw()[0].position, [0.5, 0.0]);
    }

    #[test]
    fn test_modes_report_their_staging() {
        for mode in [PresentationMode::Retained, PresentationMode::Uploaded] {
            let mut points = RetainedPoints::new(mode, walk(4), WHITE).unwrap();
            assert_eq!(points.mode(), mode);
            assert_eq!(points.redraw().len(), 5);
            assert_eq!(points.staging_count(), 1);
        }
    }

    #[test]
    fn test_bytes_cover_all_staged_vertices() {
        let points = RetainedPoints::new(PresentationMode::Uploaded, walk(9), WHITE).unwrap();
        assert_eq!(points.as_bytes().len(), 10 * std::mem::size_of::<Vertex>());
    }
}
