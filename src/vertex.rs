// src/vertex.rs

use bytemuck::{Pod, Zeroable};

use crate::geometry::Point2;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Backend-neutral description of one vertex attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub offset: usize,
    pub shader_location: u32,
    pub components: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    pub array_stride: usize,
    pub attributes: &'static [VertexAttribute],
}

static ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        offset: 0,
        shader_location: 0,
        components: 2,
    },
    VertexAttribute {
        offset: std::mem::size_of::<[f32; 2]>(),
        shader_location: 1,
        components: 4,
    },
];

impl Vertex {
    pub fn new(position: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    pub fn from_point(point: Point2, color: [f32; 4]) -> Self {
        Self::new([point.x, point.y], color)
    }

    pub fn point(&self) -> Point2 {
        Point2::from(self.position)
    }

    pub fn layout() -> VertexLayout {
        VertexLayout {
            array_stride: std::mem::size_of::<Vertex>(),
            attributes: &ATTRIBUTES,
        }
    }
}

/// Packs points into vertices sharing one colour.
pub fn pack_points<'a, I>(points: I, color: [f32; 4]) -> Vec<Vertex>
where
    I: IntoIterator<Item = &'a Point2>,
{
    points
        .into_iter()
        .map(|p| Vertex::from_point(*p, color))
        .collect()
}

pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes.len(), 2);
    }

    #[test]
    fn test_pack_points_and_bytes() {
        let points = [Point2::new(0.5, -0.25), Point2::new(1.0, 2.0)];
        let color = [1.0, 0.0, 0.0, 1.0];
        let vertices = pack_points(&points, color);

        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0].point(), points[0]);
        assert_eq!(vertices[1].color, color);

        let bytes = as_bytes(&vertices);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<Vertex>());
        let first_x = f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(first_x, 0.5);
    }
}
