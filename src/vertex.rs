use crate::math::Vec3;

/// Object-space vertex as emitted by the shape builders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        MeshVertex { position, normal }
    }
}

/// Vertex structure with eye-space position, screen position, depth, and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub screen_position: [f64; 2],
    /// Normalised device depth in [-1, 1]
    pub depth: f64,
    pub normal: Vec3,
}
