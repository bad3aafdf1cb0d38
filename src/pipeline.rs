use crate::graphics::{draw_triangle, Framebuffer};
use crate::lighting::{shade, Light, Material};
use crate::math::{
    normal_matrix, perspective, rotation, scaling, translation, Mat4, Point3, Vec3, Vector4,
};
use crate::primitives::Mesh;
use crate::vertex::{MeshVertex, Vertex};

pub const FIELD_OF_VIEW: f64 = 45.0;
pub const NEAR_PLANE: f64 = 1.0;
pub const FAR_PLANE: f64 = 200.0;

/// Light blue-grey background
pub const CLEAR_COLOR: [f64; 3] = [0.9, 0.9, 0.95];

/// Immediate-mode drawing interface.
///
/// Transforms compose onto the current modelview matrix; `push_matrix` and
/// `pop_matrix` save and restore it.
pub trait Canvas {
    fn clear(&mut self);
    fn load_identity(&mut self);
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn translate(&mut self, offset: &Vec3);
    fn rotate(&mut self, degrees: f64, axis: &Vec3);
    fn scale(&mut self, factors: &Vec3);
    fn set_color(&mut self, color: &Vec3);
    fn set_lighting(&mut self, enabled: bool);
    fn draw_mesh(&mut self, mesh: &Mesh);
    /// Places `text` at `anchor`, transformed like any vertex
    fn raster_text(&mut self, anchor: &Vec3, text: &str);
    /// Finishes the frame and makes it visible
    fn present(&mut self);

    /// Runs `draw` between a push and the matching pop
    fn scoped<F>(&mut self, draw: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        self.push_matrix();
        draw(self);
        self.pop_matrix();
    }
}

/// Text positioned in window coordinates for the frame it was emitted in
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Vec3,
}

/// Software implementation of [`Canvas`]
pub struct Pipeline {
    back: Framebuffer,
    front: Framebuffer,
    back_labels: Vec<Label>,
    front_labels: Vec<Label>,
    projection: Mat4,
    modelview: Mat4,
    stack: Vec<Mat4>,
    color: Vec3,
    lighting: bool,
    lights: Vec<Light>,
    material: Material,
    clear_color: Vec3,
}

impl Pipeline {
    pub fn new(width: usize, height: usize) -> Self {
        let mut pipeline = Pipeline {
            back: Framebuffer::new(width, height),
            front: Framebuffer::new(width, height),
            back_labels: Vec::new(),
            front_labels: Vec::new(),
            projection: Mat4::identity(),
            modelview: Mat4::identity(),
            stack: Vec::new(),
            color: Vec3::repeat(1.0),
            lighting: true,
            lights: vec![Light::key(), Light::fill()],
            material: Material::default(),
            clear_color: Vec3::from(CLEAR_COLOR),
        };
        pipeline.update_projection();
        pipeline
    }

    /// Adopts a new viewport size and recomputes the projection.
    ///
    /// Does nothing when the size is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.back.width() && height == self.back.height() {
            return;
        }
        log::debug!("viewport resized to {width}x{height}");
        self.back = Framebuffer::new(width, height);
        self.front = Framebuffer::new(width, height);
        self.back_labels.clear();
        self.front_labels.clear();
        self.update_projection();
    }

    fn update_projection(&mut self) {
        // An empty viewport still needs a valid projection
        let width = self.back.width().max(1) as f64;
        let height = self.back.height().max(1) as f64;
        self.projection = perspective(FIELD_OF_VIEW, width / height, NEAR_PLANE, FAR_PLANE);
    }

    pub fn lighting_enabled(&self) -> bool {
        self.lighting
    }

    #[cfg(test)]
    pub fn modelview(&self) -> &Mat4 {
        &self.modelview
    }

    #[cfg(test)]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// The last presented frame
    pub fn front(&self) -> &Framebuffer {
        &self.front
    }

    /// Labels belonging to the last presented frame
    pub fn labels(&self) -> &[Label] {
        &self.front_labels
    }

    /// Projects an eye-space point to window coordinates and NDC depth.
    ///
    /// Returns `None` outside the clip volume.
    fn project(&self, eye: &Point3<f64>) -> Option<([f64; 2], f64)> {
        let clip: Vector4<f64> = self.projection * eye.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if ndc.iter().any(|c| !(-1.0..=1.0).contains(c)) {
            return None;
        }
        let width = self.back.width() as f64;
        let height = self.back.height() as f64;
        let screen = [(ndc.x + 1.0) / 2.0 * width, (1.0 - ndc.y) / 2.0 * height];
        Some((screen, ndc.z))
    }

    /// Projects an eye-space vertex produced by the near-plane clip
    fn to_window(&self, eye: &MeshVertex) -> Vertex {
        let clip = self.projection * Point3::from(eye.position).to_homogeneous();
        let ndc = clip.xyz() / clip.w;
        let width = self.back.width() as f64;
        let height = self.back.height() as f64;
        Vertex {
            position: eye.position,
            screen_position: [(ndc.x + 1.0) / 2.0 * width, (1.0 - ndc.y) / 2.0 * height],
            depth: ndc.z,
            normal: eye.normal.try_normalize(f64::EPSILON).unwrap_or_else(Vec3::z),
        }
    }
}

/// Clips an eye-space triangle to the visible side of the near plane.
///
/// Returns the clipped polygon as 0, 3 or 4 vertices in winding order.
/// Positions and normals of new vertices are interpolated along the cut edge.
fn clip_to_near_plane(triangle: &[MeshVertex; 3]) -> Vec<MeshVertex> {
    let inside = |v: &MeshVertex| v.position.z <= -NEAR_PLANE;
    let mut polygon = Vec::with_capacity(4);
    for (i, current) in triangle.iter().enumerate() {
        let next = &triangle[(i + 1) % 3];
        if inside(current) {
            polygon.push(*current);
        }
        if inside(current) != inside(next) {
            let t = (-NEAR_PLANE - current.position.z) / (next.position.z - current.position.z);
            polygon.push(MeshVertex::new(
                current.position.lerp(&next.position, t),
                current.normal.lerp(&next.normal, t),
            ));
        }
    }
    polygon
}

impl Canvas for Pipeline {
    fn clear(&mut self) {
        self.back.clear(&self.clear_color);
        self.back_labels.clear();
    }

    fn load_identity(&mut self) {
        self.modelview = Mat4::identity();
    }

    fn push_matrix(&mut self) {
        self.stack.push(self.modelview);
    }

    fn pop_matrix(&mut self) {
        match self.stack.pop() {
            Some(saved) => self.modelview = saved,
            None => log::warn!("pop_matrix on an empty matrix stack ignored"),
        }
    }

    fn translate(&mut self, offset: &Vec3) {
        self.modelview *= translation(offset);
    }

    fn rotate(&mut self, degrees: f64, axis: &Vec3) {
        self.modelview *= rotation(degrees, axis);
    }

    fn scale(&mut self, factors: &Vec3) {
        self.modelview *= scaling(factors);
    }

    fn set_color(&mut self, color: &Vec3) {
        self.color = *color;
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.lighting = enabled;
    }

    fn draw_mesh(&mut self, mesh: &Mesh) {
        let normals = normal_matrix(&self.modelview);
        let color = self.color;
        let lit = self.lighting;
        for corners in mesh.triangles() {
            let eye = corners.map(|corner| {
                MeshVertex::new(
                    self.modelview.transform_point(&Point3::from(corner.position)).coords,
                    normals * corner.normal,
                )
            });
            let polygon = clip_to_near_plane(&eye);
            // Fan out the clipped polygon
            for i in 1..polygon.len().saturating_sub(1) {
                let [v0, v1, v2] =
                    [polygon[0], polygon[i], polygon[i + 1]].map(|v| self.to_window(&v));
                let (lights, material) = (&self.lights, &self.material);
                draw_triangle(&v0, &v1, &v2, &mut self.back, |position, normal| {
                    if lit {
                        shade(&color, position, normal, lights, material)
                    } else {
                        color
                    }
                });
            }
        }
    }

    fn raster_text(&mut self, anchor: &Vec3, text: &str) {
        let eye = self.modelview.transform_point(&Point3::from(*anchor));
        match self.project(&eye) {
            Some(([x, y], _)) => self.back_labels.push(Label {
                x,
                y,
                text: text.to_owned(),
                color: self.color,
            }),
            None => log::trace!("label {text:?} clipped"),
        }
    }

    fn present(&mut self) {
        std::mem::swap(&mut self.back, &mut self.front);
        std::mem::swap(&mut self.back_labels, &mut self.front_labels);
    }
}
