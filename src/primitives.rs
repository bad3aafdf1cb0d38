use crate::math::Vec3;
use crate::vertex::MeshVertex;
use std::f64::consts::{PI, TAU};

/// Indexed-free triangle list in object space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<[MeshVertex; 3]>,
}

impl Mesh {
    pub fn triangles(&self) -> &[[MeshVertex; 3]] {
        &self.triangles
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Adds a quad as two triangles (a, b, c) and (a, c, d)
    fn push_quad(&mut self, a: MeshVertex, b: MeshVertex, c: MeshVertex, d: MeshVertex) {
        self.triangles.push([a, b, c]);
        self.triangles.push([a, c, d]);
    }

    /// Adds a flat-shaded quad
    fn push_face(&mut self, normal: Vec3, corners: [Vec3; 4]) {
        let [a, b, c, d] = corners.map(|p| MeshVertex::new(p, normal));
        self.push_quad(a, b, c, d);
    }
}

/// Axis-aligned box centred on the origin
pub fn solid_box(width: f64, height: f64, depth: f64) -> Mesh {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let v = Vec3::new;
    let mut mesh = Mesh::default();

    // Front, back, top, bottom, right, left
    mesh.push_face(Vec3::z(), [v(-x, -y, z), v(x, -y, z), v(x, y, z), v(-x, y, z)]);
    mesh.push_face(-Vec3::z(), [v(-x, -y, -z), v(-x, y, -z), v(x, y, -z), v(x, -y, -z)]);
    mesh.push_face(Vec3::y(), [v(-x, y, -z), v(-x, y, z), v(x, y, z), v(x, y, -z)]);
    mesh.push_face(-Vec3::y(), [v(-x, -y, -z), v(x, -y, -z), v(x, -y, z), v(-x, -y, z)]);
    mesh.push_face(Vec3::x(), [v(x, -y, -z), v(x, y, -z), v(x, y, z), v(x, -y, z)]);
    mesh.push_face(-Vec3::x(), [v(-x, -y, -z), v(-x, -y, z), v(-x, y, z), v(-x, y, -z)]);
    mesh
}

/// Cube of edge `size` centred on the origin
pub fn solid_cube(size: f64) -> Mesh {
    solid_box(size, size, size)
}

/// UV sphere around the Z axis
pub fn solid_sphere(radius: f64, slices: u32, stacks: u32) -> Mesh {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let point = |slice: u32, stack: u32| {
        let theta = TAU * f64::from(slice) / f64::from(slices);
        let phi = -PI / 2.0 + PI * f64::from(stack) / f64::from(stacks);
        let normal = Vec3::new(phi.cos() * theta.cos(), phi.cos() * theta.sin(), phi.sin());
        MeshVertex::new(normal * radius, normal)
    };

    let mut mesh = Mesh::default();
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = point(slice, stack);
            let b = point(slice + 1, stack);
            let c = point(slice + 1, stack + 1);
            let d = point(slice, stack + 1);
            if stack == 0 {
                mesh.triangles.push([a, c, d]);
            } else if stack == stacks - 1 {
                mesh.triangles.push([a, b, c]);
            } else {
                mesh.push_quad(a, b, c, d);
            }
        }
    }
    mesh
}

/// Torus around the Z axis: `inner` is the tube radius, `outer` the distance
/// from the centre to the middle of the tube
pub fn solid_torus(inner: f64, outer: f64, sides: u32, rings: u32) -> Mesh {
    let sides = sides.max(3);
    let rings = rings.max(3);
    let point = |ring: u32, side: u32| {
        let theta = TAU * f64::from(ring) / f64::from(rings);
        let phi = TAU * f64::from(side) / f64::from(sides);
        let normal = Vec3::new(phi.cos() * theta.cos(), phi.cos() * theta.sin(), phi.sin());
        let centre = Vec3::new(theta.cos(), theta.sin(), 0.0) * outer;
        MeshVertex::new(centre + normal * inner, normal)
    };

    let mut mesh = Mesh::default();
    for ring in 0..rings {
        for side in 0..sides {
            mesh.push_quad(
                point(ring, side),
                point(ring + 1, side),
                point(ring + 1, side + 1),
                point(ring, side + 1),
            );
        }
    }
    mesh
}

/// Open cylinder (or cone frustum) from z = 0 to z = `height`
pub fn cylinder(base: f64, top: f64, height: f64, slices: u32, stacks: u32) -> Mesh {
    let slices = slices.max(3);
    let stacks = stacks.max(1);
    let slope = if height.abs() > f64::EPSILON {
        (base - top) / height
    } else {
        0.0
    };
    let point = |slice: u32, stack: u32| {
        let theta = TAU * f64::from(slice) / f64::from(slices);
        let t = f64::from(stack) / f64::from(stacks);
        let radius = base + (top - base) * t;
        let (sin, cos) = theta.sin_cos();
        let normal = Vec3::new(cos, sin, slope).normalize();
        MeshVertex::new(Vec3::new(cos * radius, sin * radius, height * t), normal)
    };

    let mut mesh = Mesh::default();
    for stack in 0..stacks {
        for slice in 0..slices {
            mesh.push_quad(
                point(slice, stack),
                point(slice + 1, stack),
                point(slice + 1, stack + 1),
                point(slice, stack + 1),
            );
        }
    }
    mesh
}

/// Horizontal square at height `y` spanning ±`half_extent` in X and Z, facing up
pub fn ground_quad(y: f64, half_extent: f64) -> Mesh {
    let e = half_extent;
    let mut mesh = Mesh::default();
    mesh.push_face(
        Vec3::y(),
        [
            Vec3::new(-e, y, -e),
            Vec3::new(e, y, -e),
            Vec3::new(e, y, e),
            Vec3::new(-e, y, e),
        ],
    );
    mesh
}
