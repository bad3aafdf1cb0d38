pub use nalgebra::{Matrix3, Matrix4, Point3, Unit, Vector3, Vector4};

/// 3D vector type, also used for RGB colours
pub type Vec3 = Vector3<f64>;

/// 4x4 homogeneous transform
pub type Mat4 = Matrix4<f64>;

/// Translation matrix, as `glTranslate`
pub fn translation(offset: &Vec3) -> Mat4 {
    Mat4::new_translation(offset)
}

/// Rotation of `degrees` about `axis`, as `glRotate`.
///
/// The axis does not need to be normalised. A zero axis yields the identity.
pub fn rotation(degrees: f64, axis: &Vec3) -> Mat4 {
    match Unit::try_new(*axis, f64::EPSILON) {
        Some(axis) => Mat4::from_axis_angle(&axis, degrees.to_radians()),
        None => Mat4::identity(),
    }
}

/// Non-uniform scaling matrix, as `glScale`
pub fn scaling(factors: &Vec3) -> Mat4 {
    Mat4::new_nonuniform_scaling(factors)
}

/// Perspective projection, as `gluPerspective`
pub fn perspective(fovy_degrees: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    Mat4::new_perspective(aspect, fovy_degrees.to_radians(), near, far)
}

/// Inverse-transpose of the upper 3x3 block, used to carry normals into eye space
pub fn normal_matrix(modelview: &Mat4) -> Matrix3<f64> {
    let linear: Matrix3<f64> = modelview.fixed_view::<3, 3>(0, 0).into_owned();
    linear
        .try_inverse()
        .map(|inverse| inverse.transpose())
        .unwrap_or(linear)
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotation_normalises_axis() {
        let p = Vector4::new(1.0, 0.0, 0.0, 1.0);
        let scaled_axis = rotation(90.0, &Vec3::new(0.0, 2.0, 0.0)) * p;
        let unit_axis = rotation(90.0, &Vec3::y()) * p;
        assert_relative_eq!(scaled_axis, unit_axis, epsilon = 1e-12);
        assert_relative_eq!(unit_axis, Vector4::new(0.0, 0.0, -1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_axis_rotation_is_identity() {
        assert_eq!(rotation(45.0, &Vec3::zeros()), Mat4::identity());
    }

    #[test]
    fn hinge_sequence_keeps_hinge_edge_fixed() {
        // translate to hinge, rotate, translate back: the left edge of the door stays put
        let hinge = translation(&Vec3::new(-15.0, -10.0, 5.0))
            * rotation(120.0, &Vec3::y())
            * translation(&Vec3::new(15.0, 0.0, 0.0));
        let edge = hinge * Vector4::new(-15.0, 3.0, 0.0, 1.0);
        assert_relative_eq!(edge, Vector4::new(-15.0, -7.0, 5.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let m = scaling(&Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(&m) * Vec3::new(1.0, 1.0, 0.0);
        assert_relative_eq!(n, Vec3::new(0.5, 1.0, 0.0), epsilon = 1e-12);
    }
}
