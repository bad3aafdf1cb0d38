use crate::math::Vec3;

/// Ambient term applied even when no light reaches a surface
pub const GLOBAL_AMBIENT: f64 = 0.2;

/// Positional light fixed in eye space
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Light {
    /// White key light from the upper right
    pub fn key() -> Self {
        Light {
            position: Vec3::new(30.0, 50.0, 30.0),
            ambient: Vec3::repeat(0.2),
            diffuse: Vec3::repeat(0.8),
            specular: Vec3::repeat(1.0),
        }
    }

    /// Softer fill light from the left, no highlight
    pub fn fill() -> Self {
        Light {
            position: Vec3::new(-30.0, 20.0, 20.0),
            ambient: Vec3::repeat(0.1),
            diffuse: Vec3::repeat(0.4),
            specular: Vec3::zeros(),
        }
    }
}

/// Surface response shared by every primitive; the current colour supplies
/// the ambient and diffuse reflectance.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub specular: Vec3,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            specular: Vec3::repeat(0.5),
            shininess: 50.0,
        }
    }
}

/// Fixed-function shading of one fragment.
///
/// `position` and `normal` are in eye space, `normal` unit length. The viewer
/// is at infinity along +Z.
pub fn shade(
    color: &Vec3,
    position: &Vec3,
    normal: &Vec3,
    lights: &[Light],
    material: &Material,
) -> Vec3 {
    let viewer = Vec3::z();
    let mut result = color * GLOBAL_AMBIENT;

    for light in lights {
        result += light.ambient.component_mul(color);

        let Some(to_light) = (light.position - position).try_normalize(f64::EPSILON) else {
            continue;
        };
        let diffuse = normal.dot(&to_light);
        if diffuse <= 0.0 {
            continue;
        }
        result += light.diffuse.component_mul(color) * diffuse;

        let half = (to_light + viewer).normalize();
        let highlight = normal.dot(&half).max(0.0).powf(material.shininess);
        result += light.specular.component_mul(&material.specular) * highlight;
    }

    result.map(|c| c.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unlit_side_gets_only_ambient() {
        let color = Vec3::new(0.5, 0.5, 0.5);
        let lights = [Light::key()];
        // facing away from the key light
        let shaded = shade(&color, &Vec3::zeros(), &-Vec3::y(), &lights, &Material::default());
        assert_relative_eq!(shaded, color * (GLOBAL_AMBIENT + 0.2), epsilon = 1e-12);
    }

    #[test]
    fn facing_light_adds_diffuse() {
        let color = Vec3::new(0.2, 0.1, 0.1);
        let light = Light {
            position: Vec3::new(0.0, 0.0, 10.0),
            ambient: Vec3::zeros(),
            diffuse: Vec3::repeat(1.0),
            specular: Vec3::zeros(),
        };
        let shaded = shade(&color, &Vec3::zeros(), &Vec3::z(), &[light], &Material::default());
        assert_relative_eq!(shaded, color * (GLOBAL_AMBIENT + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn highlight_is_clamped() {
        let light = Light {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..Light::key()
        };
        let shaded = shade(&Vec3::repeat(1.0), &Vec3::zeros(), &Vec3::z(), &[light], &Material::default());
        assert_relative_eq!(shaded, Vec3::repeat(1.0), epsilon = 1e-12);
    }

    #[test]
    fn fill_light_has_no_specular() {
        let fill = Light::fill();
        let towards = (fill.position).normalize();
        let color = Vec3::zeros();
        let shaded = shade(&color, &Vec3::zeros(), &towards, &[fill], &Material::default());
        assert_relative_eq!(shaded, Vec3::zeros(), epsilon = 1e-12);
    }
}
