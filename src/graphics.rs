use crate::math::{edge_function, Vec3};
use crate::vertex::Vertex;

/// RGBA colour buffer with a matching depth buffer
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    depth: Vec<f64>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            depth: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel data in RGBA order, row-major from the top-left corner
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Resets every pixel to `color` and every depth sample to infinity
    pub fn clear(&mut self, color: &Vec3) {
        let rgba = to_rgba8(color);
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
        self.depth.fill(f64::INFINITY);
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * 4;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    #[cfg(test)]
    pub fn depth_at(&self, x: usize, y: usize) -> f64 {
        self.depth[y * self.width + x]
    }

    /// Writes `color` at (x, y) if `depth` passes a less-than test
    fn plot(&mut self, x: usize, y: usize, depth: f64, color: &Vec3) -> bool {
        let offset = y * self.width + x;
        if depth >= self.depth[offset] {
            return false;
        }
        self.depth[offset] = depth;
        self.pixels[offset * 4..offset * 4 + 4].copy_from_slice(&to_rgba8(color));
        true
    }
}

/// Converts a [0, 1] colour to opaque RGBA bytes
pub fn to_rgba8(color: &Vec3) -> [u8; 4] {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Draws a triangle with per-pixel shading.
///
/// Both windings are filled. `shade` receives the interpolated eye-space
/// position and unit normal of each covered pixel. Returns the number of
/// pixels written.
pub fn draw_triangle<F>(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    framebuffer: &mut Framebuffer,
    shade: F,
) -> usize
where
    F: Fn(&Vec3, &Vec3) -> Vec3,
{
    if framebuffer.width == 0 || framebuffer.height == 0 {
        return 0;
    }

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0);
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(framebuffer.width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0);
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(framebuffer.height as f64 - 1.0);
    if !(min_x <= max_x && min_y <= max_y) {
        return 0;
    }

    // Precompute area of the triangle
    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area.abs() < f64::EPSILON {
        return 0;
    }

    let mut written = 0;
    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Dividing by the signed area makes all three weights positive
            // inside the triangle regardless of winding
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
            if !(-1.0..=1.0).contains(&depth) {
                continue;
            }

            let position = v0.position * w0 + v1.position * w1 + v2.position * w2;
            let normal = (v0.normal * w0 + v1.normal * w1 + v2.normal * w2)
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(Vec3::z);

            if framebuffer.plot(x, y, depth, &shade(&position, &normal)) {
                written += 1;
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f64, y: f64, depth: f64) -> Vertex {
        Vertex {
            position: Vec3::new(x, y, -depth),
            screen_position: [x, y],
            depth,
            normal: Vec3::z(),
        }
    }

    #[test]
    fn clear_fills_colour_and_resets_depth() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(&Vec3::new(1.0, 0.0, 0.5));
        assert_eq!(fb.pixel(3, 2), [255, 0, 128, 255]);
        assert_eq!(fb.depth_at(0, 0), f64::INFINITY);
    }

    #[test]
    fn both_windings_are_filled() {
        let red = Vec3::new(1.0, 0.0, 0.0);
        let mut fb = Framebuffer::new(10, 10);
        fb.clear(&Vec3::zeros());
        let (a, b, c) = (vertex(0.0, 0.0, 0.0), vertex(10.0, 0.0, 0.0), vertex(0.0, 10.0, 0.0));
        let forward = draw_triangle(&a, &b, &c, &mut fb, |_, _| red);
        assert!(forward > 0);
        assert_eq!(fb.pixel(1, 1), [255, 0, 0, 255]);

        let mut fb = Framebuffer::new(10, 10);
        let backward = draw_triangle(&a, &c, &b, &mut fb, |_, _| red);
        assert_eq!(forward, backward);
    }

    #[test]
    fn nearer_fragment_wins() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(&Vec3::zeros());
        let far = [vertex(0.0, 0.0, 0.5), vertex(8.0, 0.0, 0.5), vertex(0.0, 8.0, 0.5)];
        let near = [vertex(0.0, 0.0, -0.5), vertex(8.0, 0.0, -0.5), vertex(0.0, 8.0, -0.5)];
        draw_triangle(&near[0], &near[1], &near[2], &mut fb, |_, _| Vec3::y());
        let overdrawn = draw_triangle(&far[0], &far[1], &far[2], &mut fb, |_, _| Vec3::x());
        assert_eq!(overdrawn, 0);
        assert_eq!(fb.pixel(1, 1), [0, 255, 0, 255]);
    }

    #[test]
    fn offscreen_and_degenerate_triangles_write_nothing() {
        let mut fb = Framebuffer::new(8, 8);
        let off = [vertex(-20.0, -20.0, 0.0), vertex(-10.0, -20.0, 0.0), vertex(-20.0, -10.0, 0.0)];
        assert_eq!(draw_triangle(&off[0], &off[1], &off[2], &mut fb, |_, _| Vec3::x()), 0);
        let flat = [vertex(0.0, 0.0, 0.0), vertex(4.0, 4.0, 0.0), vertex(8.0, 8.0, 0.0)];
        assert_eq!(draw_triangle(&flat[0], &flat[1], &flat[2], &mut fb, |_, _| Vec3::x()), 0);
    }

    #[test]
    fn fragments_outside_depth_range_are_clipped() {
        let mut fb = Framebuffer::new(8, 8);
        let beyond = [vertex(0.0, 0.0, 1.5), vertex(8.0, 0.0, 1.5), vertex(0.0, 8.0, 1.5)];
        assert_eq!(draw_triangle(&beyond[0], &beyond[1], &beyond[2], &mut fb, |_, _| Vec3::x()), 0);
    }
}
