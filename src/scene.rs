use crate::math::Vec3;
use crate::pipeline::Canvas;
use crate::primitives::{cylinder, ground_quad, solid_box, solid_cube, solid_sphere, solid_torus, Mesh};
use crate::state::AppState;

/// Angle of a rotation, either baked in or taken from the door at draw time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Fixed(f64),
    Door,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(Vec3),
    Rotate { angle: Angle, axis: Vec3 },
    Scale(Vec3),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Mesh(Mesh),
    /// Bitmap text placed at `anchor` in the part's local space
    Label { text: &'static str, anchor: Vec3 },
}

/// Node of the scene tree
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: &'static str,
    pub transforms: Vec<Transform>,
    pub color: Option<Vec3>,
    pub drawable: Option<Drawable>,
    pub children: Vec<Part>,
}

impl Part {
    pub fn new(name: &'static str) -> Self {
        Part {
            name,
            transforms: Vec::new(),
            color: None,
            drawable: None,
            children: Vec::new(),
        }
    }

    pub fn translate(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transforms.push(Transform::Translate(Vec3::new(x, y, z)));
        self
    }

    pub fn rotate(mut self, degrees: f64, axis: Vec3) -> Self {
        self.transforms.push(Transform::Rotate {
            angle: Angle::Fixed(degrees),
            axis,
        });
        self
    }

    /// Rotation by the current door angle
    pub fn hinge(mut self, axis: Vec3) -> Self {
        self.transforms.push(Transform::Rotate {
            angle: Angle::Door,
            axis,
        });
        self
    }

    pub fn scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transforms.push(Transform::Scale(Vec3::new(x, y, z)));
        self
    }

    pub fn color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.color = Some(Vec3::new(r, g, b));
        self
    }

    pub fn mesh(mut self, mesh: Mesh) -> Self {
        self.drawable = Some(Drawable::Mesh(mesh));
        self
    }

    pub fn label(mut self, text: &'static str, anchor: Vec3) -> Self {
        self.drawable = Some(Drawable::Label { text, anchor });
        self
    }

    pub fn child(mut self, part: Part) -> Self {
        self.children.push(part);
        self
    }

    /// Emits this part and its children inside one transform scope
    pub fn draw<C: Canvas>(&self, canvas: &mut C, door_angle: f64) {
        log::trace!("drawing {}", self.name);
        canvas.scoped(|canvas| {
            for transform in &self.transforms {
                match transform {
                    Transform::Translate(offset) => canvas.translate(offset),
                    Transform::Rotate { angle, axis } => {
                        let degrees = match angle {
                            Angle::Fixed(degrees) => *degrees,
                            Angle::Door => door_angle,
                        };
                        canvas.rotate(degrees, axis);
                    }
                    Transform::Scale(factors) => canvas.scale(factors),
                }
            }
            if let Some(color) = &self.color {
                canvas.set_color(color);
            }
            match &self.drawable {
                Some(Drawable::Mesh(mesh)) => canvas.draw_mesh(mesh),
                Some(Drawable::Label { text, anchor }) => canvas.raster_text(anchor, text),
                None => {}
            }
            for child in &self.children {
                child.draw(canvas, door_angle);
            }
        });
    }
}

const CABINET_RED: (f64, f64, f64) = (0.7, 0.15, 0.15);

fn alarm_button() -> Part {
    Part::new("alarm button")
        .translate(-8.0, 15.0, 5.5)
        .child(
            Part::new("frame")
                .color(0.1, 0.1, 0.1)
                .scale(3.0, 3.0, 0.5)
                .mesh(solid_cube(1.0)),
        )
        .child(
            Part::new("button")
                .color(0.9, 0.1, 0.1)
                .translate(0.0, 0.0, 0.5)
                .scale(2.0, 2.0, 0.8)
                .mesh(solid_cube(1.0)),
        )
}

fn connector() -> Part {
    Part::new("connector")
        .translate(4.0, 15.0, 5.5)
        .child(
            Part::new("body")
                .color(0.8, 0.1, 0.1)
                .scale(3.5, 3.5, 1.0)
                .mesh(solid_cube(1.0)),
        )
        .child(
            Part::new("detail")
                .color(0.9, 0.9, 0.9)
                .translate(0.0, 0.0, 0.6)
                .mesh(solid_sphere(0.8, 10, 10)),
        )
}

fn speaker_grid() -> Part {
    let hole = solid_sphere(0.3, 8, 8);
    let mut grid = Part::new("speaker grid").translate(12.0, 15.0, 5.3);
    for i in -2..=2 {
        for j in -2..=2 {
            grid = grid.child(
                Part::new("hole")
                    .color(0.2, 0.2, 0.2)
                    .translate(f64::from(i) * 1.2, f64::from(j) * 1.2, 0.0)
                    .mesh(hole.clone()),
            );
        }
    }
    grid
}

/// Door panel, handle and label swinging about the cabinet's left front edge
fn door() -> Part {
    Part::new("door")
        .translate(-15.0, -10.0, 5.0)
        .hinge(Vec3::y())
        .translate(15.0, 0.0, 0.0)
        .child(
            Part::new("panel")
                .color(0.65, 0.12, 0.12)
                .translate(0.0, 0.0, 0.3)
                .mesh(solid_box(30.0, 40.0, 1.0)),
        )
        .child(
            Part::new("handle")
                .color(0.8, 0.8, 0.8)
                .translate(12.0, -5.0, 0.8)
                .rotate(90.0, Vec3::y())
                .mesh(solid_torus(0.5, 1.5, 10, 15)),
        )
        .child(
            Part::new("label")
                .color(1.0, 1.0, 1.0)
                .translate(0.0, -5.0, 1.5)
                .scale(0.5, 0.5, 0.5)
                .label("HYDRANT", Vec3::new(-15.0, 0.0, 0.0)),
        )
}

/// The complete cabinet tree
pub fn hydrant_cabinet() -> Part {
    let (r, g, b) = CABINET_RED;
    Part::new("cabinet")
        .child(
            Part::new("lower compartment")
                .color(r, g, b)
                .translate(0.0, -10.0, 0.0)
                .mesh(solid_box(30.0, 40.0, 10.0)),
        )
        .child(
            Part::new("upper panel")
                .color(r, g, b)
                .translate(0.0, 15.0, 0.0)
                .mesh(solid_box(30.0, 10.0, 10.0)),
        )
        .child(alarm_button())
        .child(connector())
        .child(speaker_grid())
        .child(door())
        .child(
            Part::new("side pipe")
                .color(r, g, b)
                .translate(15.0, 0.0, 0.0)
                .rotate(90.0, Vec3::y())
                .mesh(cylinder(2.0, 2.0, 15.0, 20, 20)),
        )
}

/// Everything drawn each frame
pub struct Scene {
    cabinet: Part,
    ground: Mesh,
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            cabinet: hydrant_cabinet(),
            ground: ground_quad(-30.0, 50.0),
        }
    }

    /// Emits one complete frame for `state` and presents it
    pub fn compose<C: Canvas>(&self, state: &AppState, canvas: &mut C) {
        canvas.clear();
        canvas.load_identity();

        canvas.translate(&Vec3::new(0.0, 0.0, state.camera_distance));
        canvas.rotate(state.orientation.x, &Vec3::x());
        canvas.rotate(state.orientation.y, &Vec3::y());
        canvas.rotate(state.orientation.z, &Vec3::z());

        // Reference ground, always unlit
        canvas.set_lighting(false);
        canvas.set_color(&Vec3::new(0.3, 0.3, 0.3));
        canvas.draw_mesh(&self.ground);
        canvas.set_lighting(state.lighting);

        self.cabinet.draw(canvas, state.door.angle());

        canvas.present();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
