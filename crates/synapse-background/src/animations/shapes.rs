//! Shape field animation (stateful).
//!
//! Small rotating polygons drift across the surface, bounce off its edges,
//! and are linked by gradient lines when they come close to each other.

use std::f64::consts::TAU;

use rand::Rng;
use synapse_core::{LinearGradient, Paint, Point, RadialGradient, ShapeFieldConfig, Surface};

use super::{proximity, unit};
use crate::geometry::{extent, generate_polygon};

/// Peak opacity of a link between two touching shapes.
const LINK_ALPHA: f64 = 0.2;

/// Width of link lines.
const LINK_WIDTH: f64 = 0.5;

/// Radius the fill gradient fades over, in local shape units.
const FILL_GRADIENT_RADIUS: f64 = 20.0;

/// Polygon category of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
    ];

    pub fn sides(self) -> usize {
        match self {
            ShapeKind::Triangle => 3,
            ShapeKind::Square => 4,
            ShapeKind::Pentagon => 5,
            ShapeKind::Hexagon => 6,
        }
    }

    /// Circumradius of the outline before scaling.
    pub fn radius(self) -> f64 {
        match self {
            ShapeKind::Triangle => 15.0,
            ShapeKind::Square => 12.0,
            ShapeKind::Pentagon => 13.0,
            ShapeKind::Hexagon => 14.0,
        }
    }

    /// Triangles and hexagons use the primary colour, the rest the secondary.
    pub fn uses_primary(self) -> bool {
        matches!(self, ShapeKind::Triangle | ShapeKind::Hexagon)
    }
}

/// A single polygon in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Outline in local space.
    pub points: Vec<Point>,
    pub position: Point,
    pub rotation: f64,
    /// Movement per frame.
    pub velocity: Point,
    /// Rotation per frame.
    pub angular_velocity: f64,
    pub scale: f64,
    pub kind: ShapeKind,
}

impl Shape {
    /// A motionless, unrotated shape of the given kind.
    pub fn new(kind: ShapeKind, position: Point) -> Self {
        Self {
            points: generate_polygon(kind.sides(), kind.radius()),
            position,
            rotation: 0.0,
            velocity: Point::ORIGIN,
            angular_velocity: 0.0,
            scale: 1.0,
            kind,
        }
    }

    /// How far the outline reaches from the centre along either axis.
    pub fn extent(&self) -> f64 {
        extent(&self.points) * self.scale
    }
}

/// Create a field of randomly placed shapes.
pub fn create<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    config: &ShapeFieldConfig,
    rng: &mut R,
) -> Vec<Shape> {
    (0..config.shape_count)
        .map(|_| {
            let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
            Shape {
                position: Point::new(unit(rng) * width, unit(rng) * height),
                rotation: unit(rng) * TAU,
                velocity: Point::new(
                    (unit(rng) - 0.5) * config.move_speed,
                    (unit(rng) - 0.5) * config.move_speed,
                ),
                angular_velocity: (unit(rng) - 0.5) * config.rotation_speed,
                scale: 0.8 + unit(rng) * 0.4,
                ..Shape::new(kind, Point::ORIGIN)
            }
        })
        .collect()
}

/// Move and rotate every shape, bouncing off the surface edges.
///
/// A shape whose centre is closer to an edge than its own extent has the
/// matching velocity component flipped. Positions are never clamped, so a
/// shape that overshoots far enough keeps flipping until it drifts back in.
pub fn advance(shapes: &mut [Shape], width: f64, height: f64) {
    for shape in shapes {
        shape.position = shape.position + shape.velocity;
        shape.rotation += shape.angular_velocity;

        let extent = shape.extent();
        if shape.position.x < extent || shape.position.x > width - extent {
            shape.velocity.x = -shape.velocity.x;
        }
        if shape.position.y < extent || shape.position.y > height - extent {
            shape.velocity.y = -shape.velocity.y;
        }
    }
}

/// Opacity of the link between two shapes, or `None` if they are too far apart.
pub fn link_opacity(a: &Shape, b: &Shape, config: &ShapeFieldConfig) -> Option<f64> {
    proximity(a.position, b.position, config.connection_distance).map(|p| p * LINK_ALPHA)
}

/// Draw links between nearby shapes, then the shapes themselves.
pub fn render<S: Surface + ?Sized>(surface: &mut S, shapes: &[Shape], config: &ShapeFieldConfig) {
    render_links(surface, shapes, config);
    for shape in shapes {
        render_shape(surface, shape, config);
    }
}

fn render_links<S: Surface + ?Sized>(surface: &mut S, shapes: &[Shape], config: &ShapeFieldConfig) {
    surface.set_line_width(LINK_WIDTH);
    for (i, a) in shapes.iter().enumerate() {
        for b in &shapes[i + 1..] {
            let Some(alpha) = link_opacity(a, b, config) else {
                continue;
            };
            let gradient = LinearGradient::new(a.position, b.position)
                .with_stop(0.0, config.primary_color.with_alpha(alpha))
                .with_stop(1.0, config.secondary_color.with_alpha(alpha));
            surface.stroke_line(a.position, b.position, &Paint::Linear(gradient));
        }
    }
}

fn render_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape, config: &ShapeFieldConfig) {
    let color = if shape.kind.uses_primary() {
        config.primary_color
    } else {
        config.secondary_color
    };

    surface.save();
    surface.translate(shape.position.x, shape.position.y);
    surface.rotate(shape.rotation);
    surface.scale(shape.scale, shape.scale);

    surface.begin_path();
    for (i, point) in shape.points.iter().enumerate() {
        if i == 0 {
            surface.move_to(point.x, point.y);
        } else {
            surface.line_to(point.x, point.y);
        }
    }
    surface.close_path();

    let fill = RadialGradient::new(Point::ORIGIN, 0.0, Point::ORIGIN, FILL_GRADIENT_RADIUS)
        .with_stop(0.0, color.with_alpha(0.2))
        .with_stop(1.0, color.with_alpha(0.1));
    surface.fill(&Paint::Radial(fill));

    surface.set_line_width(1.0);
    surface.stroke(&Paint::Solid(color.with_alpha(0.6)));

    surface.restore();
}
