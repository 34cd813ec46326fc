use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Context, Line, Rectangle};

use crate::animation::{divide_scale, sinify};
use crate::chain::Painter;
use crate::config::ShapeConfig;

/// Phases of one shape: outer square, left stroke, right stroke, inner circle
pub const PARTS: u32 = 4;

/// Canvas size and the scaling factors applied to it
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub size_factor: f64,
    pub stroke_factor: f64,
}

impl Geometry {
    pub fn new(width: f64, height: f64, shape: &ShapeConfig) -> Self {
        Self {
            width,
            height,
            size_factor: shape.size_factor,
            stroke_factor: shape.stroke_factor,
        }
    }

    pub fn size(&self) -> f64 {
        self.width.min(self.height) / self.size_factor
    }

    /// Parallel passes needed for the stroke width, one canvas unit apart
    pub fn stroke_passes(&self) -> usize {
        let thickness = self.width.min(self.height) / self.stroke_factor;
        (thickness.round() as usize).max(1)
    }
}

/// A single stroke of the shape, in canvas coordinates (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Rect { x: f64, y: f64, side: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { x: f64, y: f64, radius: f64 },
}

impl Primitive {
    /// Same primitive pushed `offset` units outward (negative = inward)
    fn offset(self, offset: f64) -> Option<Self> {
        match self {
            Self::Rect { x, y, side } => {
                let side = side + 2.0 * offset;
                (side > 0.0).then_some(Self::Rect {
                    x: x - offset,
                    y: y - offset,
                    side,
                })
            }
            Self::Line { x1, y1, x2, y2 } => Some(Self::Line {
                x1,
                y1: y1 + offset,
                x2,
                y2: y2 + offset,
            }),
            Self::Circle { x, y, radius } => {
                let radius = radius + offset;
                (radius > 0.0).then_some(Self::Circle { x, y, radius })
            }
        }
    }
}

/// Frame of a square bi-end at `scale`.
///
/// The sine pulse opens and closes the shape over one unit of scale, so the
/// frame is empty at both rest positions.
pub fn square_bi_end(scale: f32, geometry: &Geometry) -> Vec<Primitive> {
    let size = geometry.size();
    let cx = geometry.width / 2.0;
    let cy = geometry.height / 2.0;
    let sf = sinify(scale);
    let sc = |i: u32| divide_scale(sf, i, PARTS) as f64;

    let mut primitives = Vec::with_capacity(PARTS as usize);

    let side = size * sc(0);
    if side > 0.0 {
        primitives.push(Primitive::Rect {
            x: cx - side / 2.0,
            y: cy - side / 2.0,
            side,
        });
    }

    for (part, sign) in [(1, -1.0), (2, 1.0)] {
        let length = size * sc(part);
        if length > 0.0 {
            let edge = cx + sign * size / 2.0;
            primitives.push(Primitive::Line {
                x1: edge,
                y1: cy,
                x2: edge + sign * length,
                y2: cy,
            });
        }
    }

    let radius = size / 4.0 * sc(3);
    if radius > 0.0 {
        primitives.push(Primitive::Circle {
            x: cx,
            y: cy,
            radius,
        });
    }

    primitives
}

/// Offsets of each stroke pass, centered on the nominal outline
fn pass_offsets(passes: usize) -> impl Iterator<Item = f64> {
    let mid = (passes as f64 - 1.0) / 2.0;
    (0..passes).map(move |k| k as f64 - mid)
}

/// Draws chain nodes onto a ratatui canvas
pub struct CanvasPainter<'a, 'b> {
    ctx: &'a mut Context<'b>,
    palette: &'a [Color],
    geometry: Geometry,
}

impl<'a, 'b> CanvasPainter<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, palette: &'a [Color], geometry: Geometry) -> Self {
        Self {
            ctx,
            palette,
            geometry,
        }
    }
}

impl Painter for CanvasPainter<'_, '_> {
    fn draw_node(&mut self, index: usize, scale: f32) {
        let color = self.palette.get(index).copied().unwrap_or(Color::Reset);
        let passes = self.geometry.stroke_passes();

        for primitive in square_bi_end(scale, &self.geometry) {
            for primitive in pass_offsets(passes).filter_map(|o| primitive.offset(o)) {
                match primitive {
                    Primitive::Rect { x, y, side } => self.ctx.draw(&Rectangle {
                        x,
                        y,
                        width: side,
                        height: side,
                        color,
                    }),
                    Primitive::Line { x1, y1, x2, y2 } => self.ctx.draw(&Line {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                    }),
                    Primitive::Circle { x, y, radius } => self.ctx.draw(&Circle {
                        x,
                        y,
                        radius,
                        color,
                    }),
                }
            }
        }
    }
}
