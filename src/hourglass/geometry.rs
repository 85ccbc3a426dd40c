//! Hourglass layout in widget-local coordinates (origin top-left, y down).
//!
//! Everything here is a pure function of the widget size, the minute
//! progress and the grain phase. Painting and rotation live in `paint`.

use super::clip::clip_polygon;
use crate::constants::GRAIN_COUNT;
use egui::epaint::tessellator::path::rounded_rectangle;
use egui::epaint::{CubicBezierShape, Stroke};
use egui::{lerp, pos2, vec2, Color32, Pos2, Rect, Vec2};

/// Corner radius of the top sand body, in points
pub const SAND_CORNER_RADIUS: f32 = 8.0;
/// Bottom pile never fills more than this share of its box
pub const PILE_MAX_FILL: f32 = 0.9;

const OUTLINE_SAMPLES: usize = 24;

fn curve(points: [Pos2; 4]) -> CubicBezierShape {
    CubicBezierShape::from_points_stroke(points, false, Color32::TRANSPARENT, Stroke::NONE)
}

fn sample_curve(curve: &CubicBezierShape, first: usize, out: &mut Vec<Pos2>) {
    for i in first..=OUTLINE_SAMPLES {
        out.push(curve.sample(i as f32 / OUTLINE_SAMPLES as f32));
    }
}

/// Point on segment `a`-`b` at height `y`
fn cross_at_y(a: Pos2, b: Pos2, y: f32) -> Pos2 {
    let dy = b.y - a.y;
    if dy.abs() <= f32::EPSILON {
        return b;
    }
    pos2(lerp(a.x..=b.x, (y - a.y) / dy), y)
}

fn rounded_outline(rect: Rect, radius: f32) -> Vec<Pos2> {
    let mut points = Vec::new();
    rounded_rectangle(&mut points, rect, radius.into());
    points
}

/// A falling sand grain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grain {
    pub center: Pos2,
    pub radius: f32,
    pub phase: f32,
}

/// Vertical sand stream through the neck
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stream {
    pub top: Pos2,
    pub bottom: Pos2,
    pub width: f32,
}

/// Interior of the glass, split into pieces that fill without overlap.
///
/// The outline curves bulge past the straight top and bottom edges before
/// returning to the corners, so the interior is a y-monotone body between
/// those edges plus four small lips outside them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlassFill {
    /// Mirrored (left, right) samples of the body, top to bottom
    pub body: Vec<(Pos2, Pos2)>,
    /// Simple polygons, one per lip
    pub lips: Vec<Vec<Pos2>>,
}

impl GlassFill {
    pub fn is_empty(&self) -> bool {
        self.body.len() < 2 && self.lips.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourglassGeometry {
    pub size: Vec2,
    pub center: Pos2,
    pub neck_width: f32,
    pub bulb_width: f32,
    pub bulb_height: f32,
    pub bulb_top_y: f32,
    pub bulb_bottom_y: f32,
}

impl HourglassGeometry {
    pub fn new(size: Vec2) -> Self {
        let size = size.max(Vec2::ZERO);
        let (w, h) = (size.x, size.y);
        let bulb_height = h * 0.42;
        let center = pos2(w / 2.0, h / 2.0);
        Self {
            size,
            center,
            neck_width: w * 0.08,
            bulb_width: w * 0.6,
            bulb_height,
            bulb_top_y: center.y - bulb_height * 0.6,
            bulb_bottom_y: center.y + bulb_height * 0.6,
        }
    }

    pub fn stroke_width(&self) -> f32 {
        self.size.x * 0.012
    }

    /// Left half of the glass, top-left corner down through the neck to the
    /// bottom-left corner. The right half is its mirror image.
    pub fn left_curves(&self) -> [CubicBezierShape; 2] {
        let c = self.center;
        let half_bulb = self.bulb_width / 2.0;
        let half_neck = self.neck_width / 2.0;
        let bh = self.bulb_height;
        [
            curve([
                pos2(c.x - half_bulb, self.bulb_top_y),
                pos2(c.x - half_bulb, self.bulb_top_y - bh * 0.2),
                pos2(c.x - self.neck_width * 1.2, c.y - bh * 0.1),
                pos2(c.x - half_neck, c.y),
            ]),
            curve([
                pos2(c.x - half_neck, c.y),
                pos2(c.x - half_neck, c.y + bh * 0.1),
                pos2(c.x - half_bulb, self.bulb_bottom_y + bh * 0.2),
                pos2(c.x - half_bulb, self.bulb_bottom_y),
            ]),
        ]
    }

    fn mirror(&self, p: Pos2) -> Pos2 {
        pos2(2.0 * self.center.x - p.x, p.y)
    }

    /// All four outline curves in drawing order. The straight bottom edge
    /// joins the second and third, the closing edge joins the fourth and first.
    pub fn outline_curves(&self) -> [CubicBezierShape; 4] {
        let [upper, lower] = self.left_curves();
        let reversed_mirror = |c: &CubicBezierShape| {
            let p = c.points;
            curve([self.mirror(p[3]), self.mirror(p[2]), self.mirror(p[1]), self.mirror(p[0])])
        };
        let (lower_right, upper_right) = (reversed_mirror(&lower), reversed_mirror(&upper));
        [upper, lower, lower_right, upper_right]
    }

    /// Sampled left edge, top to bottom
    fn left_edge(&self) -> Vec<Pos2> {
        let [upper, lower] = self.left_curves();
        let mut points = Vec::with_capacity(2 * OUTLINE_SAMPLES + 1);
        sample_curve(&upper, 0, &mut points);
        sample_curve(&lower, 1, &mut points);
        points
    }

    /// Closed outline polyline (first point not repeated). The straight
    /// bottom and top edges are implied by consecutive curve endpoints.
    pub fn outline_polyline(&self) -> Vec<Pos2> {
        let mut points = Vec::with_capacity(4 * OUTLINE_SAMPLES + 2);
        for (n, curve) in self.outline_curves().iter().enumerate() {
            // Curves 0->1 and 2->3 share an endpoint
            sample_curve(curve, n % 2, &mut points);
        }
        points
    }

    /// Glass interior for filling. Empty when the glass has no area.
    pub fn glass_fill(&self) -> GlassFill {
        if self.bulb_width <= 0.0 || self.bulb_height <= 0.0 {
            return GlassFill::default();
        }
        let (top_y, bottom_y) = (self.bulb_top_y, self.bulb_bottom_y);
        let left = self.left_edge();
        let last = left.len() - 1;

        // Highest sample of the upper curve, lowest of the lower one
        let peak = (0..=last).fold(0, |best, i| if left[i].y < left[best].y { i } else { best });
        let trough = (0..=last).fold(0, |best, i| if left[i].y > left[best].y { i } else { best });

        // First sample back below the top edge, last one above the bottom edge
        let enter = (peak + 1..=last).find(|&i| left[i].y >= top_y).unwrap_or(last);
        let exit = (0..trough).rev().find(|&i| left[i].y <= bottom_y).unwrap_or(0);
        if enter == 0 || exit >= last || exit < enter {
            return GlassFill::default();
        }
        let top_cross = cross_at_y(left[enter - 1], left[enter], top_y);
        let bottom_cross = cross_at_y(left[exit], left[exit + 1], bottom_y);

        let mut body_edge = vec![top_cross];
        body_edge.extend_from_slice(&left[enter..=exit]);
        body_edge.push(bottom_cross);
        let body = body_edge.iter().map(|&p| (p, self.mirror(p))).collect();

        let mut top_lip = left[..enter].to_vec();
        top_lip.push(top_cross);
        let mut bottom_lip = vec![bottom_cross];
        bottom_lip.extend_from_slice(&left[exit + 1..]);

        let mirrored = |lip: &[Pos2]| lip.iter().map(|&p| self.mirror(p)).collect::<Vec<_>>();
        let lips = vec![
            mirrored(&top_lip),
            mirrored(&bottom_lip),
            top_lip,
            bottom_lip,
        ];
        GlassFill { body, lips }
    }

    /// Neck collar rect and its corner radius
    pub fn neck_collar(&self) -> (Rect, f32) {
        let rect = Rect::from_min_size(
            pos2(self.center.x - self.neck_width / 2.0, self.center.y - self.bulb_height * 0.05),
            vec2(self.neck_width, self.bulb_height * 0.1),
        );
        (rect, self.neck_width / 2.0)
    }

    /// Collar outline, `None` when it has no area
    pub fn collar_outline(&self) -> Option<Vec<Pos2>> {
        let (rect, radius) = self.neck_collar();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        Some(rounded_outline(rect, radius))
    }

    fn sand_box(&self, top: f32, bottom: f32) -> Rect {
        let inset = self.size.x * 0.03;
        let left = self.center.x - self.bulb_width / 2.0 + inset;
        let right = self.center.x + self.bulb_width / 2.0 - inset;
        // Very wide, short widgets would otherwise invert the box
        Rect::from_min_max(pos2(left, top), pos2(right.max(left), bottom.max(top)))
    }

    pub fn top_box(&self) -> Rect {
        self.sand_box(
            self.bulb_top_y - self.bulb_height * 0.2,
            self.center.y - self.neck_width * 0.6,
        )
    }

    pub fn bottom_box(&self) -> Rect {
        self.sand_box(
            self.center.y + self.neck_width * 0.6,
            self.bulb_bottom_y + self.bulb_height * 0.15,
        )
    }

    pub fn top_sand_height(&self, progress: f32) -> f32 {
        self.top_box().height() * (1.0 - progress).clamp(0.0, 1.0)
    }

    pub fn pile_height(&self, progress: f32) -> f32 {
        progress.clamp(0.0, 1.0) * self.bottom_box().height() * PILE_MAX_FILL
    }

    /// Sand left in the upper bulb: a rounded slab resting on the box floor,
    /// clipped to the box. `None` once it has drained.
    pub fn top_sand(&self, progress: f32) -> Option<Vec<Pos2>> {
        let bounds = self.top_box();
        let height = self.top_sand_height(progress);
        if height <= 0.0 || bounds.width() <= 0.0 {
            return None;
        }
        let slab = Rect::from_min_max(
            pos2(bounds.min.x, bounds.max.y - height),
            pos2(bounds.max.x, bounds.max.y + 1.0),
        );
        let points = clip_polygon(&rounded_outline(slab, SAND_CORNER_RADIUS), bounds);
        (!points.is_empty()).then_some(points)
    }

    /// Sand pile in the lower bulb, apex first. `None` while empty.
    pub fn pile(&self, progress: f32) -> Option<[Pos2; 3]> {
        let bounds = self.bottom_box();
        let height = self.pile_height(progress);
        if height <= 0.0 || bounds.width() <= 0.0 {
            return None;
        }
        let foot = bounds.width() * 0.08;
        Some([
            pos2(self.center.x, bounds.max.y - height),
            pos2(bounds.min.x + foot, bounds.max.y),
            pos2(bounds.max.x - foot, bounds.max.y),
        ])
    }

    pub fn stream(&self) -> Stream {
        let stream_height = self.size.y * 0.06;
        Stream {
            top: pos2(self.center.x, self.center.y - stream_height * 0.2),
            bottom: pos2(self.center.x, self.center.y + stream_height * 0.8),
            width: self.neck_width * 0.35,
        }
    }

    /// Grains sliding down the stream. `phase` is the sub-second clock phase.
    pub fn grains(&self, phase: f32) -> Vec<Grain> {
        let stream = self.stream();
        (0..GRAIN_COUNT)
            .map(|i| {
                let grain_phase = (i as f32 * 0.17 + phase).rem_euclid(1.0);
                let y = lerp(stream.top.y..=stream.bottom.y, grain_phase);
                let x_off = ((grain_phase + i as f32) * 7.2).sin() * (self.neck_width * 0.7);
                Grain {
                    center: pos2(self.center.x + x_off * 0.5, y),
                    radius: stream.width * 0.45 * (0.6 + 0.4 * (1.0 - grain_phase)),
                    phase: grain_phase,
                }
            })
            .collect()
    }
}
