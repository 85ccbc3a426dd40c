//! Emits egui shapes for the hourglass, rotated about the widget center

use super::clip::triangulate;
use super::geometry::{GlassFill, HourglassGeometry};
use crate::theme;
use egui::emath::Rot2;
use egui::epaint::Mesh;
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke};

/// Maps widget-local points to screen space, applying the flip rotation
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    origin: Pos2,
    pivot: Pos2,
    rotation: Rot2,
}

impl Placement {
    pub fn new(rect: Rect, rotation_deg: f32) -> Self {
        Self {
            origin: rect.min,
            pivot: Pos2::ZERO + rect.size() / 2.0,
            rotation: Rot2::from_angle(rotation_deg.to_radians()),
        }
    }

    pub fn map(&self, local: Pos2) -> Pos2 {
        let turned = self.pivot + self.rotation * (local - self.pivot);
        self.origin + turned.to_vec2()
    }

    fn map_all(&self, points: impl IntoIterator<Item = Pos2>) -> Vec<Pos2> {
        points.into_iter().map(|p| self.map(p)).collect()
    }
}

fn glass_mesh(fill: &GlassFill, placement: &Placement, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for (left, right) in &fill.body {
        mesh.colored_vertex(placement.map(*left), color);
        mesh.colored_vertex(placement.map(*right), color);
    }
    for i in 0..fill.body.len().saturating_sub(1) as u32 {
        let (l0, r0, l1, r1) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
        mesh.add_triangle(l0, r0, l1);
        mesh.add_triangle(r0, r1, l1);
    }
    for lip in &fill.lips {
        let base = mesh.vertices.len() as u32;
        for point in lip {
            mesh.colored_vertex(placement.map(*point), color);
        }
        for [a, b, c] in triangulate(lip) {
            mesh.add_triangle(base + a, base + b, base + c);
        }
    }
    mesh
}

/// Draws the whole hourglass into `rect`.
///
/// `progress` is the elapsed share of the minute, `grain_phase` the
/// sub-second phase and `rotation_deg` the flip angle.
pub fn paint_hourglass(
    painter: &Painter,
    rect: Rect,
    progress: f32,
    grain_phase: f32,
    rotation_deg: f32,
) {
    let painter = painter.with_clip_rect(rect);
    let geometry = HourglassGeometry::new(rect.size());
    let placement = Placement::new(rect, rotation_deg);

    // Glass
    let fill = geometry.glass_fill();
    if fill.is_empty() {
        // Nothing else has room either
        return;
    }
    painter.add(Shape::mesh(glass_mesh(&fill, &placement, theme::GLASS_FILL)));
    if geometry.stroke_width() > 0.0 {
        painter.add(Shape::closed_line(
            placement.map_all(geometry.outline_polyline()),
            Stroke::new(geometry.stroke_width(), theme::GLASS_STROKE),
        ));
    }

    if let Some(collar) = geometry.collar_outline() {
        painter.add(Shape::convex_polygon(
            placement.map_all(collar),
            theme::GLASS_STROKE.gamma_multiply(0.9),
            Stroke::NONE,
        ));
    }

    // Upper bulb
    if let Some(sand) = geometry.top_sand(progress) {
        painter.add(Shape::convex_polygon(placement.map_all(sand), theme::SAND, Stroke::NONE));
    }

    // Stream through the neck, round caps
    let stream = geometry.stream();
    if stream.width > 0.0 {
        let (top, bottom) = (placement.map(stream.top), placement.map(stream.bottom));
        painter.line_segment([top, bottom], Stroke::new(stream.width, theme::SAND));
        painter.circle_filled(top, stream.width / 2.0, theme::SAND);
        painter.circle_filled(bottom, stream.width / 2.0, theme::SAND);
    }

    for grain in geometry.grains(grain_phase) {
        if grain.radius > 0.0 {
            painter.circle_filled(placement.map(grain.center), grain.radius, theme::SAND);
        }
    }

    // Lower bulb
    if let Some(pile) = geometry.pile(progress) {
        painter.add(Shape::convex_polygon(placement.map_all(pile), theme::SAND, Stroke::NONE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn zero_rotation_only_translates() {
        let rect = Rect::from_min_size(pos2(50.0, 20.0), vec2(300.0, 300.0));
        let placement = Placement::new(rect, 0.0);
        assert!(close(placement.map(pos2(10.0, 30.0)), pos2(60.0, 50.0)));
    }

    #[test]
    fn half_turn_swaps_bulbs() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 300.0));
        let placement = Placement::new(rect, 180.0);
        assert!(close(placement.map(pos2(150.0, 150.0)), pos2(150.0, 150.0)));
        assert!(close(placement.map(pos2(60.0, 74.4)), pos2(240.0, 225.6)));
    }

    #[test]
    fn full_turn_is_identity() {
        let rect = Rect::from_min_size(pos2(5.0, 5.0), vec2(200.0, 100.0));
        let placement = Placement::new(rect, 360.0);
        assert!(close(placement.map(pos2(12.0, 34.0)), pos2(17.0, 39.0)));
    }

    fn covers(mesh: &Mesh, p: Pos2) -> usize {
        mesh.indices
            .chunks_exact(3)
            .filter(|tri| {
                let [a, b, c] = [0, 1, 2].map(|k| mesh.vertices[tri[k] as usize].pos);
                let d = [turn(a, b, p), turn(b, c, p), turn(c, a, p)];
                d.iter().all(|v| *v > 0.0) || d.iter().all(|v| *v < 0.0)
            })
            .count()
    }

    fn turn(a: Pos2, b: Pos2, c: Pos2) -> f32 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// Nonzero winding number of `polygon` around `p`
    fn winding(polygon: &[Pos2], p: Pos2) -> i32 {
        let n = polygon.len();
        (0..n)
            .map(|i| {
                let (a, b) = (polygon[i], polygon[(i + 1) % n]);
                if a.y <= p.y && b.y > p.y && turn(a, b, p) > 0.0 {
                    1
                } else if a.y > p.y && b.y <= p.y && turn(a, b, p) < 0.0 {
                    -1
                } else {
                    0
                }
            })
            .sum()
    }

    fn distance_to_outline(polygon: &[Pos2], p: Pos2) -> f32 {
        let n = polygon.len();
        (0..n)
            .map(|i| {
                let (a, b) = (polygon[i], polygon[(i + 1) % n]);
                let ab = b - a;
                let t = ((p - a).dot(ab) / ab.length_sq().max(f32::EPSILON)).clamp(0.0, 1.0);
                p.distance(a + ab * t)
            })
            .fold(f32::INFINITY, f32::min)
    }

    fn unrotated_mesh(geometry: &HourglassGeometry) -> Mesh {
        let rect = Rect::from_min_size(Pos2::ZERO, geometry.size);
        glass_mesh(&geometry.glass_fill(), &Placement::new(rect, 0.0), theme::GLASS_FILL)
    }

    #[test]
    fn glass_mesh_is_well_formed() {
        let geometry = HourglassGeometry::new(vec2(300.0, 300.0));
        let fill = geometry.glass_fill();
        let mesh = unrotated_mesh(&geometry);
        assert!(mesh.is_valid());
        let lip_points: usize = fill.lips.iter().map(Vec::len).sum();
        assert_eq!(mesh.vertices.len(), 2 * fill.body.len() + lip_points);
    }

    #[test]
    fn glass_fill_stays_inside_outline() {
        let geometry = HourglassGeometry::new(vec2(300.0, 300.0));
        let mesh = unrotated_mesh(&geometry);
        // Above the top edge and below the bottom edge, beside the lips
        assert_eq!(covers(&mesh, pos2(140.3, 72.0)), 0);
        assert_eq!(covers(&mesh, pos2(140.3, 228.0)), 0);
        assert_eq!(covers(&mesh, pos2(140.3, 110.0)), 1);
    }

    #[test]
    fn glass_fill_matches_outline_winding() {
        let geometry = HourglassGeometry::new(vec2(300.0, 300.0));
        let mesh = unrotated_mesh(&geometry);
        let outline = geometry.outline_polyline();
        let mut inside = 0;
        for row in 0..150 {
            for col in 0..150 {
                let p = pos2(col as f32 * 2.0 + 0.37, row as f32 * 2.0 + 0.61);
                if distance_to_outline(&outline, p) < 0.5 {
                    continue;
                }
                let expected = usize::from(winding(&outline, p) != 0);
                inside += expected;
                assert_eq!(covers(&mesh, p), expected, "at {p:?}");
            }
        }
        assert!(inside > 1000);
    }

    fn painted(rect: Rect, progress: f32, rotation_deg: f32) -> Vec<Shape> {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                paint_hourglass(ui.painter(), rect, progress, 0.3, rotation_deg);
            });
        });
        output
            .shapes
            .into_iter()
            .filter(|clipped| clipped.clip_rect == rect)
            .map(|clipped| clipped.shape)
            .collect()
    }

    fn kinds(shapes: &[Shape]) -> Vec<&'static str> {
        shapes
            .iter()
            .map(|shape| match shape {
                Shape::Mesh(_) => "mesh",
                Shape::Path(_) => "path",
                Shape::LineSegment { .. } => "line",
                Shape::Circle(_) => "circle",
                _ => "other",
            })
            .collect()
    }

    #[test]
    fn paints_layers_in_order() {
        let rect = Rect::from_min_size(pos2(40.0, 30.0), vec2(300.0, 300.0));
        let shapes = painted(rect, 0.5, 0.0);
        let mut expected = vec!["mesh", "path", "path", "path", "line"];
        expected.extend(["circle"; 9]);
        expected.push("path");
        assert_eq!(kinds(&shapes), expected);

        // Drained top bulb and empty pile are skipped
        assert_eq!(painted(rect, 0.0, 0.0).len(), 14);
        assert_eq!(painted(rect, 1.0, 0.0).len(), 14);
    }

    #[test]
    fn zero_sized_widget_paints_nothing() {
        let rect = Rect::from_min_size(pos2(10.0, 10.0), vec2(0.0, 0.0));
        assert!(painted(rect, 0.5, 0.0).is_empty());
    }

    #[test]
    fn shapes_stay_in_widget_while_turning() {
        let rect = Rect::from_min_size(pos2(40.0, 30.0), vec2(300.0, 300.0));
        for rotation in [0.0, 45.0, 90.0, 180.0, 270.0] {
            let shapes = painted(rect, 0.5, rotation);
            assert!(!shapes.is_empty());
            for shape in &shapes {
                let bounds = shape.visual_bounding_rect();
                assert!(rect.expand(1.0).contains_rect(bounds), "{bounds:?} at {rotation}");
            }
        }
    }
}
