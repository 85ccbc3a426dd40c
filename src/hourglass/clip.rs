//! Polygon helpers: convex clipping and ear-clipping triangulation

use egui::{pos2, Pos2, Rect};

#[derive(Clone, Copy)]
enum Edge {
    Left(f32),
    Right(f32),
    Top(f32),
    Bottom(f32),
}

impl Edge {
    fn inside(self, p: Pos2) -> bool {
        match self {
            Edge::Left(x) => p.x >= x,
            Edge::Right(x) => p.x <= x,
            Edge::Top(y) => p.y >= y,
            Edge::Bottom(y) => p.y <= y,
        }
    }

    fn intersect(self, a: Pos2, b: Pos2) -> Pos2 {
        match self {
            Edge::Left(x) | Edge::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                pos2(x, a.y + (b.y - a.y) * t)
            }
            Edge::Top(y) | Edge::Bottom(y) => {
                let t = (y - a.y) / (b.y - a.y);
                pos2(a.x + (b.x - a.x) * t, y)
            }
        }
    }
}

/// Sutherland-Hodgman clip of a convex polygon against an axis-aligned rect.
/// Returns an empty list when nothing is left.
pub fn clip_polygon(points: &[Pos2], clip: Rect) -> Vec<Pos2> {
    let edges = [
        Edge::Left(clip.min.x),
        Edge::Right(clip.max.x),
        Edge::Top(clip.min.y),
        Edge::Bottom(clip.max.y),
    ];

    let mut output = points.to_vec();
    for edge in edges {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &curr in &input {
            match (edge.inside(prev), edge.inside(curr)) {
                (true, true) => output.push(curr),
                (true, false) => output.push(edge.intersect(prev, curr)),
                (false, true) => {
                    output.push(edge.intersect(prev, curr));
                    output.push(curr);
                }
                (false, false) => {}
            }
            prev = curr;
        }
    }

    if output.len() < 3 {
        output.clear();
    }
    output
}

fn turn(a: Pos2, b: Pos2, c: Pos2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Ear-clipping triangulation of a simple polygon, either winding.
/// Returns index triples into `points`.
pub fn triangulate(points: &[Pos2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let doubled_area: f32 = (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    let sign = if doubled_area < 0.0 { -1.0 } else { 1.0 };

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    while remaining.len() > 3 {
        let m = remaining.len();
        let corner = |i: usize| (remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]);
        let is_ear = |i: usize| {
            let (ia, ib, ic) = corner(i);
            let (a, b, c) = (points[ia], points[ib], points[ic]);
            if sign * turn(a, b, c) <= 0.0 {
                return false;
            }
            remaining.iter().all(|&j| {
                if j == ia || j == ib || j == ic {
                    return true;
                }
                let p = points[j];
                !(sign * turn(a, b, p) > 0.0 && sign * turn(b, c, p) > 0.0 && sign * turn(c, a, p) > 0.0)
            })
        };

        match (0..m).find(|&i| is_ear(i)) {
            Some(i) => {
                let (a, b, c) = corner(i);
                triangles.push([a as u32, b as u32, c as u32]);
                remaining.remove(i);
            }
            None => {
                // Only flat corners left; drop the flattest
                let flattest = (0..m)
                    .min_by(|&i, &j| {
                        let area = |k: usize| {
                            let (a, b, c) = corner(k);
                            turn(points[a], points[b], points[c]).abs()
                        };
                        area(i).total_cmp(&area(j))
                    })
                    .unwrap_or(0);
                remaining.remove(flattest);
            }
        }
    }
    triangles.push([remaining[0] as u32, remaining[1] as u32, remaining[2] as u32]);
    triangles
}
