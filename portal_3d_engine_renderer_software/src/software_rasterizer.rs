/// Triangle rasterizer working on clip-space positions.
///
/// Triangles are clipped in homogeneous space (Sutherland-Hodgman) against
/// the six planes of the GL clip cube plus a `w > 0` guard, fan-triangulated,
/// then scan-converted with edge functions sampled at pixel centres. Both
/// windings are filled. Fragments receive window depth in `[0, 1]`.

use glam::{Vec3, Vec4};

/// Smallest `w` kept after clipping
const W_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipPlane {
    W,
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

const CLIP_PLANES: [ClipPlane; 7] = [
    ClipPlane::W,
    ClipPlane::Near,
    ClipPlane::Far,
    ClipPlane::Left,
    ClipPlane::Right,
    ClipPlane::Bottom,
    ClipPlane::Top,
];

impl ClipPlane {
    /// Positive inside the clip volume.
    fn signed_distance(self, p: Vec4) -> f32 {
        match self {
            ClipPlane::W => p.w - W_EPSILON,
            ClipPlane::Left => p.w + p.x,
            ClipPlane::Right => p.w - p.x,
            ClipPlane::Bottom => p.w + p.y,
            ClipPlane::Top => p.w - p.y,
            ClipPlane::Near => p.w + p.z,
            ClipPlane::Far => p.w - p.z,
        }
    }
}

/// Reusable clipping buffers.
#[derive(Default)]
pub struct Rasterizer {
    polygon: Vec<Vec4>,
    scratch: Vec<Vec4>,
    window: Vec<Vec3>,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip `triangle` against the clip volume. The result (possibly empty)
    /// is a convex polygon.
    pub fn clip(&mut self, triangle: [Vec4; 3]) -> &[Vec4] {
        self.polygon.clear();
        self.polygon.extend_from_slice(&triangle);

        for plane in CLIP_PLANES {
            if self.polygon.len() < 3 {
                break;
            }
            self.scratch.clear();
            let n = self.polygon.len();
            for i in 0..n {
                let current = self.polygon[i];
                let next = self.polygon[(i + 1) % n];
                let d1 = plane.signed_distance(current);
                let d2 = plane.signed_distance(next);

                if d1 >= 0.0 {
                    self.scratch.push(current);
                }
                if (d1 >= 0.0) != (d2 >= 0.0) {
                    let t = d1 / (d1 - d2);
                    self.scratch.push(current.lerp(next, t));
                }
            }
            std::mem::swap(&mut self.polygon, &mut self.scratch);
        }

        if self.polygon.len() < 3 {
            self.polygon.clear();
        }
        &self.polygon
    }

    /// Rasterize one clip-space triangle into a `width` x `height` target.
    ///
    /// `fragment(x, y, depth)` is called once per covered pixel, row 0 at
    /// the top.
    pub fn draw_triangle<F>(&mut self, triangle: [Vec4; 3], width: u32, height: u32, fragment: &mut F)
    where
        F: FnMut(u32, u32, f32),
    {
        if width == 0 || height == 0 {
            return;
        }
        self.clip(triangle);

        self.window.clear();
        let (w, h) = (width as f32, height as f32);
        self.window.extend(self.polygon.iter().map(|p| {
            let ndc = p.truncate() / p.w;
            Vec3::new(
                (ndc.x + 1.0) * 0.5 * w,
                (1.0 - ndc.y) * 0.5 * h,
                ndc.z * 0.5 + 0.5,
            )
        }));

        for i in 1..self.window.len().saturating_sub(1) {
            fill_triangle(
                [self.window[0], self.window[i], self.window[i + 1]],
                width,
                height,
                fragment,
            );
        }
    }
}

#[inline]
fn edge(a: Vec3, b: Vec3, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Fill a window-space triangle. Pixels whose centre lies on an edge are
/// covered.
fn fill_triangle<F>(v: [Vec3; 3], width: u32, height: u32, fragment: &mut F)
where
    F: FnMut(u32, u32, f32),
{
    let area = edge(v[0], v[1], v[2].x, v[2].y);
    if area.abs() < f32::EPSILON || !area.is_finite() {
        return;
    }
    let sign = area.signum();
    let inv_area = 1.0 / area.abs();

    let min_x = v[0].x.min(v[1].x).min(v[2].x).floor().max(0.0) as u32;
    let min_y = v[0].y.min(v[1].y).min(v[2].y).floor().max(0.0) as u32;
    let max_x = (v[0].x.max(v[1].x).max(v[2].x).ceil().max(0.0) as u32).min(width);
    let max_y = (v[0].y.max(v[1].y).max(v[2].y).ceil().max(0.0) as u32).min(height);

    for y in min_y..max_y {
        let py = y as f32 + 0.5;
        for x in min_x..max_x {
            let px = x as f32 + 0.5;
            let w0 = edge(v[1], v[2], px, py) * sign;
            let w1 = edge(v[2], v[0], px, py) * sign;
            let w2 = edge(v[0], v[1], px, py) * sign;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let depth = (w0 * v[0].z + w1 * v[1].z + w2 * v[2].z) * inv_area;
            fragment(x, y, depth);
        }
    }
}

#[cfg(test)]
#[path = "software_rasterizer_tests.rs"]
mod tests;
