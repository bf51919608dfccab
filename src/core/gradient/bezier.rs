use crate::core::data::colour::Colour;
use crate::core::gradient::control_point::{ControlPoint, Interpolation};
use std::ops::{Add, Mul, Sub};

const HANDLE_FACTOR: f64 = 0.49;

/// (position, channel value) pair used while fitting one colour channel.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Vect {
    x: f64,
    y: f64,
}

impl Vect {
    fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn normalized(self) -> Self {
        let length = self.length();
        Self {
            x: self.x / length,
            y: self.y / length,
        }
    }
}

impl Add for Vect {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vect {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Vect {
    type Output = Self;

    fn mul(self, m: f64) -> Self {
        Self {
            x: self.x * m,
            y: self.y * m,
        }
    }
}

fn channel_vector(point: &ControlPoint, channel: usize) -> Vect {
    let value = match channel {
        0 => point.colour.r,
        1 => point.colour.g,
        _ => point.colour.b,
    };

    Vect {
        x: point.position,
        y: f64::from(value),
    }
}

/// Handle pulling the curve through `p2` along the chord from `p3` to `p1`.
fn smooth_handle(p1: Vect, p2: Vect, p3: Vect) -> Vect {
    ((p2 - p3) + (p1 - p2)).normalized() * ((p2 - p1).length() * HANDLE_FACTOR) + p2
}

struct Segment {
    p1: Vect,
    p2: Vect,
    d0: Vect,
    d1: Vect,
}

impl Segment {
    /// Samples the curve at every multiple of `distance` that falls inside the segment.
    fn sample(&self, distance: f64, out: &mut Vec<u8>) {
        let length = self.p2.x - self.p1.x;
        let offset = (distance - self.p1.x % distance) / length;
        let count = ((self.p2.x / distance).floor() - (self.p1.x / distance).floor()).max(0.0);
        if !count.is_finite() {
            return;
        }

        for step in 0..count as u64 {
            let p = offset + step as f64 / count;
            let q = 1.0 - p;
            let k = q.powi(3) * self.p1.y
                + 3.0 * p * q.powi(2) * self.d0.y
                + 3.0 * q * p.powi(2) * self.d1.y
                + p.powi(3) * self.p2.y;

            out.push((k as i32).clamp(0, 255) as u8);
        }
    }
}

fn fit_channel(points: &[ControlPoint], channel: usize, density: u32, cyclic: bool) -> Vec<u8> {
    let n = points.len();
    let max_position = points[n - 1].position;
    let distance = max_position / (f64::from(density) * n as f64);
    let wrap = Vect {
        x: max_position,
        y: 0.0,
    };
    let mut out = Vec::with_capacity(density as usize * n);

    let p0 = channel_vector(&points[n - 2], channel) - wrap;
    let mut p1 = channel_vector(&points[0], channel);
    let mut p2 = channel_vector(&points[1], channel);
    let mut p3 = channel_vector(&points[2], channel);

    let d0 = if cyclic {
        ((p2 - p1) + (p1 - p0)).normalized() * ((p2 - p1).length() * HANDLE_FACTOR) + p1
    } else {
        (p2 - p1) * HANDLE_FACTOR + p1
    };
    let mut d1 = smooth_handle(p1, p2, p3);
    Segment { p1, p2, d0, d1 }.sample(distance, &mut out);

    for next in points.iter().skip(3) {
        p1 = p2;
        p2 = p3;
        p3 = channel_vector(next, channel);
        let d0 = p1 * 2.0 - d1;
        d1 = smooth_handle(p1, p2, p3);
        Segment { p1, p2, d0, d1 }.sample(distance, &mut out);
    }

    p1 = p2;
    p2 = p3;
    p3 = channel_vector(&points[1], channel) + wrap;
    let d0 = p1 * 2.0 - d1;
    let d1 = if cyclic {
        smooth_handle(p1, p2, p3)
    } else {
        (p1 - p2) * HANDLE_FACTOR + p2
    };
    Segment { p1, p2, d0, d1 }.sample(distance, &mut out);

    out
}

/// Pre-samples a piecewise cubic Bezier through at least three sorted control points.
///
/// Each channel is fitted independently; the table holds about `density` entries per
/// control point.
pub fn bezier_table(points: &[ControlPoint], density: u32, interpolation: Interpolation) -> Vec<Colour> {
    let max_position = points.last().map_or(0.0, |p| p.position);
    if points.len() < 3 || density == 0 || !(max_position > 0.0 && max_position.is_finite()) {
        return points.iter().map(|p| p.colour).collect();
    }

    let cyclic = interpolation == Interpolation::Cyclic;
    let red = fit_channel(points, 0, density, cyclic);
    let green = fit_channel(points, 1, density, cyclic);
    let blue = fit_channel(points, 2, density, cyclic);

    red.into_iter()
        .zip(green)
        .zip(blue)
        .map(|((r, g), b)| Colour::rgb(r, g, b))
        .collect()
}
