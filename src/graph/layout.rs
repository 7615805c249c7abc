//! Deterministic initial node positions.

use std::f64::consts::TAU;

/// Genes per spiral turn around a tumor node.
const SPIRAL_TURN: f64 = 15.0;
const SPIRAL_START: f64 = 80.0;
const SPIRAL_STEP: f64 = 0.35 * 3.0;

/// Cross-tumor genes sit this fraction of the way from center to their tumor.
const CROSS_TUMOR_PULL: f64 = 0.5;
const CROSS_TUMOR_RING: f64 = 40.0;
const CROSS_TUMOR_RING_SLOTS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    fn polar(center: Point, angle: f64, distance: f64) -> Self {
        Point {
            x: round2(center.x + distance * angle.cos()),
            y: round2(center.y + distance * angle.sin()),
        }
    }
}

/// Tumor `index` of `count` on a circle around the origin.
pub fn tumor_position(index: usize, count: usize, radius: f64) -> Point {
    let angle = TAU * index as f64 / count.max(1) as f64;
    Point::polar(Point::ORIGIN, angle, radius)
}

/// The `index`-th tumor-specific gene on a spiral around its tumor.
pub fn spiral_position(center: Point, index: usize) -> Point {
    let k = index as f64;
    Point::polar(center, TAU * k / SPIRAL_TURN, SPIRAL_START + SPIRAL_STEP * k)
}

/// The `ordinal`-th cross-tumor gene anchored to a tumor, on widening rings
/// halfway between the center and that tumor.
pub fn cross_tumor_position(anchor: Point, ordinal: usize) -> Point {
    let center = Point {
        x: anchor.x * CROSS_TUMOR_PULL,
        y: anchor.y * CROSS_TUMOR_PULL,
    };
    let k = ordinal as f64;
    let ring = (k / CROSS_TUMOR_RING_SLOTS).floor();
    Point::polar(
        center,
        TAU * k / CROSS_TUMOR_RING_SLOTS,
        CROSS_TUMOR_RING * (1.0 + ring),
    )
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tumor_sits_on_positive_x_axis() {
        assert_eq!(tumor_position(0, 4, 400.0), Point { x: 400.0, y: 0.0 });
        let p = tumor_position(1, 4, 400.0);
        assert!(p.x.abs() < 0.01 && (p.y - 400.0).abs() < 0.01);
    }

    #[test]
    fn spiral_moves_outward() {
        let center = Point { x: 10.0, y: -10.0 };
        assert_eq!(spiral_position(center, 0), Point { x: 90.0, y: -10.0 });
        let far = spiral_position(center, 30);
        let d = ((far.x - center.x).powi(2) + (far.y - center.y).powi(2)).sqrt();
        assert!((d - (80.0 + 1.05 * 30.0)).abs() < 0.05);
    }

    #[test]
    fn cross_tumor_positions_are_distinct() {
        let anchor = Point { x: 400.0, y: 0.0 };
        let positions: Vec<_> = (0..16).map(|i| cross_tumor_position(anchor, i)).collect();
        assert_eq!(positions[0], Point { x: 240.0, y: 0.0 });
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
