//! Polar primitives shared by stairs and ramp
//!
//! Every walkable patch in the room is described in room polar coordinates
//! (distance from the vertical axis, angle around it in degrees):
//! - a radial band: inner..outer distance from the axis
//! - an angular window (a tread) or an angular sweep (the ramp)

use serde::{Deserialize, Serialize};

use crate::{angular_distance, normalize_degrees};

/// The [inner, outer] distance-from-axis range a surface occupies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialBand {
    pub inner: f32,
    pub outer: f32,
}

impl RadialBand {
    /// Band of `depth` ending at `outer`
    pub fn from_outer(outer: f32, depth: f32) -> Self {
        Self {
            inner: (outer - depth).max(0.0),
            outer,
        }
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.inner + self.outer) / 2.0
    }

    #[inline]
    pub fn contains(&self, r: f32) -> bool {
        r >= self.inner && r <= self.outer
    }

    /// Band grown by `tolerance` on both edges
    pub fn widened(&self, tolerance: f32) -> Self {
        Self {
            inner: (self.inner - tolerance).max(0.0),
            outer: self.outer + tolerance,
        }
    }

    /// Within `tolerance` of the band's centreline
    #[inline]
    pub fn near_centerline(&self, r: f32, tolerance: f32) -> bool {
        (r - self.center()).abs() < tolerance
    }
}

/// A symmetric window of angles around a centre (one tread)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularWindow {
    /// Centre angle (degrees, [0, 360))
    pub center: f32,
    /// Half of the window's angular width (degrees)
    pub half_width: f32,
}

impl AngularWindow {
    pub fn new(center: f32, half_width: f32) -> Self {
        Self {
            center: normalize_degrees(center),
            half_width,
        }
    }

    /// Uses shortest angular distance, so windows straddling 0° work
    #[inline]
    pub fn contains(&self, angle: f32) -> bool {
        angular_distance(angle, self.center) < self.half_width
    }
}

/// A directed sweep of angles starting at `start` (the ramp)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularSweep {
    /// Start angle (degrees, [0, 360))
    pub start: f32,
    /// Sweep length (degrees, (0, 360])
    pub sweep: f32,
}

impl AngularSweep {
    /// Sweep from `start` forward to `end`; equal angles mean a full turn
    pub fn between(start: f32, end: f32) -> Self {
        let start = normalize_degrees(start);
        let mut sweep = normalize_degrees(end - start);
        if sweep <= f32::EPSILON {
            sweep = 360.0;
        }
        Self { start, sweep }
    }

    pub fn end(&self) -> f32 {
        normalize_degrees(self.start + self.sweep)
    }

    #[inline]
    pub fn is_full_turn(&self) -> bool {
        self.sweep >= 360.0
    }

    /// Fraction of the way along the sweep, or None if `angle` is outside it
    pub fn fraction(&self, angle: f32) -> Option<f32> {
        let offset = normalize_degrees(angle - self.start);
        if self.is_full_turn() {
            return Some(offset / 360.0);
        }
        (offset <= self.sweep).then(|| offset / self.sweep)
    }

    /// Angle at fraction `t` along the sweep (unnormalized, so it can exceed 360)
    pub fn angle_at(&self, t: f32) -> f32 {
        self.start + t * self.sweep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_contains_and_widen() {
        let band = RadialBand::from_outer(4.99, 1.0);
        assert!((band.inner - 3.99).abs() < 1e-5);
        assert!((band.center() - 4.49).abs() < 1e-5);
        assert!(band.contains(4.5));
        assert!(!band.contains(5.1));
        assert!(band.widened(0.3).contains(5.1));
        assert!(band.near_centerline(4.9, 0.5));
        assert!(!band.near_centerline(3.9, 0.5));
    }

    #[test]
    fn test_band_inner_never_negative() {
        let band = RadialBand::from_outer(0.5, 1.0);
        assert_eq!(band.inner, 0.0);
        assert_eq!(band.widened(0.3).inner, 0.0);
    }

    #[test]
    fn test_window_wraparound() {
        let window = AngularWindow::new(0.0, 22.5);
        assert!(window.contains(359.9));
        assert!(window.contains(0.1));
        assert!(window.contains(-10.0));
        assert!(!window.contains(22.5));
        assert!(!window.contains(180.0));
    }

    #[test]
    fn test_sweep_partial() {
        let sweep = AngularSweep::between(270.0, 90.0);
        assert!((sweep.sweep - 180.0).abs() < 1e-4);
        assert!((sweep.fraction(0.0).unwrap() - 0.5).abs() < 1e-5);
        assert!((sweep.fraction(90.0).unwrap() - 1.0).abs() < 1e-5);
        assert!(sweep.fraction(180.0).is_none());
        assert!((sweep.end() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_full_turn() {
        let sweep = AngularSweep::between(0.0, 360.0);
        assert!(sweep.is_full_turn());
        assert!((sweep.fraction(180.0).unwrap() - 0.5).abs() < 1e-5);
        assert_eq!(sweep.fraction(0.0), Some(0.0));
    }

    #[test]
    fn test_angle_at_runs_past_360() {
        let sweep = AngularSweep::between(180.0, 180.0);
        assert!((sweep.angle_at(0.0) - 180.0).abs() < 1e-4);
        assert!((sweep.angle_at(1.0) - 540.0).abs() < 1e-4);
    }
}
