//! Orbital angle math, pure functions with no engine dependencies.
//!
//! Uses f64 throughout; consumers convert to f32 only at the final
//! screen-coordinate step.

use std::f64::consts::{PI, TAU};

use crate::config::MoonConfig;

/// Map any real angle to the canonical range (−π, π].
///
/// `wrap_angle(a + 2π·k) == wrap_angle(a)` for any integer k, within
/// floating-point tolerance.
pub fn wrap_angle(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    if r > PI {
        r - TAU
    } else {
        r
    }
}

/// Position on a moon's orbital ellipse, planet at the focus.
///
/// Returns `(semi_minor·cos a, semi_major·sin a + focus_offset)` — the
/// focus-offset shift along the major axis is what puts the orbited body
/// at a focus rather than the ellipse center.
pub fn elliptical_position(angle: f64, moon: &MoonConfig) -> (f64, f64) {
    let x = moon.semi_minor_axis() * angle.cos();
    let y = moon.semi_major_axis * angle.sin() + moon.focus_offset();
    (x, y)
}

/// A moon's orbital angle from the accumulated spin fraction.
///
/// The −π offset is a fixed phase calibration aligning day 0 with the
/// reference orbital position.
pub fn moon_orbital_angle(spin_fraction: f64, orbit_days: f64) -> f64 {
    (spin_fraction / orbit_days) * TAU - PI
}

/// The arc of a moon's orbit, in wrapped-angle space, during which it is
/// above the horizon as seen from the planet's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityWindow {
    /// Angle at which the moon rises.
    pub rise: f64,
    /// Angle at which the moon sets.
    pub set: f64,
}

impl VisibilityWindow {
    /// Rise/set angles from orbital eccentricity: `rise = asin(−e)`,
    /// `set = π − rise`. For e=0 this is (0, π) — exactly half the orbit,
    /// the flat-horizon case. The asin argument is clamped to [−1, 1] so a
    /// degenerate eccentricity cannot produce a domain fault.
    pub fn from_eccentricity(eccentricity: f64) -> Self {
        let rise = (-eccentricity).clamp(-1.0, 1.0).asin();
        Self {
            rise,
            set: PI - rise,
        }
    }

    /// Length of the visible arc in radians.
    pub fn duration(&self) -> f64 {
        self.set - self.rise
    }

    /// Whether a wrapped orbital angle falls inside the window.
    pub fn contains(&self, wrapped: f64) -> bool {
        wrapped >= self.rise && wrapped <= self.set
    }

    /// Normalized progress through the window, in [0, 1].
    ///
    /// `None` when the angle is outside the window or the window has
    /// (near-)zero duration — the caller draws nothing in either case.
    pub fn progress(&self, wrapped: f64) -> Option<f64> {
        if !self.contains(wrapped) {
            return None;
        }
        let duration = self.duration();
        if duration.abs() < f64::EPSILON {
            return None;
        }
        Some((wrapped - self.rise) / duration)
    }
}
