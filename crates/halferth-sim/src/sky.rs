//! Screen-space geometry for the sky overlay: where on the horizon arc a
//! visible moon sprite goes, and how it rolls. Pure math — the actual
//! Canvas2D calls live in the web crate.

use std::f64::consts::PI;

use crate::orbit::{wrap_angle, VisibilityWindow};

/// Sprite sizes in canvas pixels, and the circular-clip scale applied to
/// each moon's pre-rendered image.
pub const MOTHER_SPRITE_SIZE: f64 = 60.0;
pub const MOTHER_CLIP_SCALE: f64 = 1.0;
pub const DAUGHTER_SPRITE_SIZE: f64 = 45.0;
pub const DAUGHTER_CLIP_SCALE: f64 = 0.6;

/// The ellipse the moons travel along, matching the horizon graphic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonArc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl HorizonArc {
    /// Arc parameters for a canvas of the given size: centered horizontally,
    /// anchored just below the bottom edge, spanning most of the width.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            center_x: width / 2.0,
            center_y: height - 10.0,
            radius_x: (width / 2.0) * 0.95,
            radius_y: height * 0.85,
        }
    }

    /// Point on the arc for a normalized angle in [0, π]: 0 is the rise
    /// point at the left horizon, π the set point at the right.
    pub fn point_at(&self, normalized: f64) -> (f64, f64) {
        let canvas_angle = normalized + PI;
        (
            self.center_x + self.radius_x * canvas_angle.cos(),
            self.center_y + self.radius_y * canvas_angle.sin(),
        )
    }
}

/// Where and how to draw one moon sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePlacement {
    pub x: f64,
    pub y: f64,
    /// Sprite rotation in radians, [0, π].
    pub roll: f64,
}

/// Apparent rotation of the tidally locked face as the moon crosses the
/// sky: `((cos(deg·π/180) + 1)/2)·π` — a smooth terminator-crossing roll
/// rather than continuous spin.
pub fn roll_angle(sky_angle_deg: f64) -> f64 {
    ((sky_angle_deg.to_radians().cos() + 1.0) / 2.0) * PI
}

/// Place one moon on the horizon arc, or `None` when it is below the
/// horizon (outside its visibility window).
pub fn place_moon(
    orbital_angle: f64,
    sky_angle_deg: f64,
    window: &VisibilityWindow,
    arc: &HorizonArc,
) -> Option<SpritePlacement> {
    let wrapped = wrap_angle(orbital_angle);
    let progress = window.progress(wrapped)?;
    let (x, y) = arc.point_at(progress * PI);
    Some(SpritePlacement {
        x,
        y,
        roll: roll_angle(sky_angle_deg),
    })
}
