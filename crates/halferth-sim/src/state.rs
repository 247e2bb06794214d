//! The cross-loop communication record between the 3D view driver and the
//! 2D sky overlay.
//!
//! Ownership contract: the view runner is the only writer and replaces the
//! whole record once per its frame; the sky renderer copies the whole record
//! once per its own frame. The two loops share no scheduler, so a read may
//! be one frame stale; no field is ever read-modify-written by more than
//! one component. Image handles are not part of this record; they stay
//! with the renderer that draws them.

/// Per-moon values published by the view driver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoonState {
    /// Unwrapped orbital angle, radians.
    pub orbital_angle: f64,
    /// Angle of the moon as seen from the planet center, degrees
    /// (atan2 of the planet-local position). Drives the sprite roll.
    pub sky_angle_deg: f64,
    /// World-space Y of the moon.
    pub world_y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SharedState {
    pub mother: MoonState,
    pub daughter: MoonState,
    /// Completed planetary rotations.
    pub full_spins: u64,
    /// Fractional spin remainder in [0, 2π).
    pub total_spin: f64,
    /// Current day of the year, 1-based. 0 until the first publish.
    pub calendar_day: u32,
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let s = SharedState::default();
        assert_eq!(s.calendar_day, 0);
        assert_eq!(s.full_spins, 0);
        assert_eq!(s.mother.orbital_angle, 0.0);
        assert!(!s.paused);
    }
}
