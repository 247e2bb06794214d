//! The 3D view driver: advances the clock and turns its output into world
//! positions for the renderer, plus the shared record for the sky overlay.

use std::f64::consts::TAU;

use glam::{DMat3, DVec3};

use crate::calendar::CalendarDate;
use crate::clock::SimulationClock;
use crate::config::{MoonConfig, SimConfig};
use crate::orbit::{elliptical_position, moon_orbital_angle, wrap_angle};
use crate::state::{MoonState, SharedState};

// ── Seasonal markers ─────────────────────────────────────────────────

/// A labeled spoke on the orbit ring marking a calendar point.
#[derive(Debug, Clone, Copy)]
pub struct SeasonMarker {
    pub label: &'static str,
    /// Position along the orbit ring, degrees.
    pub angle_deg: f64,
    /// Line color, 0xRRGGBB.
    pub color: u32,
}

pub const SEASON_MARKERS: [SeasonMarker; 8] = [
    SeasonMarker { label: "NF\nEquinox",  angle_deg: 0.0,   color: 0x00ff00 },
    SeasonMarker { label: "LN",           angle_deg: 60.0,  color: 0x0000ff },
    SeasonMarker { label: "TLN\nSolstice", angle_deg: 90.0, color: 0xff0000 },
    SeasonMarker { label: "NS",           angle_deg: 120.0, color: 0x0000ff },
    SeasonMarker { label: "DS\nEquinox",  angle_deg: 180.0, color: 0x00ff00 },
    SeasonMarker { label: "LD",           angle_deg: 240.0, color: 0xffff00 },
    SeasonMarker { label: "TLD\nSolstice", angle_deg: 270.0, color: 0xff0000 },
    SeasonMarker { label: "DF",           angle_deg: 300.0, color: 0xffff00 },
];

impl SeasonMarker {
    /// Endpoint of the spoke on the orbit ring (the other end is the sun).
    pub fn position(&self, orbit_radius: f64) -> DVec3 {
        let rad = self.angle_deg.to_radians();
        DVec3::new(orbit_radius * rad.cos(), 0.0, orbit_radius * rad.sin())
    }
}

// ── Per-frame output ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct MoonFrame {
    /// Position in the (tilted) moon-orbit plane.
    pub local: (f64, f64),
    /// World-space position.
    pub world: DVec3,
    /// Unwrapped orbital angle, radians.
    pub orbital_angle: f64,
    /// Z rotation presenting the tidally locked face toward the planet.
    pub facing: f64,
    /// atan2 of the local position, degrees; drives the sky-overlay roll.
    pub sky_angle_deg: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct WorldFrame {
    pub planet_pos: DVec3,
    /// Planet self-rotation about its axis, radians (wrapped).
    pub spin_rotation: f64,
    pub mother: MoonFrame,
    pub daughter: MoonFrame,
    pub date: CalendarDate,
    /// Simulated seconds this frame advanced (0 for a manual-jump recompute).
    pub delta: f64,
}

// ── Driver ───────────────────────────────────────────────────────────

pub struct WorldDriver {
    config: SimConfig,
    clock: SimulationClock,
}

impl WorldDriver {
    pub fn new(config: SimConfig) -> Self {
        let clock = SimulationClock::new(config.orbit_period_seconds, config.year_days);
        Self { config, clock }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    /// Advance one frame. `None` while paused with no pending manual jump —
    /// downstream consumers keep whatever they last received.
    pub fn tick(&mut self, now_ms: f64) -> Option<WorldFrame> {
        let delta = self.clock.tick(now_ms)?;
        Some(self.compute_frame(delta))
    }

    fn compute_frame(&self, delta: f64) -> WorldFrame {
        let orbit_angle = self.clock.orbit_angle();
        let planet_pos = DVec3::new(
            self.config.orbit_radius * orbit_angle.cos(),
            0.0,
            self.config.orbit_radius * orbit_angle.sin(),
        );

        let spin_fraction = self.clock.spin_fraction();
        WorldFrame {
            planet_pos,
            spin_rotation: wrap_angle(-(spin_fraction * TAU)),
            mother: self.moon_frame(&self.config.mother, spin_fraction, planet_pos),
            daughter: self.moon_frame(&self.config.daughter, spin_fraction, planet_pos),
            date: CalendarDate::from_spins(self.clock.full_spins(), self.config.year_days),
            delta,
        }
    }

    /// Position one moon: elliptical position in the orbit plane, then the
    /// axial tilt applied twice as in the scene graph — once tilting the
    /// moon-orbit plane about Z, once tilting the whole planet frame about X.
    fn moon_frame(&self, moon: &MoonConfig, spin_fraction: f64, planet_pos: DVec3) -> MoonFrame {
        let orbital_angle = moon_orbital_angle(spin_fraction, moon.orbit_days);
        let (lx, ly) = elliptical_position(orbital_angle, moon);

        let tilt = self.config.axial_tilt_deg.to_radians();
        let world = planet_pos
            + DMat3::from_rotation_x(tilt)
                * (DMat3::from_rotation_z(tilt) * DVec3::new(lx, ly, 0.0));

        let to_center = ly.atan2(lx);
        MoonFrame {
            local: (lx, ly),
            world,
            orbital_angle,
            facing: to_center + std::f64::consts::PI,
            sky_angle_deg: to_center.to_degrees(),
        }
    }

    /// Build the record published to the sky overlay from a computed frame.
    pub fn shared_state(&self, frame: &WorldFrame) -> SharedState {
        let moon_state = |m: &MoonFrame| MoonState {
            orbital_angle: m.orbital_angle,
            sky_angle_deg: m.sky_angle_deg,
            world_y: m.world.y,
        };
        SharedState {
            mother: moon_state(&frame.mother),
            daughter: moon_state(&frame.daughter),
            full_spins: self.clock.full_spins(),
            total_spin: self.clock.total_spin(),
            calendar_day: frame.date.day_of_year,
            paused: self.clock.is_paused(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> WorldDriver {
        WorldDriver::new(SimConfig::default())
    }

    #[test]
    fn planet_stays_on_the_orbit_ring() {
        let mut d = driver();
        d.clock_mut().set_speed(4.0);
        d.tick(0.0);
        for i in 1..200 {
            let frame = d.tick(i as f64 * 16.0).unwrap();
            let r = (frame.planet_pos.x.powi(2) + frame.planet_pos.z.powi(2)).sqrt();
            assert!((r - 30.0).abs() < 1e-9, "r = {r}");
            assert_eq!(frame.planet_pos.y, 0.0);
        }
    }

    #[test]
    fn quarter_year_jump_puts_planet_on_the_z_axis() {
        let mut d = driver();
        d.clock_mut().jump_to_day(105); // 105/420 = quarter orbit
        let frame = d.tick(0.0).unwrap();
        assert!(frame.planet_pos.x.abs() < 1e-9);
        assert!((frame.planet_pos.z - 30.0).abs() < 1e-9);
    }

    #[test]
    fn zero_tilt_moon_stays_in_the_planet_plane() {
        let mut config = SimConfig::default();
        config.axial_tilt_deg = 0.0;
        let mut d = WorldDriver::new(config);
        let frame = d.tick(0.0).unwrap();
        let m = frame.mother;
        assert!((m.world.x - (frame.planet_pos.x + m.local.0)).abs() < 1e-9);
        assert!((m.world.y - m.local.1).abs() < 1e-9);
        assert!((m.world.z - frame.planet_pos.z).abs() < 1e-9);
    }

    #[test]
    fn tilt_rotates_the_moon_orbit_plane() {
        let mut d = driver();
        let frame = d.tick(0.0).unwrap();
        let (lx, ly) = frame.mother.local;
        let t = 12.5f64.to_radians();
        // RotX(t) · RotZ(t) · (lx, ly, 0) by hand.
        let y1 = lx * t.sin() + ly * t.cos();
        assert!((frame.mother.world.y - y1 * t.cos()).abs() < 1e-9);
        assert!((frame.mother.world.z - (frame.planet_pos.z + y1 * t.sin())).abs() < 1e-9);
    }

    #[test]
    fn shared_state_mirrors_the_frame() {
        let mut d = driver();
        d.clock_mut().jump_to_day(100);
        let frame = d.tick(0.0).unwrap();
        let s = d.shared_state(&frame);
        assert_eq!(s.calendar_day, 100);
        assert_eq!(s.full_spins, 99);
        assert_eq!(s.mother.orbital_angle, frame.mother.orbital_angle);
        assert_eq!(s.mother.world_y, frame.mother.world.y);
        assert!(!s.paused);
    }

    #[test]
    fn paused_driver_produces_no_frames() {
        let mut d = driver();
        d.tick(0.0);
        d.clock_mut().pause(16.0);
        assert!(d.tick(32.0).is_none());
    }

    #[test]
    fn markers_sit_on_the_orbit_ring() {
        assert_eq!(SEASON_MARKERS.len(), 8);
        let first = SEASON_MARKERS[0].position(30.0);
        assert!((first.x - 30.0).abs() < 1e-12);
        assert!(first.z.abs() < 1e-12);
        for m in &SEASON_MARKERS {
            let p = m.position(30.0);
            assert!((p.length() - 30.0).abs() < 1e-9, "{}", m.label);
        }
    }

    #[test]
    fn cardinal_markers_name_their_event() {
        // Equinoxes at 0° and 180°, solstices at 90° and 270°; the four
        // in-between spokes carry the bare season abbreviation.
        for (angle, suffix) in [
            (0.0, "Equinox"),
            (90.0, "Solstice"),
            (180.0, "Equinox"),
            (270.0, "Solstice"),
        ] {
            let m = SEASON_MARKERS
                .iter()
                .find(|m| m.angle_deg == angle)
                .unwrap();
            assert!(m.label.contains(suffix), "{:?}", m.label);
        }
        for angle in [60.0, 120.0, 240.0, 300.0] {
            let m = SEASON_MARKERS
                .iter()
                .find(|m| m.angle_deg == angle)
                .unwrap();
            assert!(!m.label.contains('\n'), "{:?}", m.label);
        }
    }

    #[test]
    fn moons_face_the_planet() {
        let mut d = driver();
        let frame = d.tick(0.0).unwrap();
        let (lx, ly) = frame.daughter.local;
        assert!((frame.daughter.facing - (ly.atan2(lx) + std::f64::consts::PI)).abs() < 1e-12);
    }
}
