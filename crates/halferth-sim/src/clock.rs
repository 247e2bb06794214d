use std::f64::consts::TAU;

/// Advances orbital phase and the discrete day counter from frame timestamps.
///
/// Two logical states, Running and Paused, plus an edge-triggered manual day
/// jump. Timestamps are in milliseconds (the host's frame clock); simulated
/// time is seconds scaled by the speed multiplier.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Planet's angular position along its orbit, radians, monotone while
    /// running.
    orbit_angle: f64,
    /// Fractional spin remainder in [0, 2π).
    total_spin: f64,
    /// Completed planetary rotations — the day counter. Never decreases
    /// except through `jump_to_day`.
    full_spins: u64,
    paused: bool,
    /// Timestamp at which the current pause began, ms.
    pause_start: Option<f64>,
    /// Timestamp of the previous running tick, ms. `None` until the first
    /// tick; 0.0 is a legitimate host timestamp, not a sentinel.
    last_timestamp: Option<f64>,
    /// Positive speed multiplier applied to wall-clock deltas.
    speed: f64,
    /// One-shot: a manual jump happened, run exactly one delta-0 recompute
    /// even while paused.
    needs_manual_update: bool,

    orbit_period_seconds: f64,
    year_days: u32,
}

impl SimulationClock {
    pub fn new(orbit_period_seconds: f64, year_days: u32) -> Self {
        Self {
            orbit_angle: 0.0,
            total_spin: 0.0,
            full_spins: 0,
            paused: false,
            pause_start: None,
            last_timestamp: None,
            speed: 1.0,
            needs_manual_update: false,
            orbit_period_seconds,
            year_days,
        }
    }

    /// Process one frame timestamp. Returns the simulated delta in seconds,
    /// or `None` when paused with no pending manual jump (nothing to
    /// recompute downstream).
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        if self.paused && !self.needs_manual_update {
            return None;
        }
        let mut delta = 0.0;
        if !self.paused {
            if let Some(last) = self.last_timestamp {
                delta = ((now_ms - last) / 1000.0) * self.speed;
                // Clock skew or a bad host timestamp must not run time
                // backwards or leak NaN into the angles.
                if !delta.is_finite() || delta < 0.0 {
                    delta = 0.0;
                }
            }
            self.last_timestamp = Some(now_ms);
        }
        self.needs_manual_update = false;
        self.advance(delta);
        Some(delta)
    }

    fn advance(&mut self, delta: f64) {
        let orbit_speed = TAU / self.orbit_period_seconds;
        if delta > 0.0 {
            self.orbit_angle += orbit_speed * delta;
        }
        // The planet spins year_days times per orbit: one day per spin.
        let spin_step = orbit_speed * self.year_days as f64 * delta;
        self.total_spin += spin_step;
        if self.total_spin >= TAU {
            self.full_spins += (self.total_spin / TAU).floor() as u64;
            self.total_spin %= TAU;
        }
    }

    pub fn pause(&mut self, now_ms: f64) {
        if !self.paused {
            self.paused = true;
            self.pause_start = Some(now_ms);
        }
    }

    /// Resume, rebasing `last_timestamp` by the paused duration so the next
    /// tick's delta covers only running time, not the pause itself.
    pub fn resume(&mut self, now_ms: f64) {
        if self.paused {
            self.paused = false;
            if let (Some(start), Some(last)) = (self.pause_start, self.last_timestamp) {
                self.last_timestamp = Some(last + (now_ms - start));
            }
            self.pause_start = None;
        }
    }

    /// Toggle pause state; returns the new paused flag.
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        if self.paused {
            self.resume(now_ms);
        } else {
            self.pause(now_ms);
        }
        self.paused
    }

    /// Jump to an absolute day of the year. Fully overwrites clock-derived
    /// state; the next tick recomputes positions with delta 0 even while
    /// paused.
    pub fn jump_to_day(&mut self, day: u32) {
        let day = day.clamp(1, self.year_days);
        self.full_spins = (day - 1) as u64;
        self.total_spin = 0.0;
        self.orbit_angle = (day as f64 / self.year_days as f64) * TAU;
        self.needs_manual_update = true;
        log::debug!("jumped to day {day}");
    }

    /// Set the speed multiplier; non-positive values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
    }

    /// Accumulated rotations as whole days plus the fractional remainder.
    pub fn spin_fraction(&self) -> f64 {
        self.full_spins as f64 + self.total_spin / TAU
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn full_spins(&self) -> u64 {
        self.full_spins
    }

    pub fn total_spin(&self) -> f64 {
        self.total_spin
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::{moon_orbital_angle, wrap_angle};

    fn clock() -> SimulationClock {
        SimulationClock::new(62.8, 420)
    }

    #[test]
    fn first_tick_has_zero_delta() {
        let mut c = clock();
        assert_eq!(c.tick(1000.0), Some(0.0));
    }

    #[test]
    fn a_first_tick_at_timestamp_zero_still_counts() {
        // 0.0 is a valid host timestamp (the page's first frame), not an
        // "untouched" marker: the second tick must see the full second.
        let mut c = clock();
        assert_eq!(c.tick(0.0), Some(0.0));
        let delta = c.tick(1000.0).unwrap();
        assert!((delta - 1.0).abs() < 1e-12, "delta = {delta}");
    }

    #[test]
    fn day_counter_is_monotone_over_increasing_timestamps() {
        let mut c = clock();
        c.set_speed(4.0);
        let mut prev = 0;
        for i in 0..600 {
            c.tick(i as f64 * 16.0);
            assert!(c.full_spins() >= prev, "day counter decreased at tick {i}");
            prev = c.full_spins();
        }
        assert!(c.full_spins() > 0, "ten simulated seconds should pass a day");
        assert!(c.total_spin() >= 0.0 && c.total_spin() < TAU);
    }

    #[test]
    fn negative_delta_is_absorbed() {
        let mut c = clock();
        c.tick(10_000.0);
        let spins = c.full_spins();
        let angle = c.orbit_angle();
        // Host clock jumps backwards.
        c.tick(4_000.0);
        assert_eq!(c.full_spins(), spins);
        assert!((c.orbit_angle() - angle).abs() < 1e-12);
        assert!(c.orbit_angle().is_finite());
    }

    #[test]
    fn speed_multiplier_scales_delta() {
        let mut c = clock();
        c.tick(0.0);
        let d1 = c.tick(1000.0).unwrap();
        assert!((d1 - 1.0).abs() < 1e-12);
        c.set_speed(4.0);
        let d4 = c.tick(2000.0).unwrap();
        assert!((d4 - 4.0).abs() < 1e-12);
        // Non-positive speeds are ignored.
        c.set_speed(0.0);
        assert_eq!(c.speed(), 4.0);
    }

    #[test]
    fn paused_clock_ticks_return_none() {
        let mut c = clock();
        c.tick(0.0);
        c.pause(1000.0);
        assert_eq!(c.tick(1016.0), None);
        assert_eq!(c.tick(1032.0), None);
    }

    #[test]
    fn resume_does_not_replay_the_pause() {
        let mut c = clock();
        c.tick(0.0);
        c.tick(10_000.0);
        c.pause(10_000.0);
        // Wall clock advances 40 s while paused.
        c.resume(50_000.0);
        let delta = c.tick(51_000.0).unwrap();
        assert!((delta - 1.0).abs() < 1e-9, "delta = {delta}, expected ≈1 not ≈41");
    }

    #[test]
    fn manual_jump_while_paused_recomputes_once() {
        let mut c = clock();
        c.tick(0.0);
        c.pause(100.0);
        c.jump_to_day(200);
        // Exactly one delta-0 tick fires, then the clock is silent again.
        assert_eq!(c.tick(200.0), Some(0.0));
        assert_eq!(c.tick(216.0), None);
        assert_eq!(c.full_spins(), 199);
    }

    #[test]
    fn manual_jump_overwrites_prior_state() {
        let derive = |c: &SimulationClock| {
            (
                c.full_spins(),
                c.total_spin(),
                c.orbit_angle(),
                moon_orbital_angle(c.spin_fraction(), 70.0),
            )
        };

        let mut a = clock();
        a.jump_to_day(137);
        let mut b = clock();
        b.set_speed(4.0);
        b.tick(0.0);
        b.tick(30_000.0);
        b.jump_to_day(137);

        let (sa, ta, oa, ma) = derive(&a);
        let (sb, tb, ob, mb) = derive(&b);
        assert_eq!(sa, sb);
        assert_eq!(ta, tb);
        assert!((oa - ob).abs() < 1e-12);
        assert!((ma - mb).abs() < 1e-12);
    }

    #[test]
    fn jump_day_is_clamped_to_year() {
        let mut c = clock();
        c.jump_to_day(0);
        assert_eq!(c.full_spins(), 0);
        c.jump_to_day(100_000);
        assert_eq!(c.full_spins(), 419);
    }

    #[test]
    fn one_year_closes_six_mother_orbits() {
        // year 420 days, mother period 70 days ⇒ exactly 6 orbits per year:
        // after a full year the mother's wrapped angle returns to its start.
        let mut c = clock();
        let start = moon_orbital_angle(c.spin_fraction(), 70.0);
        c.tick(0.0);
        c.tick(62.8 * 1000.0); // one full orbit of wall time at 1×
        assert!(
            (c.spin_fraction() - 420.0).abs() < 1e-6,
            "spin_fraction = {}",
            c.spin_fraction()
        );
        let end = moon_orbital_angle(c.spin_fraction(), 70.0);
        // Circular difference: the angles may straddle the ±π branch cut.
        let diff = wrap_angle(end - start);
        assert!(diff.abs() < 1e-6, "start {start} end {end} diff {diff}");
    }
}
