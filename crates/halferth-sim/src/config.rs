use serde::{Deserialize, Serialize};

/// Static simulation configuration, loaded from JSON at startup.
///
/// None of the formulas in the clock or orbit modules depend on these exact
/// values — changing a period or eccentricity here is always enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Planet orbit radius around the sun, world units.
    pub orbit_radius: f64,
    /// Axial tilt in degrees (also tilts the moon orbit plane).
    pub axial_tilt_deg: f64,
    /// Length of the year in planetary days.
    pub year_days: u32,
    /// Length of one planetary day in hours (display only).
    pub day_hours: f64,
    /// Wall-clock seconds per full orbit at 1× speed.
    pub orbit_period_seconds: f64,
    /// Capacity of each moon's trail ring buffer, in points.
    pub max_trail_points: usize,
    pub mother: MoonConfig,
    pub daughter: MoonConfig,
}

/// Per-moon orbital parameters. Immutable after construction; the dependent
/// ellipse quantities are derived on demand, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoonConfig {
    /// Orbital period in planetary days.
    pub orbit_days: f64,
    /// Eccentricity, 0 ≤ e < 1.
    pub eccentricity: f64,
    /// Semi-major axis length, world units.
    pub semi_major_axis: f64,
    /// Body radius, world units.
    pub radius: f64,
}

impl MoonConfig {
    /// `semi_major × √(1 − e²)`.
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).max(0.0).sqrt()
    }

    /// Distance from the ellipse center to the focus: `semi_major × e`.
    pub fn focus_offset(&self) -> f64 {
        self.semi_major_axis * self.eccentricity
    }

    fn sanitized(mut self, name: &str) -> Self {
        if !(0.0..1.0).contains(&self.eccentricity) {
            log::warn!(
                "{name}: eccentricity {} outside [0, 1), clamping",
                self.eccentricity
            );
            self.eccentricity = self.eccentricity.clamp(0.0, 0.999);
        }
        if self.orbit_days <= 0.0 {
            log::warn!("{name}: non-positive orbit_days {}, using 1", self.orbit_days);
            self.orbit_days = 1.0;
        }
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 30.0,
            axial_tilt_deg: 12.5,
            year_days: 420,
            day_hours: 21.0,
            orbit_period_seconds: 62.8,
            max_trail_points: 9000,
            mother: MoonConfig {
                orbit_days: 70.0,
                eccentricity: 0.35,
                semi_major_axis: 7.0,
                radius: 1.0,
            },
            daughter: MoonConfig {
                orbit_days: 35.0,
                eccentricity: 0.3,
                semi_major_axis: 7.0 * (413.0 / 656.0),
                radius: 0.6,
            },
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string. Missing fields fall back to
    /// the Halferth defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Serialize the active configuration so the UI layer can render its
    /// controls from the same values the core uses.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Clamp degenerate values into usable ranges, logging each repair.
    pub fn sanitized(mut self) -> Self {
        if self.year_days < 12 {
            log::warn!("year_days {} too short for 6 seasons, using 12", self.year_days);
            self.year_days = 12;
        }
        if self.orbit_period_seconds <= 0.0 {
            log::warn!(
                "non-positive orbit_period_seconds {}, using default",
                self.orbit_period_seconds
            );
            self.orbit_period_seconds = Self::default().orbit_period_seconds;
        }
        self.mother = self.mother.sanitized("mother");
        self.daughter = self.daughter.sanitized("daughter");
        self
    }
}
