pub mod calendar;
pub mod clock;
pub mod config;
pub mod controls;
pub mod frame;
pub mod orbit;
pub mod sky;
pub mod state;
pub mod trail;
pub mod world;

// Re-export key types at crate root for convenience
pub use calendar::{CalendarDate, SeasonHalf, SEASONS};
pub use clock::SimulationClock;
pub use config::{MoonConfig, SimConfig};
pub use controls::{ControlEvent, ControlQueue};
pub use frame::FramePacket;
pub use orbit::{elliptical_position, moon_orbital_angle, wrap_angle, VisibilityWindow};
pub use sky::{place_moon, roll_angle, HorizonArc, SpritePlacement};
pub use state::{MoonState, SharedState};
pub use trail::Trail;
pub use world::{SeasonMarker, WorldDriver, WorldFrame, SEASON_MARKERS};
