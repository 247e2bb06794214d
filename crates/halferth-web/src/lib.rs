pub mod runner;
pub mod sky;

use std::cell::{Cell, RefCell};

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use halferth_sim::{ControlEvent, SharedState, SimConfig, SEASON_MARKERS};

use crate::runner::ViewRunner;
use crate::sky::SkyRenderer;

// ── Control event kinds from the UI layer ────────────────────────────

pub const CONTROL_TOGGLE_PAUSE: u32 = 1;
pub const CONTROL_SET_SPEED: u32 = 2;
pub const CONTROL_JUMP_TO_DAY: u32 = 3;
pub const CONTROL_TOGGLE_TRAILS: u32 = 4;
pub const CONTROL_TOGGLE_LINES: u32 = 5;
pub const CONTROL_TOGGLE_LABELS: u32 = 6;

thread_local! {
    static RUNNER: RefCell<Option<ViewRunner>> = RefCell::new(None);
    static SKY: RefCell<Option<SkyRenderer>> = RefCell::new(None);
    /// The shared bridge record. The view loop replaces the whole record via
    /// `set`; the sky loop copies it via `get`. Both loops are cooperative
    /// callbacks on the same thread, so a whole-record swap is all the
    /// synchronization this needs — a one-frame-stale read is fine.
    static SHARED: Cell<SharedState> = Cell::new(SharedState::default());
}

fn with_runner<R>(f: impl FnOnce(&mut ViewRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

fn install_runner(config: SimConfig) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(ViewRunner::new(config));
    });
    log::info!("halferth: simulation initialized");
}

// ── View-loop exports ────────────────────────────────────────────────

#[wasm_bindgen]
pub fn sim_init() {
    install_runner(SimConfig::default());
}

/// Initialize with a JSON configuration. Unparseable input falls back to
/// the defaults with a warning rather than failing the page.
#[wasm_bindgen]
pub fn sim_init_with_config(json: &str) {
    let config = match SimConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
            log::warn!("config rejected ({err}), using defaults");
            SimConfig::default()
        }
    };
    install_runner(config);
}

/// One 3D-view frame. `now_ms` is the host's frame timestamp
/// (`performance.now()`).
#[wasm_bindgen]
pub fn sim_tick(now_ms: f64) {
    let shared = with_runner(|r| r.tick(now_ms));
    SHARED.with(|cell| cell.set(shared));
}

/// UI control event: `(kind, value)` pairs mapped to typed events.
#[wasm_bindgen]
pub fn sim_control(kind: u32, value: f32) {
    let event = match kind {
        CONTROL_TOGGLE_PAUSE => ControlEvent::TogglePause,
        CONTROL_SET_SPEED => ControlEvent::SetSpeed(value as f64),
        CONTROL_JUMP_TO_DAY => ControlEvent::JumpToDay(value as u32),
        CONTROL_TOGGLE_TRAILS => ControlEvent::ToggleTrails(value != 0.0),
        CONTROL_TOGGLE_LINES => ControlEvent::ToggleLines(value != 0.0),
        CONTROL_TOGGLE_LABELS => ControlEvent::ToggleLabels(value != 0.0),
        _ => {
            log::warn!("unknown control kind {kind}");
            return;
        }
    };
    with_runner(|r| r.push_control(event));
}

// ---- Frame data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_frame_floats() -> u32 {
    halferth_sim::FramePacket::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_status_text() -> String {
    with_runner(|r| r.status_text())
}

#[wasm_bindgen]
pub fn get_current_day() -> u32 {
    with_runner(|r| r.current_day())
}

// ---- Trail accessors ----

#[wasm_bindgen]
pub fn get_mother_trail_ptr() -> *const f32 {
    with_runner(|r| r.mother_trail().as_ptr())
}

#[wasm_bindgen]
pub fn get_daughter_trail_ptr() -> *const f32 {
    with_runner(|r| r.daughter_trail().as_ptr())
}

#[wasm_bindgen]
pub fn get_trail_capacity() -> u32 {
    with_runner(|r| r.mother_trail().capacity() as u32)
}

#[wasm_bindgen]
pub fn get_mother_trail_head() -> u32 {
    with_runner(|r| r.mother_trail().head() as u32)
}

#[wasm_bindgen]
pub fn get_daughter_trail_head() -> u32 {
    with_runner(|r| r.daughter_trail().head() as u32)
}

// ---- Static scene data for the renderer/UI ----

#[wasm_bindgen]
pub fn get_config_json() -> String {
    with_runner(|r| r.config().to_json())
}

#[wasm_bindgen]
pub fn get_year_days() -> u32 {
    with_runner(|r| r.config().year_days)
}

#[wasm_bindgen]
pub fn get_orbit_radius() -> f64 {
    with_runner(|r| r.config().orbit_radius)
}

#[wasm_bindgen]
pub fn get_axial_tilt_deg() -> f64 {
    with_runner(|r| r.config().axial_tilt_deg)
}

#[wasm_bindgen]
pub fn get_marker_count() -> u32 {
    SEASON_MARKERS.len() as u32
}

#[wasm_bindgen]
pub fn get_marker_label(index: u32) -> String {
    SEASON_MARKERS
        .get(index as usize)
        .map(|m| m.label.to_string())
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_marker_angle_deg(index: u32) -> f64 {
    SEASON_MARKERS
        .get(index as usize)
        .map(|m| m.angle_deg)
        .unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_marker_color(index: u32) -> u32 {
    SEASON_MARKERS
        .get(index as usize)
        .map(|m| m.color)
        .unwrap_or(0xffffff)
}

// ── Sky-loop exports ─────────────────────────────────────────────────

/// Attach the sky overlay to its canvas. Call after `sim_init` — the
/// visibility windows come from the active configuration.
#[wasm_bindgen]
pub fn sky_init(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let (mother_e, daughter_e) = with_runner(|r| {
        (
            r.config().mother.eccentricity,
            r.config().daughter.eccentricity,
        )
    });
    let renderer = SkyRenderer::new(canvas, mother_e, daughter_e)?;
    SKY.with(|cell| {
        *cell.borrow_mut() = Some(renderer);
    });
    log::info!("halferth: sky overlay initialized");
    Ok(())
}

/// Hand the overlay its image sources: the two off-screen moon render
/// canvases and the horizon silhouette.
#[wasm_bindgen]
pub fn sky_set_sources(
    mother: HtmlCanvasElement,
    daughter: HtmlCanvasElement,
    horizon: HtmlImageElement,
) {
    SKY.with(|cell| {
        if let Some(renderer) = cell.borrow_mut().as_mut() {
            renderer.set_sources(mother, daughter, horizon);
        }
    });
}

/// One sky-overlay frame, on the overlay's own callback loop. Reads the
/// bridge record as a snapshot; runs at full rate even while paused.
#[wasm_bindgen]
pub fn sky_tick() -> Result<(), JsValue> {
    let shared = SHARED.with(|cell| cell.get());
    SKY.with(|cell| match cell.borrow().as_ref() {
        Some(renderer) => renderer.draw(&shared),
        None => Ok(()),
    })
}
