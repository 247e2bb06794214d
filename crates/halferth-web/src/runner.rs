use halferth_sim::{
    CalendarDate, ControlEvent, ControlQueue, FramePacket, SharedState, SimConfig, Trail,
    WorldDriver,
};

/// Drives the 3D view's frame loop: drains control events, ticks the world
/// driver, packs the flat frame buffer, and produces the record to publish
/// for the sky overlay.
///
/// The browser entry points live in `lib.rs` as free functions over a
/// `thread_local!` runner, because wasm-bindgen cannot export stateful
/// structs with lifetimes cleanly.
pub struct ViewRunner {
    driver: WorldDriver,
    controls: ControlQueue,
    packet: FramePacket,
    mother_trail: Trail,
    daughter_trail: Trail,
    trails_enabled: bool,
    lines_visible: bool,
    labels_visible: bool,
    /// Last published record, re-sent (with a fresh pause flag) on frames
    /// where the paused clock produced nothing.
    last_shared: SharedState,
}

impl ViewRunner {
    pub fn new(config: SimConfig) -> Self {
        let max_trail_points = config.max_trail_points;
        Self {
            driver: WorldDriver::new(config),
            controls: ControlQueue::new(),
            packet: FramePacket::default(),
            mother_trail: Trail::new(max_trail_points),
            daughter_trail: Trail::new(max_trail_points),
            trails_enabled: false,
            lines_visible: true,
            labels_visible: true,
            last_shared: SharedState::default(),
        }
    }

    pub fn push_control(&mut self, event: ControlEvent) {
        self.controls.push(event);
    }

    /// Run one frame: apply controls, advance the simulation, refresh the
    /// packet and trails. Returns the record to publish to the bridge.
    pub fn tick(&mut self, now_ms: f64) -> SharedState {
        for event in self.controls.drain() {
            self.apply_control(event, now_ms);
        }

        if let Some(frame) = self.driver.tick(now_ms) {
            self.packet = FramePacket::pack(
                &frame,
                self.driver.clock().is_paused(),
                self.trails_enabled,
                self.lines_visible,
                self.labels_visible,
            );
            if self.trails_enabled && frame.delta > 0.0 {
                self.mother_trail.push(frame.mother.world);
                self.daughter_trail.push(frame.daughter.world);
            }
            self.last_shared = self.driver.shared_state(&frame);
        } else {
            // Paused: positions stand, but the pause flag must still reach
            // the overlay and the packet.
            self.last_shared.paused = true;
            self.packet.paused = 1.0;
        }
        self.last_shared
    }

    fn apply_control(&mut self, event: ControlEvent, now_ms: f64) {
        match event {
            ControlEvent::TogglePause => {
                self.driver.clock_mut().toggle_pause(now_ms);
            }
            ControlEvent::SetSpeed(speed) => self.driver.clock_mut().set_speed(speed),
            ControlEvent::JumpToDay(day) => self.driver.clock_mut().jump_to_day(day),
            ControlEvent::ToggleTrails(enabled) => {
                self.trails_enabled = enabled;
                if !enabled {
                    self.mother_trail.clear();
                    self.daughter_trail.clear();
                }
            }
            ControlEvent::ToggleLines(visible) => self.lines_visible = visible,
            ControlEvent::ToggleLabels(visible) => self.labels_visible = visible,
        }
    }

    pub fn config(&self) -> &SimConfig {
        self.driver.config()
    }

    /// Current day of the year, for the slider write-back.
    pub fn current_day(&self) -> u32 {
        CalendarDate::from_spins(self.driver.clock().full_spins(), self.config().year_days)
            .day_of_year
    }

    /// The day/season status string for the UI.
    pub fn status_text(&self) -> String {
        CalendarDate::from_spins(self.driver.clock().full_spins(), self.config().year_days)
            .display()
    }

    // ---- Pointer accessors for JS-side reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        &self.packet as *const FramePacket as *const f32
    }

    pub fn mother_trail(&self) -> &Trail {
        &self.mother_trail
    }

    pub fn daughter_trail(&self) -> &Trail {
        &self.daughter_trail
    }
}
