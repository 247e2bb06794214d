/// Control events from the UI layer.
/// The web bridge maps raw (kind, value) pairs to these; the view runner
/// drains the queue once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    TogglePause,
    /// Speed multiplier selection (0.25×, 1×, 4×).
    SetSpeed(f64),
    /// Absolute day jump from the day slider, [1, year_days].
    JumpToDay(u32),
    ToggleTrails(bool),
    ToggleLines(bool),
    ToggleLabels(bool),
}

/// A queue of control events.
/// JS pushes events in; the view runner reads and drains them each frame.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}
