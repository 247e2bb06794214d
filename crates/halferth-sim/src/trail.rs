use glam::DVec3;

/// Fixed-capacity ring of world positions, stored as a flat xyz f32 buffer
/// the line renderer reads directly through a pointer.
pub struct Trail {
    positions: Vec<f32>,
    head: usize,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            positions: vec![0.0; capacity * 3],
            head: 0,
            capacity,
        }
    }

    /// Record a position, overwriting the oldest point once full.
    pub fn push(&mut self, pos: DVec3) {
        let i = self.head * 3;
        self.positions[i] = pos.x as f32;
        self.positions[i + 1] = pos.y as f32;
        self.positions[i + 2] = pos.z as f32;
        self.head = (self.head + 1) % self.capacity;
    }

    /// Zero the buffer and rewind, as when trails are toggled off.
    pub fn clear(&mut self) {
        self.positions.fill(0.0);
        self.head = 0;
    }

    /// Next write slot, also the oldest point once the ring has wrapped.
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    pub fn len_floats(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_writes_in_order() {
        let mut t = Trail::new(4);
        t.push(DVec3::new(1.0, 2.0, 3.0));
        t.push(DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(t.head(), 2);
        assert_eq!(&t.positions[0..6], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn ring_wraps_over_the_oldest_point() {
        let mut t = Trail::new(2);
        t.push(DVec3::new(1.0, 1.0, 1.0));
        t.push(DVec3::new(2.0, 2.0, 2.0));
        t.push(DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(t.head(), 1);
        assert_eq!(&t.positions[0..3], &[3.0, 3.0, 3.0]);
    }

    #[test]
    fn clear_rewinds_and_zeroes() {
        let mut t = Trail::new(3);
        t.push(DVec3::new(9.0, 9.0, 9.0));
        t.clear();
        assert_eq!(t.head(), 0);
        assert!(t.positions.iter().all(|&v| v == 0.0));
    }
}
