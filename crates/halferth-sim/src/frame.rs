use bytemuck::{Pod, Zeroable};

use crate::calendar::SeasonHalf;
use crate::world::WorldFrame;

/// Flat per-frame record read by the JS renderer through a pointer.
///
/// Layout (all values f32 / 4 bytes, wire format — keep in sync with the
/// TypeScript reader):
/// ```text
/// [0..3)   planet position x, y, z
/// [3]      planet spin rotation (radians)
/// [4..7)   mother world position x, y, z
/// [7]      mother facing rotation
/// [8..11)  daughter world position x, y, z
/// [11]     daughter facing rotation
/// [12]     day of year (1-based)
/// [13]     season index (0..6)
/// [14]     day of civic month (1-based)
/// [15]     season half (0 = Low, 1 = High)
/// [16]     paused flag
/// [17..20) trails / lines / labels visibility flags
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct FramePacket {
    pub planet_x: f32,
    pub planet_y: f32,
    pub planet_z: f32,
    pub spin_rotation: f32,
    pub mother_x: f32,
    pub mother_y: f32,
    pub mother_z: f32,
    pub mother_facing: f32,
    pub daughter_x: f32,
    pub daughter_y: f32,
    pub daughter_z: f32,
    pub daughter_facing: f32,
    pub day: f32,
    pub season_index: f32,
    pub month_day: f32,
    pub season_half: f32,
    pub paused: f32,
    pub trails: f32,
    pub lines: f32,
    pub labels: f32,
}

impl FramePacket {
    pub const FLOATS: usize = 20;

    /// Pack a computed frame plus the renderer visibility flags.
    pub fn pack(frame: &WorldFrame, paused: bool, trails: bool, lines: bool, labels: bool) -> Self {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        Self {
            planet_x: frame.planet_pos.x as f32,
            planet_y: frame.planet_pos.y as f32,
            planet_z: frame.planet_pos.z as f32,
            spin_rotation: frame.spin_rotation as f32,
            mother_x: frame.mother.world.x as f32,
            mother_y: frame.mother.world.y as f32,
            mother_z: frame.mother.world.z as f32,
            mother_facing: frame.mother.facing as f32,
            daughter_x: frame.daughter.world.x as f32,
            daughter_y: frame.daughter.world.y as f32,
            daughter_z: frame.daughter.world.z as f32,
            daughter_facing: frame.daughter.facing as f32,
            day: frame.date.day_of_year as f32,
            season_index: frame.date.season_index as f32,
            month_day: frame.date.month_day as f32,
            season_half: match frame.date.half {
                SeasonHalf::Low => 0.0,
                SeasonHalf::High => 1.0,
            },
            paused: flag(paused),
            trails: flag(trails),
            lines: flag(lines),
            labels: flag(labels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::world::WorldDriver;

    #[test]
    fn packet_size_matches_layout() {
        assert_eq!(
            std::mem::size_of::<FramePacket>(),
            FramePacket::FLOATS * std::mem::size_of::<f32>()
        );
    }

    #[test]
    fn pack_carries_frame_values() {
        let mut d = WorldDriver::new(SimConfig::default());
        d.clock_mut().jump_to_day(100);
        let frame = d.tick(0.0).unwrap();
        let p = FramePacket::pack(&frame, false, true, false, true);
        assert_eq!(p.day, 100.0);
        assert_eq!(p.paused, 0.0);
        assert_eq!(p.trails, 1.0);
        assert_eq!(p.lines, 0.0);
        assert_eq!(p.labels, 1.0);
        assert!((p.planet_x as f64 - frame.planet_pos.x).abs() < 1e-3);
    }
}
