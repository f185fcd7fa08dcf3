//! Precomputed edge table for one full engine cycle
//!
//! The sequencer never walks the patterns directly. At construction the
//! crank and cam patterns are flattened into a single read-only table of
//! level changes over 720°, sorted by phase. Cyclic behavior is an index
//! into this table plus a wrap-aware phase accumulator, not a linked
//! structure.

use heapless::Vec;

use super::cam::{CamPattern, MAX_CAM_EDGES};
use super::crank::{ToothPattern, MAX_TEETH};
use crate::config::ConfigError;
use crate::scheduler::edge::{Channel, Edge, Level};
use crate::{CYCLE_X10, REVOLUTION_X10};

/// Table capacity: every tooth contributes a rising and falling edge in
/// each of the two crank revolutions, plus the cam edges.
pub const MAX_TABLE_EVENTS: usize = MAX_TEETH * 4 + MAX_CAM_EDGES;

/// One entry in the edge table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    /// Phase within the 720° cycle, tenths of a degree
    pub phase_x10: u16,
    /// The level change due at this phase
    pub edge: Edge,
}

/// Read-only table of all edges in one engine cycle
#[derive(Debug, Clone)]
pub struct EdgeTable {
    events: Vec<EdgeEvent, MAX_TABLE_EVENTS>,
}

impl EdgeTable {
    /// Flatten crank + cam patterns into a sorted edge table
    ///
    /// Crank teeth produce a rising edge at their angular position and a
    /// falling edge half a pitch later; gap positions produce nothing.
    /// Cam offsets toggle the cam line, starting with a rising edge.
    /// Coincident phases are ordered crank before cam.
    pub fn build(tooth: &ToothPattern, cam: &CamPattern) -> Result<Self, ConfigError> {
        let mut events: Vec<EdgeEvent, MAX_TABLE_EVENTS> = Vec::new();
        let pitch = tooth.degrees_per_tooth_x10();

        for rev in 0..2u32 {
            for index in 0..tooth.teeth_per_revolution() {
                if tooth.is_in_gap(index) {
                    continue;
                }
                let rising = rev * REVOLUTION_X10 + tooth.degrees_at_x10(index);
                push_event(&mut events, rising, Edge::new(Channel::Crank, Level::Active))?;
                push_event(
                    &mut events,
                    rising + pitch / 2,
                    Edge::new(Channel::Crank, Level::Idle),
                )?;
            }
        }

        for (i, &offset) in cam.offsets_x10().iter().enumerate() {
            let level = if i % 2 == 0 { Level::Active } else { Level::Idle };
            push_event(
                &mut events,
                offset as u32,
                Edge::new(Channel::Cam, level),
            )?;
        }

        events.sort_unstable_by_key(|e| (e.phase_x10, e.edge.channel.rank()));
        Ok(Self { events })
    }

    /// Number of events per cycle
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the table holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, sorted by phase
    pub fn events(&self) -> &[EdgeEvent] {
        &self.events
    }

    /// Event at a table index (index must be < `len()`)
    pub fn event(&self, index: usize) -> &EdgeEvent {
        &self.events[index]
    }
}

fn push_event(
    events: &mut Vec<EdgeEvent, MAX_TABLE_EVENTS>,
    phase_x10: u32,
    edge: Edge,
) -> Result<(), ConfigError> {
    debug_assert!(phase_x10 < CYCLE_X10);
    events
        .push(EdgeEvent {
            phase_x10: phase_x10 as u16,
            edge,
        })
        .map_err(|_| ConfigError::TableOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sixty_minus_two() -> EdgeTable {
        let tooth = ToothPattern::new(60, 2).unwrap();
        let cam = CamPattern::new(&[900, 4500]).unwrap();
        EdgeTable::build(&tooth, &cam).unwrap()
    }

    #[test]
    fn test_event_counts() {
        let table = sixty_minus_two();
        // 58 real teeth * 2 edges * 2 revolutions + 2 cam edges
        assert_eq!(table.len(), 58 * 2 * 2 + 2);

        let crank = table
            .events()
            .iter()
            .filter(|e| e.edge.channel == Channel::Crank)
            .count();
        let cam = table.len() - crank;
        assert_eq!(crank, 232);
        assert_eq!(cam, 2);
    }

    #[test]
    fn test_sorted_by_phase() {
        let table = sixty_minus_two();
        for pair in table.events().windows(2) {
            assert!(pair[0].phase_x10 <= pair[1].phase_x10);
        }
    }

    #[test]
    fn test_coincident_crank_before_cam() {
        // Cam rising at 90.0° lands exactly on crank tooth 15's rising edge
        let table = sixty_minus_two();
        let at_900: std::vec::Vec<_> = table
            .events()
            .iter()
            .filter(|e| e.phase_x10 == 900)
            .collect();
        assert_eq!(at_900.len(), 2);
        assert_eq!(at_900[0].edge.channel, Channel::Crank);
        assert_eq!(at_900[1].edge.channel, Channel::Cam);
    }

    #[test]
    fn test_gap_has_no_events() {
        let table = sixty_minus_two();
        // First revolution gap spans teeth 58 and 59: 348.0°..360.0°
        let in_gap = table
            .events()
            .iter()
            .filter(|e| e.phase_x10 >= 3480 && e.phase_x10 < 3600)
            .count();
        assert_eq!(in_gap, 0);
    }

    #[test]
    fn test_cam_levels_alternate() {
        let tooth = ToothPattern::new(12, 0).unwrap();
        let cam = CamPattern::new(&[100, 1900, 3700, 5500]).unwrap();
        let table = EdgeTable::build(&tooth, &cam).unwrap();
        let cam_events: std::vec::Vec<_> = table
            .events()
            .iter()
            .filter(|e| e.edge.channel == Channel::Cam)
            .collect();
        assert_eq!(cam_events.len(), 4);
        assert_eq!(cam_events[0].edge.level, Level::Active);
        assert_eq!(cam_events[1].edge.level, Level::Idle);
        assert_eq!(cam_events[2].edge.level, Level::Active);
        assert_eq!(cam_events[3].edge.level, Level::Idle);
    }
}
