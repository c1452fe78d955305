//! Home-sensor calibration table
//!
//! The physical home sensor sits just inside the wrap boundary, offset by a
//! padding so a crossing is unambiguous from either direction. Each crossing
//! re-anchors the tracked position to one of two known step values depending
//! on the approach direction.

use super::Direction;

/// Known physical positions of the home sensor, one per approach direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerTable {
    /// Slot 0: approached counter-clockwise; slot 1: approached clockwise
    positions: [i32; 2],
}

impl TriggerTable {
    /// Build the table for a circle of `max_position` steps with the sensor
    /// `padding` steps inside the wrap boundary.
    pub fn new(max_position: i32, padding: i32) -> Self {
        Self {
            positions: [padding, max_position - padding],
        }
    }

    /// The calibrated position for a crossing approached from `direction`.
    pub fn position(&self, approach: Direction) -> i32 {
        self.positions[approach.table_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_padding_inside_the_boundary() {
        let table = TriggerTable::new(4000, 50);
        assert_eq!(table.position(Direction::CounterClockwise), 50);
        assert_eq!(table.position(Direction::Clockwise), 3950);
    }

    #[test]
    fn zero_padding_collapses_to_the_boundary() {
        let table = TriggerTable::new(4000, 0);
        assert_eq!(table.position(Direction::CounterClockwise), 0);
        assert_eq!(table.position(Direction::Clockwise), 4000);
    }
}
