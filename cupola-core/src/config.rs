//! Configuration type definitions

use crate::motion::TriggerTable;

/// Dome geometry and control-loop timing
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DomeConfig {
    /// Motor steps for one full dome revolution
    pub max_position: i32,
    /// Park target for `park`/`home`
    pub home_position: i32,
    /// Offset of the home sensor inside the wrap boundary, in steps
    pub trigger_padding: i32,
    /// Steps consumed per control-loop iteration before yielding
    pub batch_size: i32,
    /// Control-loop iterations between position broadcasts
    pub broadcast_interval: u32,
    /// Half of one step pulse period, in microseconds
    pub pulse_half_period_us: u32,
    /// Sleep between iterations while stationary, in milliseconds
    pub idle_poll_ms: u64,
}

impl Default for DomeConfig {
    fn default() -> Self {
        Self {
            max_position: 4000, // 200 full steps * 20:1 ring gear
            home_position: 0,
            trigger_padding: 50,
            batch_size: 8,
            broadcast_interval: 25,
            pulse_half_period_us: 500,
            idle_poll_ms: 20,
        }
    }
}

impl DomeConfig {
    /// Check if a commanded target is inside the accepted range.
    ///
    /// The upper bound is inclusive: `max_position` names the same physical
    /// point as zero.
    pub fn accepts_target(&self, target: i32) -> bool {
        target >= 0 && target <= self.max_position
    }

    /// Build the sensor calibration table for this geometry.
    pub fn trigger_table(&self) -> TriggerTable {
        TriggerTable::new(self.max_position, self.trigger_padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Direction;

    #[test]
    fn target_bounds_are_inclusive() {
        let config = DomeConfig::default();
        assert!(config.accepts_target(0));
        assert!(config.accepts_target(4000));
        assert!(!config.accepts_target(-1));
        assert!(!config.accepts_target(4001));
    }

    #[test]
    fn trigger_table_uses_the_padding() {
        let config = DomeConfig {
            max_position: 1000,
            trigger_padding: 10,
            ..Default::default()
        };
        let table = config.trigger_table();
        assert_eq!(table.position(Direction::CounterClockwise), 10);
        assert_eq!(table.position(Direction::Clockwise), 990);
    }

    #[test]
    fn defaults_are_consistent() {
        let config = DomeConfig::default();
        assert!(config.batch_size > 0);
        assert!(config.batch_size < config.max_position);
        assert!(config.trigger_padding > 0);
        assert!(config.broadcast_interval > 0);
        assert!(config.accepts_target(config.home_position));
    }
}
