//! Events that trigger operation transitions

/// Events that can move the motion engine between operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A valid target was accepted by `set_target` (or `park`)
    TargetAccepted,
    /// A full rotation was requested
    FullRotateStarted,
    /// The homing sequence was requested
    ResetStarted,
    /// The remaining step count reached zero
    StepsExhausted,
    /// The home sensor fired during motion
    SensorTriggered,
}

impl Event {
    /// Check if this event originates from a command entry point
    pub fn is_command(&self) -> bool {
        matches!(
            self,
            Event::TargetAccepted | Event::FullRotateStarted | Event::ResetStarted
        )
    }

    /// Check if this event originates from the control loop itself
    pub fn is_loop_event(&self) -> bool {
        !self.is_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_events() {
        assert!(Event::TargetAccepted.is_command());
        assert!(Event::FullRotateStarted.is_command());
        assert!(Event::ResetStarted.is_command());
        assert!(!Event::StepsExhausted.is_command());
        assert!(!Event::SensorTriggered.is_command());
    }

    #[test]
    fn loop_events() {
        assert!(Event::StepsExhausted.is_loop_event());
        assert!(Event::SensorTriggered.is_loop_event());
        assert!(!Event::TargetAccepted.is_loop_event());
    }
}
