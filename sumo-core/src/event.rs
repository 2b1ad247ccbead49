//! Controller events
//!
//! The tick handler never fails. Everything worth telling the outside world
//! about a tick, state transitions and recovered faults alike, is collected
//! in a [`TickReport`] the caller can log.

use core::fmt;

use heapless::Vec;

use crate::controller::{OperatingMode, StrategyMode};
use crate::display::UnsupportedGlyph;
use crate::motor::DutyClamped;
use crate::speed::AnalogSampleTimeout;

/// Recovered faults. The tick substitutes a safe value and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Anomaly {
    /// A character outside the display set was replaced by the error glyph
    UnsupportedGlyph(UnsupportedGlyph),
    /// The speed sample timed out; the previous speed was kept
    AnalogSampleTimeout(AnalogSampleTimeout),
    /// A computed duty exceeded the PWM range and was clamped
    DutyClamped(DutyClamped),
}

impl From<UnsupportedGlyph> for Anomaly {
    fn from(e: UnsupportedGlyph) -> Self {
        Anomaly::UnsupportedGlyph(e)
    }
}

impl From<AnalogSampleTimeout> for Anomaly {
    fn from(e: AnalogSampleTimeout) -> Self {
        Anomaly::AnalogSampleTimeout(e)
    }
}

impl From<DutyClamped> for Anomaly {
    fn from(e: DutyClamped) -> Self {
        Anomaly::DutyClamped(e)
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UnsupportedGlyph(e) => e.fmt(f),
            Anomaly::AnalogSampleTimeout(e) => e.fmt(f),
            Anomaly::DutyClamped(e) => e.fmt(f),
        }
    }
}

/// Things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// Mode select advanced the operating mode and halted the robot
    ModeChanged(OperatingMode),
    /// The run button started the robot
    RunStarted,
    /// The run button stopped the robot
    RunStopped,
    /// The start burst ran its full length
    ForwardStartFinished,
    /// The front light started a backing maneuver
    BackingUpStarted,
    /// The backing maneuver timed out
    BackingUpFinished,
    /// A new strategy was selected
    StrategySelected(StrategyMode),
    /// A fault was recovered from
    Anomaly(Anomaly),
}

/// Maximum events recorded per tick
pub const MAX_TICK_EVENTS: usize = 6;

/// Events of one tick, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    events: Vec<ControllerEvent, MAX_TICK_EVENTS>,
    dropped: usize,
}

impl TickReport {
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            dropped: 0,
        }
    }

    /// Records an event; once full, further events are counted and dropped
    pub fn push(&mut self, event: ControllerEvent) {
        if self.events.push(event).is_err() {
            self.dropped += 1;
        }
    }

    pub fn anomaly(&mut self, anomaly: impl Into<Anomaly>) {
        self.push(ControllerEvent::Anomaly(anomaly.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControllerEvent> {
        self.events.iter()
    }

    pub fn contains(&self, event: &ControllerEvent) -> bool {
        self.events.contains(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Events that did not fit
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Default for TickReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;
    use std::vec::Vec;

    use super::*;

    #[test]
    fn keeps_events_in_order() {
        let mut report = TickReport::new();
        report.push(ControllerEvent::RunStarted);
        report.anomaly(AnalogSampleTimeout);
        let events: Vec<_> = report.iter().copied().collect();
        assert_eq!(
            events,
            [
                ControllerEvent::RunStarted,
                ControllerEvent::Anomaly(Anomaly::AnalogSampleTimeout(AnalogSampleTimeout)),
            ]
        );
    }

    #[test]
    fn overflow_is_counted() {
        let mut report = TickReport::new();
        for _ in 0..MAX_TICK_EVENTS + 2 {
            report.push(ControllerEvent::RunStopped);
        }
        report.push(ControllerEvent::RunStarted);
        assert_eq!(report.len(), MAX_TICK_EVENTS);
        assert_eq!(report.dropped(), 3);
        // The oldest events are kept, overflow never displaces them
        assert!(!report.contains(&ControllerEvent::RunStarted));
        assert!(report.iter().all(|e| *e == ControllerEvent::RunStopped));
    }

    #[test]
    fn anomaly_display_delegates() {
        let anomaly = Anomaly::from(UnsupportedGlyph('%'));
        assert_eq!(anomaly.to_string(), "Unsupported display character '%'");
    }
}
