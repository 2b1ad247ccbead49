//! Analog speed setting
//!
//! The operator sets pursuit speed with a potentiometer. Raw 10-bit samples
//! are mapped linearly onto the motor speed range:
//!
//! ```text
//! speed = raw * SPEED_MAX / ADC_MAX      (integer division)
//! ```

use core::fmt;

use crate::config::{ADC_MAX, SPEED_MAX};

/// The potentiometer conversion did not finish within its time budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogSampleTimeout;

impl fmt::Display for AnalogSampleTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Speed potentiometer sample timed out")
    }
}

/// Analog input collaborator
pub trait SpeedPotentiometer {
    /// Starts a conversion and waits, bounded, for a raw value in `0..=ADC_MAX`
    fn sample(&mut self) -> Result<u16, AnalogSampleTimeout>;
}

/// Linear range map with integer arithmetic, truncating toward zero
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Converts a raw sample to a motor speed in `0..=SPEED_MAX`
pub fn motor_speed_from_raw(raw: u16) -> u16 {
    let raw = raw.min(ADC_MAX);
    map_range(
        i32::from(raw),
        0,
        i32::from(ADC_MAX),
        0,
        i32::from(SPEED_MAX),
    ) as u16
}

/// Samples the potentiometer and returns the mapped motor speed
pub fn read_motor_speed<P: SpeedPotentiometer + ?Sized>(pot: &mut P) -> Result<u16, AnalogSampleTimeout> {
    pot.sample().map(motor_speed_from_raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBoard;

    #[test]
    fn map_range_matches_integer_formula() {
        assert_eq!(map_range(512, 0, 1023, 0, 1000), 500);
        assert_eq!(map_range(5, 0, 10, 100, 200), 150);
    }

    #[test]
    fn raw_range_endpoints() {
        assert_eq!(motor_speed_from_raw(0), 0);
        assert_eq!(motor_speed_from_raw(1023), 1000);
        assert_eq!(motor_speed_from_raw(512), 500);
        assert_eq!(motor_speed_from_raw(1), 0);
    }

    #[test]
    fn raw_values_above_range_saturate() {
        assert_eq!(motor_speed_from_raw(4095), 1000);
    }

    #[test]
    fn read_maps_sample() {
        let mut board = MockBoard::new();
        board.set_potentiometer(Some(767));
        assert_eq!(read_motor_speed(&mut board), Ok(749));
    }

    #[test]
    fn read_propagates_timeout() {
        let mut board = MockBoard::new();
        board.set_potentiometer(None);
        assert_eq!(read_motor_speed(&mut board), Err(AnalogSampleTimeout));
    }
}
