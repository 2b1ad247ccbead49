//! Motor command translation
//!
//! Each motor is driven by an H-bridge with one PWM duty input and two
//! direction pins:
//!
//! | Direction | forward pin | reverse pin | duty        |
//! |-----------|-------------|-------------|-------------|
//! | Forward   | high        | low         | as commanded|
//! | Reverse   | low         | high        | as commanded|
//! | Stop      | low         | low         | 0           |
//!
//! A command with duty 0 always coasts with both pins low, whatever its
//! direction. There is no ramping and no guard against reversing at speed;
//! callers switch direction directly.

use core::fmt;

use crate::config::MAX_DUTY;

/// Which motor a command is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorSide {
    Left,
    Right,
}

impl MotorSide {
    pub fn index(self) -> usize {
        match self {
            MotorSide::Left => 0,
            MotorSide::Right => 1,
        }
    }
}

/// Motor direction states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
    /// Both direction pins low, motor freewheels
    Stop,
}

/// Desired direction and duty for one motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub direction: Direction,
    /// Duty cycle in `0..=MAX_DUTY`
    pub duty: u16,
}

impl MotorCommand {
    pub const STOP: Self = Self {
        direction: Direction::Stop,
        duty: 0,
    };

    pub const fn forward(duty: u16) -> Self {
        Self {
            direction: Direction::Forward,
            duty,
        }
    }

    pub const fn reverse(duty: u16) -> Self {
        Self {
            direction: Direction::Reverse,
            duty,
        }
    }

    /// Levels of the (forward, reverse) direction pins for this command
    pub fn pin_levels(&self) -> (bool, bool) {
        match self.direction {
            _ if self.duty == 0 => (false, false),
            Direction::Forward => (true, false),
            Direction::Reverse => (false, true),
            Direction::Stop => (false, false),
        }
    }

    /// Duty actually written to the PWM; stop always writes 0
    pub fn applied_duty(&self) -> u16 {
        match self.direction {
            Direction::Stop => 0,
            _ => self.duty,
        }
    }
}

/// Commands for both motors, applied together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    pub left: MotorCommand,
    pub right: MotorCommand,
}

impl DriveCommand {
    /// Both motors off
    pub const STOP: Self = Self {
        left: MotorCommand::STOP,
        right: MotorCommand::STOP,
    };

    /// Both motors forward at `duty`
    pub const fn forward(duty: u16) -> Self {
        Self {
            left: MotorCommand::forward(duty),
            right: MotorCommand::forward(duty),
        }
    }

    /// Both motors in reverse at `duty`
    pub const fn reverse(duty: u16) -> Self {
        Self {
            left: MotorCommand::reverse(duty),
            right: MotorCommand::reverse(duty),
        }
    }

    /// Rotate clockwise in place: left forward, right reverse
    pub const fn spin_clockwise(duty: u16) -> Self {
        Self {
            left: MotorCommand::forward(duty),
            right: MotorCommand::reverse(duty),
        }
    }
}

/// Motor output collaborator: direction pins and PWM duty per side
pub trait MotorPins {
    /// Sets the (forward, reverse) direction pin levels of one motor
    fn set_direction_pins(&mut self, side: MotorSide, forward: bool, reverse: bool);

    /// Sets the PWM duty (`0..=MAX_DUTY`) of one motor
    fn set_duty(&mut self, side: MotorSide, duty: u16);
}

/// Applies a command to one motor
pub fn set_motor<M: MotorPins + ?Sized>(pins: &mut M, side: MotorSide, command: MotorCommand) {
    debug_assert!(command.duty <= MAX_DUTY);
    let (forward, reverse) = command.pin_levels();
    pins.set_direction_pins(side, forward, reverse);
    pins.set_duty(side, command.applied_duty());
}

/// Applies a command to both motors
pub fn drive<M: MotorPins + ?Sized>(pins: &mut M, command: DriveCommand) {
    set_motor(pins, MotorSide::Left, command.left);
    set_motor(pins, MotorSide::Right, command.right);
}

/// A requested duty exceeded what the PWM can express
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyClamped {
    /// Duty the caller asked for
    pub requested: u32,
    /// Duty that was used instead
    pub applied: u16,
}

impl fmt::Display for DutyClamped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Duty {} exceeds PWM range, clamped to {}",
            self.requested, self.applied
        )
    }
}

/// Checks a computed duty against the PWM range.
///
/// Out-of-range values are not silently truncated: the error carries the
/// clamped duty so the caller can use it and report the anomaly.
pub fn clamp_duty(requested: u32) -> Result<u16, DutyClamped> {
    match u16::try_from(requested) {
        Ok(duty) if duty <= MAX_DUTY => Ok(duty),
        _ => Err(DutyClamped {
            requested,
            applied: MAX_DUTY,
        }),
    }
}

/// Pursuit duty for a speed setting: `speed * 1.5`, rounded half up
pub fn pursuit_duty(speed: u16) -> u32 {
    (u32::from(speed) * 3 + 1) / 2
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;
    use crate::mock::MockBoard;

    #[test]
    fn forward_sets_forward_pin() {
        let mut board = MockBoard::new();
        set_motor(&mut board, MotorSide::Left, MotorCommand::forward(700));
        assert_eq!(board.direction_pins(MotorSide::Left), (true, false));
        assert_eq!(board.duty(MotorSide::Left), 700);
    }

    #[test]
    fn reverse_sets_reverse_pin() {
        let mut board = MockBoard::new();
        set_motor(&mut board, MotorSide::Right, MotorCommand::reverse(300));
        assert_eq!(board.direction_pins(MotorSide::Right), (false, true));
        assert_eq!(board.duty(MotorSide::Right), 300);
    }

    #[test]
    fn zero_duty_coasts_in_any_direction() {
        let mut board = MockBoard::new();
        set_motor(&mut board, MotorSide::Left, MotorCommand::forward(500));
        set_motor(&mut board, MotorSide::Left, MotorCommand::forward(0));
        assert_eq!(board.direction_pins(MotorSide::Left), (false, false));
        set_motor(&mut board, MotorSide::Left, MotorCommand::reverse(0));
        assert_eq!(board.direction_pins(MotorSide::Left), (false, false));
    }

    #[test]
    fn stop_clears_both_pins_and_duty() {
        let mut board = MockBoard::new();
        drive(&mut board, DriveCommand::reverse(700));
        drive(&mut board, DriveCommand::STOP);
        for side in [MotorSide::Left, MotorSide::Right] {
            assert_eq!(board.direction_pins(side), (false, false));
            assert_eq!(board.duty(side), 0);
        }
    }

    #[test]
    fn stop_ignores_stale_duty() {
        let command = MotorCommand {
            direction: Direction::Stop,
            duty: 400,
        };
        assert_eq!(command.pin_levels(), (false, false));
        assert_eq!(command.applied_duty(), 0);
    }

    #[test]
    fn spin_drives_sides_opposite() {
        let mut board = MockBoard::new();
        drive(&mut board, DriveCommand::spin_clockwise(700));
        assert_eq!(board.direction_pins(MotorSide::Left), (true, false));
        assert_eq!(board.direction_pins(MotorSide::Right), (false, true));
        assert_eq!(board.duty(MotorSide::Left), 700);
        assert_eq!(board.duty(MotorSide::Right), 700);
    }

    #[test]
    fn pursuit_duty_rounds_half_up() {
        assert_eq!(pursuit_duty(0), 0);
        assert_eq!(pursuit_duty(1), 2);
        assert_eq!(pursuit_duty(400), 600);
        assert_eq!(pursuit_duty(333), 500);
        assert_eq!(pursuit_duty(666), 999);
        assert_eq!(pursuit_duty(1000), 1500);
    }

    #[test]
    fn clamp_duty_accepts_pwm_range() {
        assert_eq!(clamp_duty(0), Ok(0));
        assert_eq!(clamp_duty(999), Ok(999));
    }

    #[test]
    fn clamp_duty_reports_overflow() {
        assert_eq!(
            clamp_duty(1500),
            Err(DutyClamped {
                requested: 1500,
                applied: 999
            })
        );
        assert_eq!(clamp_duty(u32::MAX).unwrap_err().applied, MAX_DUTY);
        assert_eq!(
            DutyClamped {
                requested: 1500,
                applied: 999
            }
            .to_string(),
            "Duty 1500 exceeds PWM range, clamped to 999"
        );
    }
}
