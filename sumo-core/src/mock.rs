//! Mock board for testing
//!
//! Records every output the controller drives so tests can assert on pin
//! levels, LEDs and display banks without hardware.

use crate::config::ADC_MAX;
use crate::display::{DisplayBank, DisplayPanel, Glyph, DISPLAY_CELLS};
use crate::indicator::{StatusLed, StatusLeds};
use crate::motor::{MotorPins, MotorSide};
use crate::speed::{AnalogSampleTimeout, SpeedPotentiometer};

/// Recording [`Board`](crate::board::Board) implementation
#[derive(Debug, Clone)]
pub struct MockBoard {
    direction: [(bool, bool); 2],
    duty: [u16; 2],
    leds: [bool; 4],
    banks: [[Glyph; DISPLAY_CELLS]; 2],
    commits: usize,
    potentiometer: Option<u16>,
    samples: usize,
}

impl MockBoard {
    /// Outputs all off, blank display, potentiometer at full scale
    pub fn new() -> Self {
        Self {
            direction: [(false, false); 2],
            duty: [0; 2],
            leds: [false; 4],
            banks: [[Glyph::Blank; DISPLAY_CELLS]; 2],
            commits: 0,
            potentiometer: Some(ADC_MAX),
            samples: 0,
        }
    }

    /// (forward, reverse) pin levels
    pub fn direction_pins(&self, side: MotorSide) -> (bool, bool) {
        self.direction[side.index()]
    }

    pub fn duty(&self, side: MotorSide) -> u16 {
        self.duty[side.index()]
    }

    pub fn led(&self, led: StatusLed) -> bool {
        self.leds[led.index()]
    }

    pub fn bank(&self, bank: DisplayBank) -> &[Glyph; DISPLAY_CELLS] {
        &self.banks[bank.index()]
    }

    /// Number of completed display refreshes
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Scripts the next samples; `None` makes every sample time out
    pub fn set_potentiometer(&mut self, raw: Option<u16>) {
        self.potentiometer = raw;
    }

    pub fn samples_taken(&self) -> usize {
        self.samples
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorPins for MockBoard {
    fn set_direction_pins(&mut self, side: MotorSide, forward: bool, reverse: bool) {
        self.direction[side.index()] = (forward, reverse);
    }

    fn set_duty(&mut self, side: MotorSide, duty: u16) {
        self.duty[side.index()] = duty;
    }
}

impl StatusLeds for MockBoard {
    fn set_led(&mut self, led: StatusLed, on: bool) {
        self.leds[led.index()] = on;
    }
}

impl SpeedPotentiometer for MockBoard {
    fn sample(&mut self) -> Result<u16, AnalogSampleTimeout> {
        self.samples += 1;
        self.potentiometer.ok_or(AnalogSampleTimeout)
    }
}

impl DisplayPanel for MockBoard {
    fn show(&mut self, bank: DisplayBank, cell: usize, glyph: Glyph) {
        self.banks[bank.index()][cell] = glyph;
    }

    fn commit(&mut self) {
        self.commits += 1;
    }
}
