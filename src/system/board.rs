//! Sumo Robot Board
//!
//! Binds the control core's hardware traits to RP2350 peripherals.
//!
//! # Motor Outputs
//! Each side has a forward and a reverse direction pin plus one PWM channel.
//! The PWM runs at 1 kHz with a counter top of `PWM_PERIOD - 1`, so a duty
//! value maps one to one onto compare counts in `0..=MAX_DUTY`.
//!
//! # Inputs
//! All four digital inputs are active-low. The buttons and the IR detector
//! use the internal pull-ups; the front light sensor drives its line and
//! needs no pull. Levels are inverted here so the core only sees logical
//! "pressed" or "triggered".
//!
//! # Potentiometer
//! The RP2350 ADC is 12 bit; samples are shifted down to the 10 bit range
//! the core expects. A read is bounded by a short timeout so a stuck
//! conversion costs one speed update instead of hanging the tick.

use defmt::info;
use embassy_futures::block_on;
use embassy_rp::adc::{self, Adc, Async as AdcAsync, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{self, Pwm, PwmOutput, SetDutyCycle};
use embassy_time::{with_timeout, Duration};
use sumo_core::config::PWM_PERIOD;
use sumo_core::controller::InputLevels;
use sumo_core::display::{DisplayBank, DisplayPanel, Glyph, DISPLAY_CELLS};
use sumo_core::indicator::{StatusLed, StatusLeds};
use sumo_core::motor::{MotorPins, MotorSide};
use sumo_core::speed::{AnalogSampleTimeout, SpeedPotentiometer};

use crate::system::display::{self, DisplayFrame};
use crate::system::resources::{
    InputResources, Irqs, MotorResources, SpeedPotentiometerResources, StatusLedResources,
};

/// Motor PWM frequency
const PWM_FREQUENCY_HZ: u32 = 1_000;

/// Upper bound for one potentiometer conversion
const SAMPLE_TIMEOUT: Duration = Duration::from_micros(20);

/// 12 bit hardware samples to the 10 bit control range
const ADC_SHIFT: u16 = 2;

/// Digital inputs sampled at the start of each tick
pub struct InputPins {
    run_stop: Input<'static>,
    mode_select: Input<'static>,
    front_light: Input<'static>,
    opponent: Input<'static>,
}

impl InputPins {
    pub fn new(r: InputResources) -> Self {
        Self {
            run_stop: Input::new(r.run_stop_pin, Pull::Up),
            mode_select: Input::new(r.mode_select_pin, Pull::Up),
            front_light: Input::new(r.front_light_pin, Pull::None),
            opponent: Input::new(r.opponent_pin, Pull::Up),
        }
    }

    /// Reads all lines, inverting the active-low levels
    pub fn read(&self) -> InputLevels {
        InputLevels {
            run_stop: self.run_stop.is_low(),
            mode_select: self.mode_select.is_low(),
            front_light: self.front_light.is_low(),
            opponent: self.opponent.is_low(),
        }
    }
}

/// Direction pins and PWM channel of one motor
struct MotorChannel {
    forward: Output<'static>,
    reverse: Output<'static>,
    pwm: PwmOutput<'static>,
}

/// Everything the controller drives, plus the potentiometer it samples
pub struct SumoBoard {
    motors: [MotorChannel; 2],
    leds: [Output<'static>; 4],
    adc: Adc<'static, AdcAsync>,
    pot: Channel<'static>,
    frame: DisplayFrame,
}

impl SumoBoard {
    pub fn new(
        motors: MotorResources,
        leds: StatusLedResources,
        pot: SpeedPotentiometerResources,
    ) -> Self {
        let clock_freq_hz = embassy_rp::clocks::clk_sys_freq(); // 150MHz
        let divider = (clock_freq_hz / (PWM_FREQUENCY_HZ * u32::from(PWM_PERIOD))) as u8;

        let mut pwm_config = pwm::Config::default();
        pwm_config.divider = divider.into();
        pwm_config.top = PWM_PERIOD - 1;
        pwm_config.compare_a = 0;
        pwm_config.compare_b = 0;
        info!(
            "Motor PWM: {} Hz, divider {}, top {}",
            PWM_FREQUENCY_HZ,
            divider,
            pwm_config.top
        );

        let (left_pwm, _) =
            Pwm::new_output_a(motors.left_slice, motors.left_pwm_pin, pwm_config.clone()).split();
        let (_, right_pwm) =
            Pwm::new_output_b(motors.right_slice, motors.right_pwm_pin, pwm_config).split();

        let left = MotorChannel {
            forward: Output::new(motors.left_forward_pin, Level::Low),
            reverse: Output::new(motors.left_reverse_pin, Level::Low),
            pwm: left_pwm.expect("Left motor PWM channel A not configured"),
        };
        let right = MotorChannel {
            forward: Output::new(motors.right_forward_pin, Level::Low),
            reverse: Output::new(motors.right_reverse_pin, Level::Low),
            pwm: right_pwm.expect("Right motor PWM channel B not configured"),
        };

        let leds = [
            Output::new(leds.stopped_pin, Level::Low),
            Output::new(leds.running_pin, Level::Low),
            Output::new(leds.maneuver_pin, Level::Low),
            Output::new(leds.target_pin, Level::Low),
        ];

        let adc = Adc::new(pot.adc, Irqs, adc::Config::default());
        let pot = Channel::new_pin(pot.pot_pin, Pull::None);

        Self {
            motors: [left, right],
            leds,
            adc,
            pot,
            frame: [[Glyph::Blank; DISPLAY_CELLS]; 2],
        }
    }
}

impl MotorPins for SumoBoard {
    fn set_direction_pins(&mut self, side: MotorSide, forward: bool, reverse: bool) {
        let motor = &mut self.motors[side.index()];
        motor.forward.set_level(Level::from(forward));
        motor.reverse.set_level(Level::from(reverse));
    }

    fn set_duty(&mut self, side: MotorSide, duty: u16) {
        // Duty is already limited to the counter top, the channel cannot reject it
        let _ = self.motors[side.index()].pwm.set_duty_cycle(duty);
    }
}

impl StatusLeds for SumoBoard {
    fn set_led(&mut self, led: StatusLed, on: bool) {
        self.leds[led.index()].set_level(Level::from(on));
    }
}

impl SpeedPotentiometer for SumoBoard {
    fn sample(&mut self) -> Result<u16, AnalogSampleTimeout> {
        match block_on(with_timeout(SAMPLE_TIMEOUT, self.adc.read(&mut self.pot))) {
            Ok(Ok(raw)) => Ok(raw >> ADC_SHIFT),
            Ok(Err(_)) | Err(_) => Err(AnalogSampleTimeout),
        }
    }
}

impl DisplayPanel for SumoBoard {
    fn show(&mut self, bank: DisplayBank, cell: usize, glyph: Glyph) {
        self.frame[bank.index()][cell] = glyph;
    }

    fn commit(&mut self) {
        display::update(self.frame);
    }
}
