//! Hardware Resource Management
//!
//! Allocates the RP2350 pins and peripherals to the parts of the firmware
//! that own them. Every group is moved into exactly one owner at startup.
//!
//! # Resource Groups
//! - Inputs: run/stop and mode buttons, front light sensor, IR opponent detector
//! - Speed Potentiometer: ADC and its analog pin
//! - Motors: one PWM slice and two direction pins per side
//! - Status LEDs: stopped, running, maneuver and target indicators

use assign_resources::assign_resources;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals;

assign_resources! {
    /// Buttons and sensors sampled once per tick
    inputs: InputResources {
        run_stop_pin: PIN_14,
        mode_select_pin: PIN_15,
        front_light_pin: PIN_16,
        opponent_pin: PIN_17,
    },
    /// Speed setting potentiometer
    speed_potentiometer: SpeedPotentiometerResources {
        adc: ADC,
        pot_pin: PIN_26,
    },
    /// Motor driver PWM channels and direction pins
    motors: MotorResources {
        // Left motor on slice 0, channel A
        left_slice: PWM_SLICE0,
        left_pwm_pin: PIN_0,
        left_forward_pin: PIN_4,
        left_reverse_pin: PIN_5,
        // Right motor on slice 1, channel B
        right_slice: PWM_SLICE1,
        right_pwm_pin: PIN_3,
        right_forward_pin: PIN_6,
        right_reverse_pin: PIN_7,
    },
    /// Status LEDs
    status_leds: StatusLedResources {
        stopped_pin: PIN_18,
        running_pin: PIN_19,
        maneuver_pin: PIN_20,
        target_pin: PIN_21,
    },
}

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});
