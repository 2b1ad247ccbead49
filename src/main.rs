//! Sumo robot firmware entry point
//!
//! Initializes the board and spawns the control and display tasks.

#![no_std]
#![no_main]

use crate::system::board::{InputPins, SumoBoard};
use crate::task::{control_tick::control_tick, display_refresh::display_refresh};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{
    AssignedResources, InputResources, MotorResources, SpeedPotentiometerResources,
    StatusLedResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Board support and resource allocation
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each owner
    let r = split_resources!(p);

    let inputs = InputPins::new(r.inputs);
    let board = SumoBoard::new(r.motors, r.status_leds, r.speed_potentiometer);

    // The display task first, so the first committed frame has a consumer
    spawner.spawn(display_refresh()).unwrap();
    spawner.spawn(control_tick(inputs, board)).unwrap();
}
