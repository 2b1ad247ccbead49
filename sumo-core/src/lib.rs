//! sumo-core - hardware independent control core for the sumo robot
//!
//! Everything the robot decides lives here. The firmware samples its pins,
//! hands the levels to [`TickScheduler::step`] every 122 µs and lets the
//! controller drive the outputs through the [`Board`] traits.
//!
//! # Modules
//!
//! - [`board`]: combined hardware trait
//! - [`config`]: timing, PWM and range constants
//! - [`debounce`]: shift-register button debouncing
//! - [`display`]: six-cell segment display buffer and glyphs
//! - [`motor`]: motor command to pin translation
//! - [`speed`]: potentiometer to motor speed mapping
//! - [`indicator`]: status LEDs
//! - [`controller`]: mode and run state machine
//! - [`scheduler`]: tick counting and display refresh gating
//! - [`event`]: per-tick events and anomalies
//! - [`mock`]: recording board for tests

#![no_std]

pub mod board;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod display;
pub mod event;
pub mod indicator;
pub mod mock;
pub mod motor;
pub mod scheduler;
pub mod speed;

pub use board::Board;
pub use controller::{ControllerState, InputLevels, OperatingMode, RunPhase, StrategyMode};
pub use event::{Anomaly, ControllerEvent, TickReport};
pub use scheduler::TickScheduler;
