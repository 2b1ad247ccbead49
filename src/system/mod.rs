//! Board support for the sumo robot
pub mod board;
pub mod display;
pub mod resources;
