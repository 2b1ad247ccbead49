pub mod control_tick;
pub mod display_refresh;
