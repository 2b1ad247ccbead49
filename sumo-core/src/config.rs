//! Behavioural constants for the sumo controller
//!
//! All timing values are expressed in controller ticks. The tick period is
//! fixed by the firmware's periodic source, so every duration below scales
//! with it.

/// Period of one controller tick in microseconds (4 cycles of a 32.768kHz clock)
pub const TICK_PERIOD_US: u64 = 122;

/// Buffered display cells are pushed to the panel every this many ticks
pub const DISPLAY_REFRESH_DIVIDER: u8 = 10;

/// Number of consecutive pressed samples a button needs before it registers
pub const DEBOUNCE_WINDOW: u8 = 12;

/// PWM counter period; duty values live in `0..PWM_PERIOD`
pub const PWM_PERIOD: u16 = 1000;

/// Highest duty cycle the motor outputs accept
pub const MAX_DUTY: u16 = PWM_PERIOD - 1;

/// Duty used for the start burst, backing up and the search spin
pub const MANEUVER_DUTY: u16 = 700;

/// Length of the forced forward window after a run starts (roughly 67ms)
pub const FORWARD_START_TICKS: u16 = 550;

/// Light-free ticks needed before a backing maneuver ends
pub const BACK_UP_TICKS: u16 = 550;

/// Largest raw value of the speed potentiometer (10-bit conversion)
pub const ADC_MAX: u16 = 1023;

/// Upper bound of the motor speed setting
pub const SPEED_MAX: u16 = 1000;

/// Motor speed used until the operator tunes it
pub const DEFAULT_MOTOR_SPEED: u16 = SPEED_MAX;

/// Number of selectable strategies
pub const STRATEGY_COUNT: u8 = 3;
