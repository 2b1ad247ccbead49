//! Mode controller
//!
//! The state machine run once per tick. It owns the operating mode, the run
//! sub-state, the selected strategy, the speed setting, the button
//! debouncers and the display buffer, and turns one snapshot of the inputs
//! into motor, LED and display updates.
//!
//! # Modes
//!
//! ```text
//!   mode button      mode button         mode button
//! RunStop ────────▶ SpeedTune ────────▶ StrategySelect ────────▶ RunStop
//! ```
//!
//! Every mode transition halts the motors and resets the run sub-state.
//!
//! # Run sub-state (RunStop mode)
//!
//! ```text
//!            run button                 550 ticks
//! Stopped ─────────────▶ ForwardStart ─────────────▶ Pursuing
//!    ▲                                                 │  ▲
//!    │ run button (any running state)      front light │  │ 550 light-free ticks
//!    └──────────────────────────────────────────       ▼  │
//!                                                    BackingUp
//! ```
//!
//! The front light is ignored during `ForwardStart`. Each tick it is seen
//! restarts the backing timer.

use crate::board::Board;
use crate::config::{
    BACK_UP_TICKS, DEFAULT_MOTOR_SPEED, FORWARD_START_TICKS, MANEUVER_DUTY, STRATEGY_COUNT,
};
use crate::debounce::Buttons;
use crate::display::DisplayBuffer;
use crate::event::{ControllerEvent, TickReport};
use crate::indicator::StatusLed;
use crate::motor::{self, clamp_duty, pursuit_duty, DriveCommand};
use crate::speed;

/// Display cell of the mode letter
const MODE_LABEL_CELL: usize = 0;
/// Display cell of the mode digit
const MODE_DIGIT_CELL: usize = 1;
/// First of the three cells each mode writes its status into
const STATUS_CELL: usize = 3;

/// Top-level operating modes, cycled by the mode select button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Run button starts and stops the robot
    RunStop,
    /// Potentiometer sets the pursuit speed
    SpeedTune,
    /// Run button cycles the strategy
    StrategySelect,
}

impl OperatingMode {
    /// Next mode in the cycle
    pub fn next(self) -> Self {
        match self {
            OperatingMode::RunStop => OperatingMode::SpeedTune,
            OperatingMode::SpeedTune => OperatingMode::StrategySelect,
            OperatingMode::StrategySelect => OperatingMode::RunStop,
        }
    }

    /// Digit shown on the display
    pub fn index(self) -> u8 {
        match self {
            OperatingMode::RunStop => 0,
            OperatingMode::SpeedTune => 1,
            OperatingMode::StrategySelect => 2,
        }
    }
}

/// Selected pursuit strategy, `0..STRATEGY_COUNT`. Only strategy 0 drives
/// the motors; 1 and 2 are reserved and leave the last command in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StrategyMode(u8);

impl StrategyMode {
    /// Pursue on IR contact, spin in place otherwise
    pub const PURSUIT: Self = Self(0);

    /// Returns `None` for indices outside `0..STRATEGY_COUNT`
    pub fn new(index: u8) -> Option<Self> {
        (index < STRATEGY_COUNT).then_some(Self(index))
    }

    /// Next strategy, wrapping back to 0 after the last
    pub fn next(self) -> Self {
        Self((self.0 + 1) % STRATEGY_COUNT)
    }

    /// Digit shown on the display
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Run sub-state while in [`OperatingMode::RunStop`].
///
/// The start burst and the backing maneuver are separate variants, so the
/// robot can never be in both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunPhase {
    /// Motors held off
    Stopped,
    /// Forced forward drive after the run button; `elapsed` ticks since the edge
    ForwardStart { elapsed: u16 },
    /// Strategy in control
    Pursuing,
    /// Reversing away from the ring edge; `elapsed` light-free ticks so far
    BackingUp { elapsed: u16 },
}

impl RunPhase {
    /// Anything but [`RunPhase::Stopped`]
    pub fn is_running(self) -> bool {
        !matches!(self, RunPhase::Stopped)
    }

    /// In the forced forward burst after the run edge
    pub fn is_forward_start(self) -> bool {
        matches!(self, RunPhase::ForwardStart { .. })
    }

    /// Reversing away from the ring edge
    pub fn is_backing_up(self) -> bool {
        matches!(self, RunPhase::BackingUp { .. })
    }

    /// True during either timed maneuver
    pub fn is_maneuvering(self) -> bool {
        self.is_forward_start() || self.is_backing_up()
    }
}

/// Logical input levels for one tick. `true` means pressed or triggered,
/// inversion of active-low lines happens before this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputLevels {
    pub run_stop: bool,
    pub mode_select: bool,
    /// Front sensor sees the ring edge
    pub front_light: bool,
    /// IR detector sees the opponent
    pub opponent: bool,
}

/// Complete controller state, mutated only by [`ControllerState::tick`]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    mode: OperatingMode,
    phase: RunPhase,
    strategy: StrategyMode,
    motor_speed: u16,
    buttons: Buttons,
    display: DisplayBuffer,
    /// Set while pursuit duty is being clamped, so the anomaly is reported once
    duty_clamped: bool,
}

impl ControllerState {
    /// Power-on state: run/stop mode, stopped, strategy 0, display "M0"
    pub fn new() -> Self {
        let mut display = DisplayBuffer::new();
        display.put_digit(MODE_DIGIT_CELL, OperatingMode::RunStop.index());
        let _ = display.put(MODE_LABEL_CELL, 'M');
        Self {
            mode: OperatingMode::RunStop,
            phase: RunPhase::Stopped,
            strategy: StrategyMode::PURSUIT,
            motor_speed: DEFAULT_MOTOR_SPEED,
            buttons: Buttons::new(),
            display,
            duty_clamped: false,
        }
    }

    /// Current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Current run sub-state
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Selected strategy
    pub fn strategy(&self) -> StrategyMode {
        self.strategy
    }

    /// Current speed setting in `0..=SPEED_MAX`
    pub fn motor_speed(&self) -> u16 {
        self.motor_speed
    }

    /// Buffered display cells, as of the last tick
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Runs one controller tick.
    pub fn tick<B: Board + ?Sized>(&mut self, inputs: InputLevels, board: &mut B) -> TickReport {
        let mut report = TickReport::new();

        // Both buttons are polled every tick so their histories stay current
        let run_edge = self.buttons.run_stop.poll(inputs.run_stop);
        let mode_edge = self.buttons.mode_select.poll(inputs.mode_select);

        if mode_edge {
            self.mode = self.mode.next();
            self.phase = RunPhase::Stopped;
            self.duty_clamped = false;
            board.all_off();
            motor::drive(board, DriveCommand::STOP);
            report.push(ControllerEvent::ModeChanged(self.mode));
        }

        self.label(MODE_LABEL_CELL, "M", &mut report);
        self.display.put_digit(MODE_DIGIT_CELL, self.mode.index());

        match self.mode {
            OperatingMode::RunStop => self.run_stop(run_edge, inputs, board, &mut report),
            OperatingMode::SpeedTune => self.speed_tune(board, &mut report),
            OperatingMode::StrategySelect => self.strategy_select(run_edge, &mut report),
        }

        report
    }

    fn run_stop<B: Board + ?Sized>(
        &mut self,
        run_edge: bool,
        inputs: InputLevels,
        board: &mut B,
        report: &mut TickReport,
    ) {
        let mut started = false;
        if run_edge {
            if self.phase.is_running() {
                self.phase = RunPhase::Stopped;
                report.push(ControllerEvent::RunStopped);
            } else {
                self.phase = RunPhase::ForwardStart { elapsed: 0 };
                started = true;
                report.push(ControllerEvent::RunStarted);
            }
        }

        if !self.phase.is_running() {
            self.label(STATUS_CELL, "STP", report);
            board.set_led(StatusLed::Stopped, true);
            board.set_led(StatusLed::Running, false);
            board.set_led(StatusLed::Maneuver, false);
            board.set_led(StatusLed::Target, false);
            self.duty_clamped = false;
            motor::drive(board, DriveCommand::STOP);
            return;
        }

        self.label(STATUS_CELL, "GO", report);
        self.display
            .put_digit(STATUS_CELL + 2, u8::from(inputs.front_light));
        board.set_led(StatusLed::Stopped, false);
        board.set_led(StatusLed::Running, true);

        self.phase = match self.phase {
            // The start burst ignores every sensor
            RunPhase::ForwardStart { elapsed } => {
                let elapsed = if started { elapsed } else { elapsed + 1 };
                if elapsed < FORWARD_START_TICKS {
                    RunPhase::ForwardStart { elapsed }
                } else {
                    report.push(ControllerEvent::ForwardStartFinished);
                    RunPhase::Pursuing
                }
            }
            phase if inputs.front_light => {
                if !phase.is_backing_up() {
                    report.push(ControllerEvent::BackingUpStarted);
                }
                RunPhase::BackingUp { elapsed: 0 }
            }
            RunPhase::BackingUp { elapsed } => {
                let elapsed = elapsed + 1;
                if elapsed < BACK_UP_TICKS {
                    RunPhase::BackingUp { elapsed }
                } else {
                    report.push(ControllerEvent::BackingUpFinished);
                    RunPhase::Pursuing
                }
            }
            phase => phase,
        };

        board.set_led(StatusLed::Maneuver, self.phase.is_maneuvering());
        match self.phase {
            RunPhase::ForwardStart { .. } => {
                self.duty_clamped = false;
                motor::drive(board, DriveCommand::forward(MANEUVER_DUTY));
            }
            RunPhase::BackingUp { .. } => {
                self.duty_clamped = false;
                motor::drive(board, DriveCommand::reverse(MANEUVER_DUTY));
            }
            RunPhase::Pursuing => self.run_strategy(inputs.opponent, board, report),
            RunPhase::Stopped => {}
        }
    }

    fn run_strategy<B: Board + ?Sized>(
        &mut self,
        opponent: bool,
        board: &mut B,
        report: &mut TickReport,
    ) {
        if self.strategy != StrategyMode::PURSUIT {
            // Reserved strategies keep whatever the motors were last told
            return;
        }

        board.set_led(StatusLed::Target, opponent);
        if opponent {
            let duty = match clamp_duty(pursuit_duty(self.motor_speed)) {
                Ok(duty) => {
                    self.duty_clamped = false;
                    duty
                }
                Err(clamped) => {
                    if !self.duty_clamped {
                        self.duty_clamped = true;
                        report.anomaly(clamped);
                    }
                    clamped.applied
                }
            };
            motor::drive(board, DriveCommand::forward(duty));
        } else {
            self.duty_clamped = false;
            motor::drive(board, DriveCommand::spin_clockwise(MANEUVER_DUTY));
        }
    }

    fn speed_tune<B: Board + ?Sized>(&mut self, board: &mut B, report: &mut TickReport) {
        match speed::read_motor_speed(board) {
            Ok(motor_speed) => self.motor_speed = motor_speed,
            Err(timeout) => report.anomaly(timeout),
        }
        self.display
            .put_number(STATUS_CELL, 3, self.motor_speed / 10);
    }

    fn strategy_select(&mut self, run_edge: bool, report: &mut TickReport) {
        if run_edge {
            self.strategy = self.strategy.next();
            report.push(ControllerEvent::StrategySelected(self.strategy));
        }
        self.label(STATUS_CELL, "ST", report);
        self.display
            .put_digit(STATUS_CELL + 2, self.strategy.index());
    }

    fn label(&mut self, start: usize, text: &str, report: &mut TickReport) {
        if let Err(e) = self.display.put_str(start, text) {
            report.anomaly(e);
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}
