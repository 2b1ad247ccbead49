//! Tick scheduler
//!
//! Drives one controller tick per call and refreshes the display banks on
//! every `DISPLAY_REFRESH_DIVIDER`th tick. With a 122 µs tick that is a
//! refresh every 1.22 ms.

use crate::board::Board;
use crate::config::DISPLAY_REFRESH_DIVIDER;
use crate::controller::{ControllerState, InputLevels};
use crate::display;
use crate::event::TickReport;

#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickScheduler {
    ticks: u32,
    since_refresh: u8,
}

impl TickScheduler {
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            since_refresh: 0,
        }
    }

    /// Ticks run so far, wrapping
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Runs the controller for one tick, then flushes the display if due.
    /// Returns whether the display was refreshed alongside the tick report.
    pub fn step<B: Board + ?Sized>(
        &mut self,
        controller: &mut ControllerState,
        inputs: InputLevels,
        board: &mut B,
    ) -> (TickReport, bool) {
        let report = controller.tick(inputs, board);
        self.ticks = self.ticks.wrapping_add(1);

        self.since_refresh += 1;
        let refresh = self.since_refresh >= DISPLAY_REFRESH_DIVIDER;
        if refresh {
            self.since_refresh = 0;
            display::flush(controller.display(), board);
        }
        (report, refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayBank;
    use crate::mock::MockBoard;

    #[test]
    fn refreshes_every_tenth_tick() {
        let mut scheduler = TickScheduler::new();
        let mut controller = ControllerState::new();
        let mut board = MockBoard::new();

        for tick in 1..=30u32 {
            let (_, refreshed) = scheduler.step(&mut controller, InputLevels::default(), &mut board);
            assert_eq!(refreshed, tick % 10 == 0, "tick {tick}");
        }
        assert_eq!(board.commits(), 3);
        assert_eq!(scheduler.ticks(), 30);
    }

    #[test]
    fn no_refresh_before_tenth_tick() {
        let mut scheduler = TickScheduler::new();
        let mut controller = ControllerState::new();
        let mut board = MockBoard::new();

        for _ in 0..9 {
            scheduler.step(&mut controller, InputLevels::default(), &mut board);
        }
        assert_eq!(board.commits(), 0);
        assert!(board
            .bank(DisplayBank::Primary)
            .iter()
            .all(|g| *g == crate::display::Glyph::Blank));
    }

    #[test]
    fn refresh_mirrors_both_banks() {
        let mut scheduler = TickScheduler::new();
        let mut controller = ControllerState::new();
        let mut board = MockBoard::new();

        for _ in 0..10 {
            scheduler.step(&mut controller, InputLevels::default(), &mut board);
        }
        assert_eq!(board.bank(DisplayBank::Primary), controller.display().cells());
        assert_eq!(board.bank(DisplayBank::Secondary), controller.display().cells());
    }
}
