//! Shift-register button debouncing
//!
//! Each monitored line keeps a 16-bit history of its recent samples. Every
//! poll shifts the history left by one, ORs in the new sample (1 = released)
//! and forces the bits above the window to ones. The history matches the
//! target pattern only on the single poll where one released sample is
//! followed by exactly `window` pressed samples:
//!
//! ```text
//! window = 12:  mask   = 1110_0000_0000_0000 (0xE000)
//!               target = 1111_0000_0000_0000 (0xF000)
//! ```
//!
//! A held button therefore fires once; the next poll shifts the released
//! sample out of bit `window` and the match is gone until the button has
//! been released again. The history starts cleared, so a button already held
//! at power-on stays silent until it has been released once.

use crate::config::DEBOUNCE_WINDOW;

/// Debounce state for one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    history: u16,
    mask: u16,
    target: u16,
}

impl Debouncer {
    /// Creates a debouncer with the default 12-sample window
    pub const fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    /// Creates a debouncer that needs `samples` consecutive pressed samples.
    ///
    /// `samples` must be in `1..=14` so the settle bit and the mask both fit
    /// into the 16-bit history.
    pub const fn with_window(samples: u8) -> Self {
        assert!(samples >= 1 && samples <= 14);
        let settle = 1u16 << samples;
        let mask = !((settle << 1) - 1);
        Self {
            history: 0,
            mask,
            target: mask | settle,
        }
    }

    /// Feeds one sample and returns `true` on the poll where a press completes.
    pub fn poll(&mut self, pressed: bool) -> bool {
        self.history = (self.history << 1) | u16::from(!pressed) | self.mask;
        self.history == self.target
    }

    /// Raw history, mostly useful for diagnostics
    pub fn history(&self) -> u16 {
        self.history
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// The debounced operator buttons, each with private history
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons {
    /// Starts/stops the robot, or advances the strategy in strategy select
    pub run_stop: Debouncer,
    /// Cycles the operating mode
    pub mode_select: Debouncer,
}

impl Buttons {
    pub const fn new() -> Self {
        Self {
            run_stop: Debouncer::new(),
            mode_select: Debouncer::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Polls `count` samples at `level`, returning how many presses fired
    fn feed(debouncer: &mut Debouncer, level: bool, count: usize) -> usize {
        (0..count).filter(|_| debouncer.poll(level)).count()
    }

    #[test]
    fn default_window_uses_documented_mask() {
        let debouncer = Debouncer::new();
        assert_eq!(debouncer.mask, 0xE000);
        assert_eq!(debouncer.target, 0xF000);
    }

    #[test]
    fn press_held_from_power_on_never_fires() {
        let mut debouncer = Debouncer::new();
        assert_eq!(feed(&mut debouncer, true, 20), 0);
        assert_eq!(feed(&mut debouncer, true, 5000), 0);
    }

    #[test]
    fn held_press_fires_after_first_release() {
        let mut debouncer = Debouncer::new();
        assert_eq!(feed(&mut debouncer, true, 30), 0);
        assert_eq!(feed(&mut debouncer, false, 1), 0);
        assert_eq!(feed(&mut debouncer, true, 12), 1);
    }

    #[test]
    fn fires_on_twelfth_pressed_sample() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.poll(false));
        for _ in 0..11 {
            assert!(!debouncer.poll(true));
        }
        assert!(debouncer.poll(true));
    }

    #[test]
    fn sustained_press_fires_once() {
        let mut debouncer = Debouncer::new();
        debouncer.poll(false);
        assert_eq!(feed(&mut debouncer, true, 5000), 1);
    }

    #[test]
    fn short_runs_never_fire() {
        let mut debouncer = Debouncer::new();
        for _ in 0..50 {
            assert_eq!(feed(&mut debouncer, true, 11), 0);
            assert_eq!(feed(&mut debouncer, false, 1), 0);
        }
    }

    #[test]
    fn one_event_per_run_of_at_least_twelve() {
        let mut debouncer = Debouncer::new();
        let runs = [12, 40, 13, 100, 12];
        debouncer.poll(false);
        let mut fired = 0;
        for run in runs {
            fired += feed(&mut debouncer, true, run);
            fired += feed(&mut debouncer, false, 3);
        }
        assert_eq!(fired, runs.len());
    }

    #[test]
    fn bounce_restarts_the_window() {
        let mut debouncer = Debouncer::new();
        assert_eq!(feed(&mut debouncer, true, 8), 0);
        assert_eq!(feed(&mut debouncer, false, 1), 0);
        // Needs a full window again after the bounce
        assert_eq!(feed(&mut debouncer, true, 11), 0);
        assert!(debouncer.poll(true));
    }

    #[test]
    fn instances_do_not_share_history() {
        let mut buttons = Buttons::new();
        buttons.run_stop.poll(false);
        assert_eq!(feed(&mut buttons.run_stop, true, 12), 1);
        assert_eq!(buttons.mode_select.history(), 0);
        buttons.mode_select.poll(false);
        assert_eq!(feed(&mut buttons.mode_select, true, 11), 0);
    }

    #[test]
    fn custom_window() {
        let mut debouncer = Debouncer::with_window(4);
        debouncer.poll(false);
        assert_eq!(feed(&mut debouncer, true, 3), 0);
        assert!(debouncer.poll(true));
        assert_eq!(feed(&mut debouncer, true, 20), 0);
    }
}
