//! Display Frame Channel
//!
//! Carries refreshed display frames from the control tick to the display
//! task. A signal only keeps the newest frame, so the tick never waits on the
//! display and a slow consumer simply skips stale frames.
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use sumo_core::display::{Glyph, DISPLAY_CELLS};

/// Contents of both display banks, primary first
pub type DisplayFrame = [[Glyph; DISPLAY_CELLS]; 2];

/// Latest committed display frame
static DISPLAY_FRAME: Signal<CriticalSectionRawMutex, DisplayFrame> = Signal::new();

/// Publishes a new frame, replacing any frame not yet picked up
pub fn update(frame: DisplayFrame) {
    DISPLAY_FRAME.signal(frame);
}

/// Waits for the next committed frame
pub async fn wait() -> DisplayFrame {
    DISPLAY_FRAME.wait().await
}
