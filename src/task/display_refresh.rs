//! Display Refresh Task
//!
//! Receives committed frames from the control tick and mirrors them over
//! RTT. Frames are logged only when their content changes, which at the
//! display refresh rate would otherwise flood the log.
use defmt::{debug, info};
use sumo_core::display::{DisplayBank, Glyph};

use crate::system::display;

#[embassy_executor::task]
pub async fn display_refresh() {
    info!("Display refresh task starting");
    let mut shown = None;

    loop {
        let frame = display::wait().await;
        if shown == Some(frame) {
            continue;
        }

        let primary = frame[DisplayBank::Primary.index()].map(Glyph::as_ascii);
        let secondary = frame[DisplayBank::Secondary.index()].map(Glyph::as_ascii);
        if primary == secondary {
            debug!("display: [{=[u8]:a}]", &primary[..]);
        } else {
            debug!(
                "display: [{=[u8]:a}] [{=[u8]:a}]",
                &primary[..],
                &secondary[..]
            );
        }
        shown = Some(frame);
    }
}
