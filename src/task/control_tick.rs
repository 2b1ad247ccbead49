//! Control Tick Task
//!
//! Runs the sumo controller at a fixed 122 µs period. This task is the only
//! owner of the controller state and the board outputs, so every tick sees a
//! consistent snapshot and nothing else can race it.
//!
//! Each tick:
//! 1. waits for the ticker
//! 2. samples the four digital inputs
//! 3. steps the scheduler, which runs the controller and refreshes the display
//! 4. logs whatever the tick reported
use defmt::{info, warn};
use embassy_time::{Duration, Ticker};
use sumo_core::config::TICK_PERIOD_US;
use sumo_core::{ControllerEvent, ControllerState, TickScheduler};

use crate::system::board::{InputPins, SumoBoard};

#[embassy_executor::task]
pub async fn control_tick(inputs: InputPins, mut board: SumoBoard) {
    info!("Control tick starting, period {} us", TICK_PERIOD_US);

    let mut controller = ControllerState::new();
    let mut scheduler = TickScheduler::new();
    let mut ticker = Ticker::every(Duration::from_micros(TICK_PERIOD_US));

    loop {
        ticker.next().await;

        let (report, _) = scheduler.step(&mut controller, inputs.read(), &mut board);
        for event in report.iter() {
            log_event(event, &controller);
        }
        if report.dropped() > 0 {
            warn!(
                "{} controller events dropped on tick {}",
                report.dropped(),
                scheduler.ticks()
            );
        }
    }
}

fn log_event(event: &ControllerEvent, controller: &ControllerState) {
    match event {
        ControllerEvent::ModeChanged(mode) => info!("Operating mode changed to {}", mode),
        ControllerEvent::RunStarted => info!(
            "Run started, strategy {}, speed {}",
            controller.strategy().index(),
            controller.motor_speed()
        ),
        ControllerEvent::RunStopped => info!("Run stopped"),
        ControllerEvent::ForwardStartFinished => info!("Start burst finished, pursuing"),
        ControllerEvent::BackingUpStarted => info!("Ring edge detected, backing up"),
        ControllerEvent::BackingUpFinished => info!("Back-up finished, pursuing"),
        ControllerEvent::StrategySelected(strategy) => {
            info!("Strategy {} selected", strategy.index())
        }
        ControllerEvent::Anomaly(anomaly) => warn!("{}", anomaly),
    }
}
