//! Status LEDs

/// The four status LEDs on the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusLed {
    /// Lit while waiting for the run button in run/stop mode
    Stopped,
    /// Lit while the robot is running
    Running,
    /// Lit during the start burst or while backing up
    Maneuver,
    /// Lit while the pursuit strategy sees the opponent
    Target,
}

impl StatusLed {
    pub const ALL: [StatusLed; 4] = [
        StatusLed::Stopped,
        StatusLed::Running,
        StatusLed::Maneuver,
        StatusLed::Target,
    ];

    pub fn index(self) -> usize {
        match self {
            StatusLed::Stopped => 0,
            StatusLed::Running => 1,
            StatusLed::Maneuver => 2,
            StatusLed::Target => 3,
        }
    }
}

/// Status indicator collaborator
pub trait StatusLeds {
    fn set_led(&mut self, led: StatusLed, on: bool);

    fn all_off(&mut self) {
        for led in StatusLed::ALL {
            self.set_led(led, false);
        }
    }
}
