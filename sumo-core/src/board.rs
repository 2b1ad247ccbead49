//! Combined hardware collaborator

use crate::display::DisplayPanel;
use crate::indicator::StatusLeds;
use crate::motor::MotorPins;
use crate::speed::SpeedPotentiometer;

/// Everything the controller tick touches. Implemented automatically for any
/// type providing the four collaborator traits.
pub trait Board: MotorPins + StatusLeds + SpeedPotentiometer + DisplayPanel {}

impl<T> Board for T where T: MotorPins + StatusLeds + SpeedPotentiometer + DisplayPanel + ?Sized {}
