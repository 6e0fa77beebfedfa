use crate::{Brightness, FanState, LedMode, report::Report};

/// Commands that change what the receiver shows.
///
/// Every command maps to a fixed sequence of reports that must be
/// sent in order. Nothing is read back from the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Fan(FanState),
    Brightness(Brightness),
    Led(LedMode),
}

impl Command {
    #[must_use]
    pub fn reports(self) -> &'static [Report] {
        match self {
            Command::Fan(state) => state.reports(),
            Command::Brightness(brightness) => brightness.reports(),
            Command::Led(mode) => mode.reports(),
        }
    }
}

impl From<FanState> for Command {
    fn from(value: FanState) -> Self {
        Command::Fan(value)
    }
}

impl From<Brightness> for Command {
    fn from(value: Brightness) -> Self {
        Command::Brightness(value)
    }
}

impl From<LedMode> for Command {
    fn from(value: LedMode) -> Self {
        Command::Led(value)
    }
}
