use crate::report::Report;

/// The fan only knows two speeds: stopped and full.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum FanState {
    Off,
    On,
}

const OFF_REPORTS: &[Report] = &[Report::fan(FanState::Off as u8)];
const ON_REPORTS: &[Report] = &[Report::fan(FanState::On as u8)];

impl FanState {
    #[must_use]
    pub fn reports(self) -> &'static [Report] {
        match self {
            FanState::Off => OFF_REPORTS,
            FanState::On => ON_REPORTS,
        }
    }
}

impl From<bool> for FanState {
    fn from(on: bool) -> Self {
        if on { FanState::On } else { FanState::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::FanState;

    #[test]
    fn test_fan_state_reports() {
        assert_eq!(FanState::Off.reports().len(), 1);
        assert_eq!(FanState::Off.reports()[0].as_bytes(), [0x0F, 0x00]);
        assert_eq!(FanState::On.reports().len(), 1);
        assert_eq!(FanState::On.reports()[0].as_bytes(), [0x0F, 0x01]);
    }

    #[test]
    fn test_fan_state_from_bool() {
        assert_eq!(FanState::from(true), FanState::On);
        assert_eq!(FanState::from(false), FanState::Off);
    }
}
