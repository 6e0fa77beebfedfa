use crate::report::{CHANNEL_OFF, CHANNEL_ON, LED_BRIGHTNESS, Report};

/// LED intensity, shared by every [`crate::LedMode`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum Brightness {
    Low,
    High,
}

const LOW_REPORTS: &[Report] = &[
    Report::led_select(LED_BRIGHTNESS),
    Report::led(LED_BRIGHTNESS, CHANNEL_OFF),
];

const HIGH_REPORTS: &[Report] = &[
    Report::led_select(6),
    Report::led(LED_BRIGHTNESS, CHANNEL_ON),
];

impl Brightness {
    #[must_use]
    pub fn reports(self) -> &'static [Report] {
        match self {
            Brightness::Low => LOW_REPORTS,
            Brightness::High => HIGH_REPORTS,
        }
    }
}

impl From<bool> for Brightness {
    fn from(high: bool) -> Self {
        if high {
            Brightness::High
        } else {
            Brightness::Low
        }
    }
}
