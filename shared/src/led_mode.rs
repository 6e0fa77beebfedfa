use core::fmt;

use thiserror::Error as ThisError;

use crate::report::{CHANNEL_BLINK, CHANNEL_OFF, CHANNEL_ON, LED_AMBER, LED_WHITE, Report};

/// Patterns the front LED can show.
///
/// Each mode is set by first selecting it with the long LED report and
/// then configuring the amber and white channels with short reports.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum LedMode {
    Off,
    Amber,
    AmberBlink,
    White,
    WhiteBlink,
    // Both colors, alternating.
    Both,
}

const OFF_REPORTS: &[Report] = &[
    Report::led_select(LedMode::Off as u8),
    Report::led(LED_AMBER, CHANNEL_OFF),
    Report::led(LED_WHITE, CHANNEL_OFF),
];

const AMBER_REPORTS: &[Report] = &[
    Report::led_select(LedMode::Amber as u8),
    Report::led(LED_AMBER, CHANNEL_ON),
    Report::led(LED_WHITE, CHANNEL_OFF),
];

const AMBER_BLINK_REPORTS: &[Report] = &[
    Report::led_select(LedMode::AmberBlink as u8),
    Report::led(LED_AMBER, CHANNEL_OFF),
    Report::led(LED_WHITE, CHANNEL_OFF),
    Report::led(LED_AMBER, CHANNEL_BLINK),
];

const WHITE_REPORTS: &[Report] = &[
    Report::led_select(LedMode::White as u8),
    Report::led(LED_AMBER, CHANNEL_OFF),
    Report::led(LED_WHITE, CHANNEL_ON),
];

const WHITE_BLINK_REPORTS: &[Report] = &[
    Report::led_select(LedMode::WhiteBlink as u8),
    Report::led(LED_AMBER, CHANNEL_OFF),
    Report::led(LED_WHITE, CHANNEL_OFF),
    Report::led(LED_WHITE, CHANNEL_BLINK),
];

const BOTH_REPORTS: &[Report] = &[Report::led_select(7), Report::led(6, CHANNEL_ON)];

impl LedMode {
    pub const MAX: u8 = LedMode::Both as u8;

    /// Reports to send, in order, to switch the LED to this mode.
    #[must_use]
    pub fn reports(self) -> &'static [Report] {
        match self {
            LedMode::Off => OFF_REPORTS,
            LedMode::Amber => AMBER_REPORTS,
            LedMode::AmberBlink => AMBER_BLINK_REPORTS,
            LedMode::White => WHITE_REPORTS,
            LedMode::WhiteBlink => WHITE_BLINK_REPORTS,
            LedMode::Both => BOTH_REPORTS,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            LedMode::Off => "off",
            LedMode::Amber => "amber",
            LedMode::AmberBlink => "amber blink",
            LedMode::White => "white",
            LedMode::WhiteBlink => "white blink",
            LedMode::Both => "both blink",
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<LedMode> for u8 {
    fn from(value: LedMode) -> Self {
        value as Self
    }
}

impl TryFrom<u8> for LedMode {
    type Error = LedModeConvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            n if LedMode::Off as u8 == n => Ok(LedMode::Off),
            n if LedMode::Amber as u8 == n => Ok(LedMode::Amber),
            n if LedMode::AmberBlink as u8 == n => Ok(LedMode::AmberBlink),
            n if LedMode::White as u8 == n => Ok(LedMode::White),
            n if LedMode::WhiteBlink as u8 == n => Ok(LedMode::WhiteBlink),
            n if LedMode::Both as u8 == n => Ok(LedMode::Both),
            _ => Err(LedModeConvError(value)),
        }
    }
}

#[derive(Clone, Copy, Debug, ThisError)]
#[cfg_attr(test, derive(PartialEq))]
#[error("led mode {0} out of range 0-{max}", max = LedMode::MAX)]
pub struct LedModeConvError(pub u8);
