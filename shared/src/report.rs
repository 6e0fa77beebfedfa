use crate::HID_REPORT_TYPE_FEATURE;

/// Longest payload the receiver takes on the control endpoint.
pub const MAX_REPORT_LEN: usize = 5;

const FAN_REPORT_ID: u8 = 0x0F;
const LED_REPORT_ID: u8 = 0x0D;

/// LED report sub-commands.
pub(crate) const LED_AMBER: u8 = 3;
pub(crate) const LED_WHITE: u8 = 4;
pub(crate) const LED_BRIGHTNESS: u8 = 5;

/// Arguments for the [`LED_AMBER`] and [`LED_WHITE`] sub-commands.
pub(crate) const CHANNEL_OFF: u8 = 0;
pub(crate) const CHANNEL_ON: u8 = 1;
pub(crate) const CHANNEL_BLINK: u8 = 2;

/// A single HID feature report, as pushed to the receiver through a
/// `SET_REPORT` control transfer.
///
/// The first byte is always the report ID. The LED report comes in two
/// lengths: the 5 byte form selects a mode and the 3 byte form sets
/// one of its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    buf: [u8; MAX_REPORT_LEN],
    len: usize,
}

impl Report {
    #[must_use]
    pub const fn fan(speed: u8) -> Self {
        Self {
            buf: [FAN_REPORT_ID, speed, 0, 0, 0],
            len: 2,
        }
    }

    #[must_use]
    pub const fn led_select(mode: u8) -> Self {
        Self {
            buf: [LED_REPORT_ID, mode, 0, 0, 0],
            len: 5,
        }
    }

    #[must_use]
    pub const fn led(command: u8, arg: u8) -> Self {
        Self {
            buf: [LED_REPORT_ID, command, arg, 0, 0],
            len: 3,
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.buf[0]
    }

    /// `wValue` of the control transfer: report type in the high byte,
    /// report ID in the low one.
    #[inline]
    #[must_use]
    pub const fn w_value(&self) -> u16 {
        ((HID_REPORT_TYPE_FEATURE as u16) << 8) | self.id() as u16
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl AsRef<[u8]> for Report {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
