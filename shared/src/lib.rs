#![no_std]

mod brightness;
mod command;
mod fan_state;
mod led_mode;
mod report;

pub use brightness::Brightness;
pub use command::Command;
pub use fan_state::FanState;
pub use led_mode::{LedMode, LedModeConvError};
pub use report::{MAX_REPORT_LEN, Report};

pub const USB_VID: u16 = 0x05AC;
pub const USB_PID: u16 = 0x8241;
pub const USB_INTERFACE: u8 = 0;
pub const USB_CONFIGURATION: u8 = 1;

/// `bRequest` of the HID class `SET_REPORT` request.
pub const HID_SET_REPORT: u8 = 0x09;
/// Report type placed in the high byte of `wValue`.
pub const HID_REPORT_TYPE_FEATURE: u8 = 0x03;
pub const TRANSFER_TIMEOUT_MS: u64 = 1000;

/// Driver the interface is handed back to on reattach.
pub const KERNEL_DRIVER: &str = "usbhid";
