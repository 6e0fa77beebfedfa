use std::path::PathBuf;

use clap::Parser;
use shared::{Brightness, Command, FanState, KERNEL_DRIVER, LedMode};
use thiserror::Error as ThisError;

use crate::Config;

const LED_MODES: &str = "\
LED modes:
  0  off
  1  amber
  2  amber blink
  3  white
  4  white blink
  5  both blink";

/// A single step of an invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    Reattach,
}

#[derive(Debug, Parser)]
#[command(
    about,
    version,
    author,
    after_help = LED_MODES,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Turn fan off
    #[arg(short = 'f', long, conflicts_with = "fan_on")]
    pub fan_off: bool,

    /// Turn fan on
    #[arg(short = 'F', long)]
    pub fan_on: bool,

    /// Use low LED brightness
    #[arg(short = 'b', long, conflicts_with = "brightness_high")]
    pub brightness_low: bool,

    /// Use high LED brightness
    #[arg(short = 'B', long)]
    pub brightness_high: bool,

    /// Set LED mode (0-5)
    #[arg(short, long, value_name = "MODE", value_parser = parse_led_mode)]
    pub led: Option<LedMode>,

    /// Reattach kernel driver to IR device, after any other change
    #[arg(short, long)]
    pub reattach: bool,

    /// Kernel driver to reattach the IR device to
    #[arg(long, value_name = "NAME", default_value = KERNEL_DRIVER)]
    pub driver: String,

    #[arg(long, value_name = "PATH", default_value = "/sys", hide = true)]
    pub sysfs: PathBuf,
}

impl Cli {
    /// Requested actions, in the order they are carried out: fan,
    /// brightness, LED mode and finally the reattach.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        let fan = (self.fan_off || self.fan_on).then_some(FanState::from(self.fan_on));
        let brightness = (self.brightness_low || self.brightness_high)
            .then_some(Brightness::from(self.brightness_high));

        fan.map(Command::from)
            .into_iter()
            .chain(brightness.map(Command::from))
            .chain(self.led.map(Command::from))
            .map(Action::Command)
            .chain(self.reattach.then_some(Action::Reattach))
            .collect()
    }

    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            driver: self.driver.clone(),
            sysfs_root: self.sysfs.clone(),
            ..Config::default()
        }
    }
}

#[derive(Debug, ThisError)]
#[error("invalid led mode '{0}'")]
pub struct InvalidLedMode(String);

fn parse_led_mode(arg: &str) -> Result<LedMode, InvalidLedMode> {
    parse_int(arg)
        .and_then(|value| u8::try_from(value).ok())
        .and_then(|value| LedMode::try_from(value).ok())
        .ok_or_else(|| InvalidLedMode(arg.to_owned()))
}

/// Parses an integer written in C notation: decimal, `0x` prefixed hex
/// or `0` prefixed octal, with an optional sign and leading whitespace.
fn parse_int(arg: &str) -> Option<i64> {
    let arg = arg.trim_start();
    let (negative, digits) = match arg.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, arg.strip_prefix('+').unwrap_or(arg)),
    };

    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(octal) = digits.strip_prefix('0').filter(|rest| !rest.is_empty()) {
        (8, octal)
    } else {
        (10, digits)
    };

    // `from_str_radix` takes a sign of its own.
    if digits.starts_with(['+', '-']) {
        return None;
    }

    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}
