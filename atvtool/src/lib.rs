mod cli;
mod config;
mod device;
mod exactly_one;
pub mod logging;
mod session;
mod sysfs;
#[cfg(test)]
mod test_util;

pub use anyhow::Result as AnyResult;
pub use cli::{Action, Cli};
pub use config::Config;
pub use device::{DeviceLocation, IrReceiver};
pub use session::{DeviceSession, Receiver, Session};
use shared::{Command, Report};
pub use sysfs::SysfsError;
use tracing::instrument;

/// Anything that takes HID feature reports.
pub trait ReportSink {
    ///
    /// # Errors
    fn set_report(&mut self, report: &Report) -> AnyResult<()>;
}

/// Sends every report of `command`, in order, stopping at the first one
/// that fails.
///
/// # Errors
#[instrument(skip(sink), err(Debug))]
pub fn send_command<S>(sink: &mut S, command: Command) -> AnyResult<()>
where
    S: ReportSink + ?Sized,
{
    for report in command.reports() {
        sink.set_report(report)?;
    }

    Ok(())
}
