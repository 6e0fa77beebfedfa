use std::time::Duration;

use anyhow::Context as _;
use rusb::{
    Context, DeviceHandle, Direction, LogCallbackMode, LogLevel, Recipient, RequestType,
    UsbContext,
};
use shared::{HID_SET_REPORT, Report, USB_CONFIGURATION, USB_INTERFACE, USB_PID, USB_VID};
use tracing::instrument;

use crate::{AnyResult, Config, ReportSink, session::Receiver};

/// Bus position of the receiver. Outlives the handle, which has to be
/// closed before the kernel driver can be bound again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceLocation {
    pub bus_number: u8,
    pub address: u8,
}

/// Setup fields of a control transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Setup {
    request_type: u8,
    request: u8,
    value: u16,
    index: u16,
}

impl Setup {
    /// Class request to the receiver's interface, feature report type.
    const fn set_report(report: &Report) -> Self {
        Self {
            request_type: rusb::request_type(
                Direction::Out,
                RequestType::Class,
                Recipient::Interface,
            ),
            request: HID_SET_REPORT,
            value: report.w_value(),
            index: USB_INTERFACE as u16,
        }
    }
}

#[derive(Debug)]
pub struct IrReceiver {
    handle: DeviceHandle<Context>,
    location: DeviceLocation,
    timeout: Duration,
}

impl IrReceiver {
    /// Opens the first attached receiver and takes its interface away
    /// from the kernel HID driver.
    ///
    /// # Errors
    ///
    /// Fails when libusb cannot be initialized, no receiver can be opened
    /// or the interface cannot be claimed.
    #[instrument(skip_all, err(Debug))]
    pub fn open(config: &Config) -> AnyResult<Self> {
        let mut context = Context::new().context("unable to initialize libusb")?;

        let log_fn = Box::new(|level: LogLevel, message: String| match level {
            LogLevel::Error => tracing::error!(target: "libusb", "{}", message.trim_end()),
            LogLevel::Warning => tracing::warn!(target: "libusb", "{}", message.trim_end()),
            _ => tracing::debug!(target: "libusb", "{}", message.trim_end()),
        });
        context.set_log_level(LogLevel::Warning);
        context.set_log_callback(log_fn, LogCallbackMode::Global);

        let handle = context
            .open_device_with_vid_pid(USB_VID, USB_PID)
            .context("IR receiver not found")?;

        let device = handle.device();
        let location = DeviceLocation {
            bus_number: device.bus_number(),
            address: device.address(),
        };
        tracing::debug!("opened receiver at {location:?}");

        // Normally bound to usbhid.
        match handle.kernel_driver_active(USB_INTERFACE) {
            Ok(true) => {
                if let Err(e) = handle.detach_kernel_driver(USB_INTERFACE) {
                    tracing::warn!("unable to detach kernel driver: {e}");
                }
            }
            Ok(false) => {}
            Err(e) => tracing::debug!("kernel driver state unknown: {e}"),
        }

        if handle.active_configuration().ok() != Some(USB_CONFIGURATION) {
            if let Err(e) = handle.set_active_configuration(USB_CONFIGURATION) {
                tracing::warn!("unable to select configuration {USB_CONFIGURATION}: {e}");
            }
        }

        handle
            .claim_interface(USB_INTERFACE)
            .context("claiming interface")?;

        Ok(Self {
            handle,
            location,
            timeout: config.timeout,
        })
    }
}

impl ReportSink for IrReceiver {
    /// Pushes a single feature report through a `SET_REPORT` request.
    /// Short writes count as failures.
    #[instrument(skip(self), fields(id = report.id()), err(Debug))]
    fn set_report(&mut self, report: &Report) -> AnyResult<()> {
        let setup = Setup::set_report(report);
        let data = report.as_bytes();

        match self.handle.write_control(
            setup.request_type,
            setup.request,
            setup.value,
            setup.index,
            data,
            self.timeout,
        ) {
            Ok(n) if n == data.len() => Ok(()),
            Ok(n) => anyhow::bail!(
                "report {:#04x} not written: {n} of {} bytes sent",
                report.id(),
                data.len()
            ),
            Err(e) => Err(e).with_context(|| format!("sending report {:#04x}", report.id())),
        }
    }
}

impl Receiver for IrReceiver {
    /// Releases the interface and closes the handle.
    #[instrument(skip_all, err(Debug))]
    fn release(self) -> AnyResult<DeviceLocation> {
        self.handle
            .release_interface(USB_INTERFACE)
            .context("releasing interface")?;

        Ok(self.location)
    }
}
