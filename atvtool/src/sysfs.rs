//! Handing the receiver back to a kernel driver.
//!
//! Interfaces show up in sysfs as `<busnum>-<devpath>:<config>.<interface>`.
//! The bus number and device address are known from libusb, the port path
//! is not, so the device directories of the bus are scanned for the one
//! whose `devnum` matches the address.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error as ThisError;
use tracing::instrument;

use crate::{
    device::DeviceLocation,
    exactly_one::{ExactlyOneError, ExactlyOneIter},
};

const DEVICES_DIR: &str = "bus/usb/devices";
const DRIVERS_DIR: &str = "bus/usb/drivers";

#[derive(Debug, ThisError)]
pub enum SysfsError {
    #[error("unable to list {}", .path.display())]
    ListDevices {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no sysfs entry for device {address} on bus {bus}")]
    Lookup {
        bus: u8,
        address: u8,
        #[source]
        source: ExactlyOneError,
    },
    #[error("unable to bind {name} through {}", .path.display())]
    Bind {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves the kernel name of `interface` of the device at `location`,
/// e.g. `2-1.4:1.0`.
///
/// # Errors
///
/// Fails when the devices directory cannot be listed, or when no entry
/// (or more than one) matches the location.
#[instrument(skip(root), err(Debug))]
pub fn kernel_name(
    root: &Path,
    location: DeviceLocation,
    config: u8,
    interface: u8,
) -> Result<String, SysfsError> {
    let devices = root.join(DEVICES_DIR);
    let prefix = format!("{}-", location.bus_number);
    let address = location.address.to_string();

    let entries = fs::read_dir(&devices).map_err(|source| SysfsError::ListDevices {
        path: devices.clone(),
        source,
    })?;

    // Interface entries share the prefix but carry no `devnum`.
    let device = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(&prefix))
        .filter(|name| {
            fs::read_to_string(devices.join(name).join("devnum"))
                .is_ok_and(|devnum| devnum.trim_end() == address)
        })
        .exactly_one()
        .map_err(|source| SysfsError::Lookup {
            bus: location.bus_number,
            address: location.address,
            source,
        })?;

    Ok(format!("{device}:{config}.{interface}"))
}

/// Binds the interface called `name` to `driver`.
///
/// # Errors
///
/// Fails when the driver's `bind` file is missing or does not take the
/// whole name, e.g. because the handle to the device is still open.
#[instrument(skip(root), err(Debug))]
pub fn bind(root: &Path, driver: &str, name: &str) -> Result<(), SysfsError> {
    let path = root.join(DRIVERS_DIR).join(driver).join("bind");

    OpenOptions::new()
        .write(true)
        .open(&path)
        .and_then(|mut file| file.write_all(name.as_bytes()))
        .map_err(|source| SysfsError::Bind {
            name: name.to_owned(),
            path,
            source,
        })
}
