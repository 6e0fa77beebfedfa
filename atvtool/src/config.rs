use std::{path::PathBuf, time::Duration};

use shared::{KERNEL_DRIVER, TRANSFER_TIMEOUT_MS};

/// Runtime knobs. Everything but the command line flags is fixed by the
/// receiver itself, see the constants in [`shared`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Kernel driver the interface is handed back to on reattach.
    pub driver: String,
    /// Where sysfs is mounted.
    pub sysfs_root: PathBuf,
    /// Upper bound for a single control transfer.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: KERNEL_DRIVER.to_owned(),
            sysfs_root: PathBuf::from("/sys"),
            timeout: Duration::from_millis(TRANSFER_TIMEOUT_MS),
        }
    }
}
