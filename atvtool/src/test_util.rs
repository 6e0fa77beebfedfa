use std::{
    fs,
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Throwaway sysfs lookalike under the system temp dir.
#[derive(Debug)]
pub struct FakeSysfs {
    root: PathBuf,
}

impl FakeSysfs {
    pub fn new(name: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!("atvtool-{}-{id}-{name}", process::id()));

        fs::remove_dir_all(&root).ok();
        fs::create_dir_all(root.join("bus/usb/devices")).unwrap();
        fs::create_dir_all(root.join("bus/usb/drivers")).unwrap();

        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_device(&self, name: &str, devnum: Option<u8>) -> &Self {
        let dir = self.root.join("bus/usb/devices").join(name);
        fs::create_dir_all(&dir).unwrap();

        if let Some(devnum) = devnum {
            fs::write(dir.join("devnum"), format!("{devnum}\n")).unwrap();
        }

        self
    }

    pub fn add_driver(&self, driver: &str) -> &Self {
        let dir = self.root.join("bus/usb/drivers").join(driver);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bind"), "").unwrap();
        self
    }

    pub fn bound(&self, driver: &str) -> String {
        fs::read_to_string(self.root.join("bus/usb/drivers").join(driver).join("bind")).unwrap()
    }
}

impl Drop for FakeSysfs {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.root).ok();
    }
}
