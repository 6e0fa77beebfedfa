use anyhow::Context as _;
use shared::{USB_CONFIGURATION, USB_INTERFACE};
use tracing::instrument;

use crate::{
    AnyResult, Config, ReportSink,
    cli::Action,
    device::{DeviceLocation, IrReceiver},
    send_command, sysfs,
};

/// An open receiver that can be given back to the kernel.
pub trait Receiver: ReportSink + Sized {
    /// Lets go of the device, closing it.
    ///
    /// # Errors
    fn release(self) -> AnyResult<DeviceLocation>;
}

pub type DeviceSession = Session<IrReceiver, fn(&Config) -> AnyResult<IrReceiver>>;

/// Carries out actions against a receiver that is only opened once an
/// action needs it, and at most once at a time.
#[derive(Debug)]
pub struct Session<R, O> {
    config: Config,
    opener: O,
    receiver: Option<R>,
}

impl DeviceSession {
    #[must_use]
    pub fn with_device(config: Config) -> Self {
        Self::new(config, IrReceiver::open)
    }
}

impl<R, O> Session<R, O>
where
    R: Receiver,
    O: FnMut(&Config) -> AnyResult<R>,
{
    #[must_use]
    pub fn new(config: Config, opener: O) -> Self {
        Self {
            config,
            opener,
            receiver: None,
        }
    }

    ///
    /// # Errors
    pub fn run(&mut self, action: Action) -> AnyResult<()> {
        match action {
            Action::Command(command) => send_command(self.receiver()?, command),
            Action::Reattach => self.reattach(),
        }
    }

    /// Runs `actions` in order, stopping at the first failure.
    ///
    /// # Errors
    pub fn run_all<I>(&mut self, actions: I) -> AnyResult<()>
    where
        I: IntoIterator<Item = Action>,
    {
        actions.into_iter().try_for_each(|action| self.run(action))
    }

    fn receiver(&mut self) -> AnyResult<&mut R> {
        let receiver = self.take_or_open()?;
        Ok(self.receiver.insert(receiver))
    }

    fn take_or_open(&mut self) -> AnyResult<R> {
        match self.receiver.take() {
            Some(receiver) => Ok(receiver),
            None => (self.opener)(&self.config),
        }
    }

    /// Closes the receiver and binds its interface to the kernel driver.
    /// Later commands open it again.
    #[instrument(skip(self), err(Debug))]
    fn reattach(&mut self) -> AnyResult<()> {
        let location = self.take_or_open()?.release()?;
        let root = &self.config.sysfs_root;

        let name = sysfs::kernel_name(root, location, USB_CONFIGURATION, USB_INTERFACE)
            .context("looking up kernel name")?;
        sysfs::bind(root, &self.config.driver, &name).context("reattaching kernel driver")?;

        tracing::info!("{name} bound to {}", self.config.driver);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use shared::{Command, FanState, LedMode, Report};

    use super::{Receiver, Session};
    use crate::{
        AnyResult, Config, ReportSink, cli::Action, device::DeviceLocation, test_util::FakeSysfs,
    };

    const LOCATION: DeviceLocation = DeviceLocation {
        bus_number: 1,
        address: 7,
    };

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Event {
        Open,
        Report(Vec<u8>),
        Release,
    }

    type Events = Rc<RefCell<Vec<Event>>>;

    struct FakeReceiver {
        events: Events,
    }

    impl ReportSink for FakeReceiver {
        fn set_report(&mut self, report: &Report) -> AnyResult<()> {
            self.events
                .borrow_mut()
                .push(Event::Report(report.as_bytes().to_vec()));
            Ok(())
        }
    }

    impl Receiver for FakeReceiver {
        fn release(self) -> AnyResult<DeviceLocation> {
            self.events.borrow_mut().push(Event::Release);
            Ok(LOCATION)
        }
    }

    fn session(
        events: &Events,
        sysfs: &FakeSysfs,
    ) -> Session<FakeReceiver, impl FnMut(&Config) -> AnyResult<FakeReceiver>> {
        let config = Config {
            sysfs_root: sysfs.root().to_owned(),
            ..Config::default()
        };

        let events = events.clone();
        Session::new(config, move |_: &Config| {
            events.borrow_mut().push(Event::Open);
            Ok(FakeReceiver {
                events: events.clone(),
            })
        })
    }

    fn reports(command: Command) -> impl Iterator<Item = Event> {
        command
            .reports()
            .iter()
            .map(|report| Event::Report(report.as_bytes().to_vec()))
    }

    #[test]
    fn test_opens_lazily_once() {
        let sysfs = FakeSysfs::new("lazy");
        let events = Events::default();
        let mut session = session(&events, &sysfs);
        assert!(events.borrow().is_empty());

        let fan = Command::Fan(FanState::On);
        let led = Command::Led(LedMode::Off);
        session
            .run_all([Action::Command(fan), Action::Command(led)])
            .unwrap();

        let expected: Vec<_> = std::iter::once(Event::Open)
            .chain(reports(fan))
            .chain(reports(led))
            .collect();
        assert_eq!(*events.borrow(), expected);
    }

    #[test]
    fn test_reattach() {
        let sysfs = FakeSysfs::new("reattach");
        sysfs
            .add_device("1-2", Some(7))
            .add_device("1-2:1.0", None)
            .add_driver("usbhid");

        let events = Events::default();
        let mut session = session(&events, &sysfs);
        let led = Command::Led(LedMode::Amber);
        session
            .run_all([Action::Command(led), Action::Reattach])
            .unwrap();

        let expected: Vec<_> = std::iter::once(Event::Open)
            .chain(reports(led))
            .chain(std::iter::once(Event::Release))
            .collect();
        assert_eq!(*events.borrow(), expected);
        assert_eq!(sysfs.bound("usbhid"), "1-2:1.0");
    }

    #[test]
    fn test_reattach_alone_opens_device() {
        let sysfs = FakeSysfs::new("reattach-alone");
        sysfs.add_device("1-2", Some(7)).add_driver("usbhid");

        let events = Events::default();
        session(&events, &sysfs).run(Action::Reattach).unwrap();

        assert_eq!(*events.borrow(), [Event::Open, Event::Release]);
    }

    #[test]
    fn test_command_after_reattach_reopens() {
        let sysfs = FakeSysfs::new("reopen");
        sysfs.add_device("1-2", Some(7)).add_driver("usbhid");

        let events = Events::default();
        let mut session = session(&events, &sysfs);
        let fan = Command::Fan(FanState::Off);
        session
            .run_all([Action::Reattach, Action::Command(fan)])
            .unwrap();

        let expected: Vec<_> = [Event::Open, Event::Release, Event::Open]
            .into_iter()
            .chain(reports(fan))
            .collect();
        assert_eq!(*events.borrow(), expected);
    }

    #[test]
    fn test_reattach_without_driver() {
        let sysfs = FakeSysfs::new("no-driver");
        sysfs.add_device("1-2", Some(7));

        let events = Events::default();
        let err = session(&events, &sysfs)
            .run(Action::Reattach)
            .unwrap_err();

        assert_eq!(err.to_string(), "reattaching kernel driver");
        assert_eq!(*events.borrow(), [Event::Open, Event::Release]);
    }

    #[test]
    fn test_open_failure() {
        let mut session = Session::new(Config::default(), |_: &Config| -> AnyResult<FakeReceiver> {
            anyhow::bail!("IR receiver not found")
        });

        let err = session
            .run(Action::Command(Command::Led(LedMode::White)))
            .unwrap_err();
        assert_eq!(err.to_string(), "IR receiver not found");

        let err = session.run(Action::Reattach).unwrap_err();
        assert_eq!(err.to_string(), "IR receiver not found");
    }
}
