use atvtool::{AnyResult, Cli, DeviceSession, logging};
use clap::{CommandFactory, Parser};

fn main() -> AnyResult<()> {
    let cli = Cli::parse();
    logging::setup();

    let actions = cli.actions();
    if actions.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    DeviceSession::with_device(cli.config()).run_all(actions)
}
