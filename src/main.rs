use clap::Parser;
use pagerouter::cli::{run_cli, Cli};
use pagerouter::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logging = logging::init_logging(cli.log_mode())?;
    run_cli(cli)
}
