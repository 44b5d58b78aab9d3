//! Shell completion generation.

use clap::CommandFactory;

use crate::{cli::{Cli, CompletionsArgs}, error::CliResult};

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "sitekit", &mut std::io::stdout());
    Ok(())
}
