use anyhow::Result;
use clap::Parser;

use colorindex::cli::SubCommandExtend;
use colorindex::config::{Opts, SubCommand};

fn main() -> Result<()> {
    env_logger::init();

    let opts = Opts::parse();

    match &opts.subcmd {
        SubCommand::Search(config) => config.run(&opts),
        SubCommand::Compare(config) => config.run(&opts),
        SubCommand::Show(config) => config.run(&opts),
    }
}
