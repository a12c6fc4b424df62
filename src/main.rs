use clap::Parser;
use pricebook::cli::Cli;

fn main() -> anyhow::Result<()> {
    pricebook::logging::init();
    let cli = Cli::parse();
    cli.run()
}
