use clap::Parser;
use spendtrack::cli::Cli;

fn main() -> anyhow::Result<()> {
    spendtrack::init_tracing();
    let cli = Cli::parse();
    cli.run()
}
