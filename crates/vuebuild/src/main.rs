use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = vuebuild::cli::Cli::parse();
    vuebuild::init(cli.verbose);
    vuebuild::cli::run(cli)
}
