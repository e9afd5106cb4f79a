use clap::Parser;

fn main() -> anyhow::Result<()> {
    docfill::commands::run(docfill::cli::Cli::parse())
}
