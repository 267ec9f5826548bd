mod elevation;
mod generate;
mod geocode;
mod lookup;
mod options;
mod overpass;
mod progress;

use anyhow::Result;
use clap::Parser;
use options::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli {
        Cli::Generate(generate) => generate.run(),
        Cli::Lookup(lookup) => lookup.run(),
    }
}
