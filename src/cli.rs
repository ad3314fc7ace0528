mod estimate;
mod pv;

use clap::{Parser, Subcommand};

pub use self::{
    estimate::{estimate, EstimateArgs, GeocodingArgs},
    pv::{pv, PvArgs},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: run the scenario batch and print the comparison table.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),

    /// Development tool: fetch a PV profile and inspect the allocation shares.
    #[clap(name = "pv")]
    Pv(Box<PvArgs>),
}
