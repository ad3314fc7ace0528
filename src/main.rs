#![doc = include_str!("../README.md")]

use clap::{crate_version, Parser};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

mod api;
mod cli;
mod config;
mod core;
mod prelude;
#[macro_use]
mod quantity;
mod tables;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Estimate(args) => cli::estimate(&args).await?,
        Command::Pv(args) => cli::pv(&args).await?,
    }

    info!("done!");
    Ok(())
}
