use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use expressvpn::*;

fn main() {
    env_logger::init();

    let opts = Opts::parse();

    if let Err(e) = try_run(opts) {
        eprintln!("{:?}", e);
        process::exit(1);
    }
}

#[derive(Parser)]
#[clap(version = "0.1")]
struct Opts {
    /// expressvpn executable, defaults to $EXPRESSVPN_BIN or `expressvpn`
    #[clap(short, long)]
    binary: Option<PathBuf>,
    #[clap(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print recommended locations, or every location with --all
    List(ListConfig),
    /// Connect to a location alias
    Connect(ConnectConfig),
    /// Connect to a random recommended location
    Random,
    Disconnect,
}

#[derive(clap::Args)]
struct ListConfig {
    #[clap(short, long)]
    all: bool,
    /// Leading lines to skip before the first location
    #[clap(long)]
    header: Option<usize>,
    /// Trailing lines to skip after the last location
    #[clap(long)]
    footer: Option<usize>,
}

#[derive(clap::Args)]
struct ConnectConfig {
    alias: String,
    /// Check the alias against `expressvpn list all` first
    #[clap(short, long)]
    verify: bool,
}

fn try_run(opts: Opts) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(binary) = opts.binary {
        config.program = binary;
    }

    match opts.command {
        Cmd::List(list) => {
            let listing = if list.all {
                Listing::All
            } else {
                Listing::Recommended
            };
            let trim = config.trim_mut(listing);
            if let Some(header) = list.header {
                trim.header = header;
            }
            if let Some(footer) = list.footer {
                trim.footer = footer;
            }

            let client = Client::from_config(config);
            let locations = client
                .list(listing)
                .with_context(|| format!("could not list {:?} locations", listing))?;
            for location in locations {
                println!("{}", location);
            }
        }
        Cmd::Connect(connect) => {
            let client = Client::from_config(config);
            if connect.verify {
                let location = client
                    .connect_verified(&connect.alias)
                    .with_context(|| format!("could not connect to {}", connect.alias))?;
                println!("connected to {}", location);
            } else {
                client
                    .connect(&connect.alias)
                    .with_context(|| format!("could not connect to {}", connect.alias))?;
                println!("connected to {}", connect.alias);
            }
        }
        Cmd::Random => {
            let location = Client::from_config(config)
                .random_connect()
                .context("could not connect to a random location")?;
            println!("connected to {}", location);
        }
        Cmd::Disconnect => {
            Client::from_config(config)
                .disconnect()
                .context("could not disconnect")?;
        }
    }

    Ok(())
}
