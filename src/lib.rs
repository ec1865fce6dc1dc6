pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod parser;
pub mod runner;

pub use client::Client;
pub use config::{Config, Listing};
pub use error::{Error, Result};
pub use location::Location;
pub use parser::{parse_line, parse_lines, parse_listing, Trim};
pub use runner::{ProcessRunner, Runner};
