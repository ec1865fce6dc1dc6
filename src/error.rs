use std::io;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {status}: {output}")]
    ExternalTool {
        command: String,
        status: ExitStatus,
        output: String,
    },

    #[error("malformed location at line {line_number}: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("unknown location alias: {0}")]
    UnknownAlias(String),

    #[error("no locations to choose from")]
    NoLocations,
}

pub type Result<T> = std::result::Result<T, Error>;
