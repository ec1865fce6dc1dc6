use std::env;
use std::path::PathBuf;

use super::parser::Trim;

pub const DEFAULT_PROGRAM: &str = "expressvpn";
pub const PROGRAM_ENV: &str = "EXPRESSVPN_BIN";

/// Which listing command produced a block of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// `expressvpn list all`
    All,
    /// `expressvpn list`
    Recommended,
}

impl Listing {
    pub fn args(self) -> &'static [&'static str] {
        match self {
            Listing::All => &["list", "all"],
            Listing::Recommended => &["list"],
        }
    }
}

// Counted with `str::lines`, checked against the client's current output.
const ALL_TRIM: Trim = Trim {
    header: 2,
    footer: 0,
};
const RECOMMENDED_TRIM: Trim = Trim {
    header: 3,
    footer: 2,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program: PathBuf,
    pub all: Trim,
    pub recommended: Trim,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            program: PathBuf::from(DEFAULT_PROGRAM),
            all: ALL_TRIM,
            recommended: RECOMMENDED_TRIM,
        }
    }
}

impl Config {
    /// Defaults, with the program taken from `EXPRESSVPN_BIN` when set.
    pub fn from_env() -> Self {
        Self::with_program_override(env::var(PROGRAM_ENV).ok().as_deref())
    }

    fn with_program_override(program: Option<&str>) -> Self {
        let mut config = Config::default();
        if let Some(program) = program.filter(|p| !p.is_empty()) {
            config.program = PathBuf::from(program);
        }
        config
    }

    pub fn trim(&self, listing: Listing) -> Trim {
        match listing {
            Listing::All => self.all,
            Listing::Recommended => self.recommended,
        }
    }

    pub fn trim_mut(&mut self, listing: Listing) -> &mut Trim {
        match listing {
            Listing::All => &mut self.all,
            Listing::Recommended => &mut self.recommended,
        }
    }
}
