use std::fmt;

use super::error::{Error, Result};

/// One server location as printed by `expressvpn list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    alias: String,
    name: String,
}

impl Location {
    /// Builds a location from raw column text. `line_number` and `line` only
    /// feed the error when a field is unusable.
    pub(crate) fn from_columns(
        alias: &str,
        name: &str,
        line_number: usize,
        line: &str,
    ) -> Result<Self> {
        let alias = alias.trim();
        let name = name.trim();
        if alias.is_empty() || name.is_empty() || alias.contains(char::is_whitespace) {
            return Err(Error::MalformedLine {
                line_number,
                line: line.to_string(),
            });
        }

        Ok(Location {
            alias: alias.to_string(),
            name: name.to_string(),
        })
    }

    /// The identifier passed to `expressvpn connect`.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.alias, self.name)
    }
}
