use std::path::PathBuf;
use std::process::Command;

use super::error::{Error, Result};

pub trait Runner {
    /// Runs the tool with `args` and returns everything it printed.
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// Runs a local executable and waits for it to exit.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
}

impl ProcessRunner {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        ProcessRunner {
            program: program.into(),
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl Runner for ProcessRunner {
    fn run(&self, args: &[&str]) -> Result<String> {
        log::debug!("running {}", self.command_line(args));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        // stdout then stderr; the two streams are not interleaved
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        log::debug!("{} exited with {}", self.command_line(args), output.status);
        if !output.status.success() {
            return Err(Error::ExternalTool {
                command: self.command_line(args),
                status: output.status,
                output: text,
            });
        }

        Ok(text)
    }
}

impl<T: Runner + ?Sized> Runner for &T {
    fn run(&self, args: &[&str]) -> Result<String> {
        (**self).run(args)
    }
}
