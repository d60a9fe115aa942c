//! CLI subcommands.

pub mod analyze;
pub mod config;
pub mod strategies;
pub mod suggest;

use std::io::Read;

/// Read the payload from a file path, or stdin when the path is `-`.
pub(crate) fn read_input(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
