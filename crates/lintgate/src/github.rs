//! CI step-output emission.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Publish `name=value` to the CI step output channel.
///
/// Appends to the file named by `GITHUB_OUTPUT` when present, which is how
/// current runners consume outputs; otherwise falls back to the legacy
/// `::set-output` workflow command on stdout.
pub fn emit_step_output(name: &str, value: u32) -> io::Result<()> {
    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        if !path.is_empty() {
            return append_output(Path::new(&path), name, value);
        }
    }
    println!("::set-output name={name}::{value}");
    Ok(())
}

fn append_output(path: &Path, name: &str, value: u32) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{name}={value}")
}
