pub mod matmult;
pub mod poso;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pws::{Circuit, EmitStats};
use tracing::info;

/// Where a generated circuit goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `-o -` means stdout; `-o <path>` is taken as given; otherwise the
    /// circuit's own file name is placed in `out_dir` (or the working dir).
    pub fn resolve(output: Option<&str>, out_dir: Option<&Path>, default_name: &str) -> Self {
        match output {
            Some("-") => Destination::Stdout,
            Some(path) => Destination::File(PathBuf::from(path)),
            None => Destination::File(match out_dir {
                Some(dir) => dir.join(default_name),
                None => PathBuf::from(default_name),
            }),
        }
    }
}

/// Generate `circuit` into `dest`. Parameters are validated before the
/// destination file is created.
pub fn write_circuit<C: Circuit>(circuit: &C, dest: &Destination) -> Result<EmitStats> {
    circuit.validate()?;

    let stats = match dest {
        Destination::Stdout => {
            let sink = BufWriter::new(io::stdout().lock());
            let (_, stats) = circuit
                .generate(sink)
                .context("cannot write circuit to stdout")?;
            stats
        }
        Destination::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create directory {}", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let (_, stats) = circuit
                .generate(BufWriter::new(file))
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!(
                "wrote {} ({} instructions, {} wires)",
                path.display(),
                stats.instructions(),
                stats.wires
            );
            stats
        }
    };
    Ok(stats)
}
