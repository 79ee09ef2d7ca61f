use anyhow::Result;
use pws::{Circuit, EmitStats, MatMulParams};

use super::{write_circuit, Destination};
use crate::config::Config;

pub fn matmult_command(dim: u64, output: Option<&str>, config: &Config) -> Result<EmitStats> {
    let params = MatMulParams::new(dim);
    let dest = Destination::resolve(output, config.out_dir.as_deref(), &params.file_name());
    write_circuit(&params, &dest)
}
