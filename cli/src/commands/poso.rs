use anyhow::Result;
use pws::{Circuit, EmitStats, PosoParams, Weights};

use super::{write_circuit, Destination};
use crate::config::Config;

/// Structural parameters as given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct PosoArgs {
    pub num_poso: u64,
    pub n: u64,
    pub m: u64,
    pub reps: u64,
}

/// Flags win over the config file, which wins over the built-in defaults.
pub fn poso_command(
    args: PosoArgs,
    weights: Option<Weights>,
    check_bits: bool,
    output: Option<&str>,
    config: &Config,
) -> Result<EmitStats> {
    let weights = weights.or(config.poso.weights).unwrap_or_default();
    let check_bits = check_bits || config.poso.check_bits.unwrap_or(false);

    let params = PosoParams::new(args.num_poso, args.n, args.m, args.reps)
        .with_weights(weights)
        .with_bit_checks(check_bits);
    let dest = Destination::resolve(output, config.out_dir.as_deref(), &params.file_name());
    write_circuit(&params, &dest)
}
