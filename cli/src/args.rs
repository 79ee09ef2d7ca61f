use clap::{ArgAction, Parser, Subcommand};

use pws::Weights;

#[derive(Parser)]
#[command(name = "pwsgen")]
#[command(about = "Generate PWS arithmetic circuits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// TOML file with default settings
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Directory for generated files (overrides the config file)
    #[arg(long, global = true)]
    pub out_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dense n x n matrix multiplication
    Matmult {
        /// Matrix dimension
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        n: u64,
        /// Output file, `-` for stdout (default: matmult_<n>.pws)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Proof of sub-order over batched random linear combinations
    Poso {
        /// Number of secret values
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        num_poso: u64,
        /// Bit width of the bound
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        n: u64,
        /// Random coefficients (batch size) per repetition
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        m: u64,
        /// Number of repetitions
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        reps: u64,
        /// Output file, `-` for stdout (default: poso_<num_poso>_<n>_<m>_<reps>.pws)
        #[arg(short, long)]
        output: Option<String>,
        /// Bit weighting used to recombine decompositions
        #[arg(long, value_enum)]
        weights: Option<Weights>,
        /// Also check that every decomposition bit is 0 or 1
        #[arg(long)]
        check_bits: bool,
    },
}
