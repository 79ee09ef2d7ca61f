use anyhow::Result;
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::commands::poso::PosoArgs;
use cli::commands::{matmult, poso};
use cli::config::Config;
use cli::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config =
        Config::load_optional(cli.config.as_deref())?.override_out_dir(cli.out_dir.as_deref());

    match &cli.command {
        Commands::Matmult { n, output } => {
            matmult::matmult_command(*n, output.as_deref(), &config)?;
        }
        Commands::Poso {
            num_poso,
            n,
            m,
            reps,
            output,
            weights,
            check_bits,
        } => {
            let args = PosoArgs {
                num_poso: *num_poso,
                n: *n,
                m: *m,
                reps: *reps,
            };
            poso::poso_command(
                args,
                *weights,
                *check_bits,
                output.as_deref(),
                &config,
            )?;
        }
    }
    Ok(())
}
