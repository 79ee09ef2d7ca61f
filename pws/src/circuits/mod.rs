//! Circuit generators built on the emission core.

use std::io::Write;

use crate::emit::{EmitStats, Emitter};
use crate::error::{PwsError, Result};

pub mod matmult;
pub mod poso;

pub use matmult::MatMulParams;
pub use poso::PosoParams;

/// A parameterised circuit family that can be written out as PWS.
pub trait Circuit {
    /// Deterministic output file name for these parameters.
    fn file_name(&self) -> String;

    /// Reject parameters the generator cannot lay out. Runs before any
    /// output is written.
    fn validate(&self) -> Result<()>;

    /// Emit the full instruction stream through `em`.
    fn build<W: Write>(&self, em: &mut Emitter<W>) -> Result<()>;

    /// Validate, emit into `sink` starting at wire `V0`, flush, and hand the
    /// sink back with the emission tally.
    fn generate<W: Write>(&self, sink: W) -> Result<(W, EmitStats)> {
        self.validate()?;
        let mut em = Emitter::new(sink);
        self.build(&mut em)?;
        em.finish()
    }
}

pub(crate) fn require_positive(name: &'static str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(PwsError::InvalidParameter {
            name,
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

/// Fails with `InvalidParameter` when a derived size overflowed `u64`.
pub(crate) fn require_fits(name: &'static str, size: Option<u64>) -> Result<()> {
    match size {
        Some(_) => Ok(()),
        None => Err(PwsError::InvalidParameter {
            name,
            reason: "circuit size does not fit in 64-bit wire ids".into(),
        }),
    }
}
