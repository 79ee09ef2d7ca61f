//! Bit-decomposition gadgets: weighted recombination and bit validity.
//!
//! A bit-decomposition is an ordered list of wires that are each claimed to
//! hold 0 or 1. [`recombine`] rebuilds the scalar they encode, and
//! [`verify_bits`] produces one check wire per bit that is zero exactly when
//! the bit is boolean.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::emit::Emitter;
use crate::error::{PwsError, Result};
use crate::instruction::BinaryOp;
use crate::reduce::reduce_to_one;
use crate::wire::Wire;

/// Per-bit weighting used by [`recombine`].
///
/// Both policies leave bit 0 unscaled and double bit 1 with `V + V`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Weights {
    /// Bits 2, 3, 4, ... are scaled by 1, 2, 3, ...
    #[default]
    Sequential,
    /// Bits 2, 3, 4, ... are scaled by 4, 8, 16, ...
    PowersOfTwo,
}

impl Weights {
    /// Constant applied to bit `i`, for `i >= 2`.
    fn factor(&self, i: usize) -> Option<u64> {
        match self {
            Weights::Sequential => u64::try_from(i - 1).ok(),
            Weights::PowersOfTwo => u32::try_from(i).ok().and_then(|e| 1u64.checked_shl(e)),
        }
    }
}

/// Rebuild `sum(bit_i * weight_i)` from `bits` and return the sum wire.
///
/// Emits `2 * (k - 1)` instructions for `k >= 2` bits: one doubling, `k - 2`
/// constant multiplies and a `k - 1` add tree. A single bit is returned as is.
pub fn recombine<W: Write>(em: &mut Emitter<W>, bits: &[Wire], weights: Weights) -> Result<Wire> {
    match bits {
        [] => Err(PwsError::EmptyBits),
        [only] => Ok(*only),
        [b0, b1, rest @ ..] => {
            let mut terms = Vec::with_capacity(bits.len());
            terms.push(*b0);
            // 2x = x + x
            terms.push(em.add(*b1, *b1)?);
            for (i, bit) in rest.iter().enumerate().map(|(j, b)| (j + 2, b)) {
                let factor = weights.factor(i).ok_or_else(|| PwsError::InvalidParameter {
                    name: "bits",
                    reason: format!("weight of bit {i} does not fit in 64 bits"),
                })?;
                terms.push(em.scale(factor, *bit)?);
            }
            reduce_to_one(em, &terms, BinaryOp::Add)
        }
    }
}

/// Emit `t = b NOT b; check = t * b` for every bit and return the check wires.
///
/// `check` is zero iff `b` is 0 or 1.
pub fn verify_bits<W: Write>(em: &mut Emitter<W>, bits: &[Wire]) -> Result<Vec<Wire>> {
    let mut checks = Vec::with_capacity(bits.len());
    for &bit in bits {
        let complement = em.not(bit)?;
        checks.push(em.mul(complement, bit)?);
    }
    Ok(checks)
}
