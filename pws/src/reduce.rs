//! Balanced reduction trees.
//!
//! Each level pairs wires (0,1), (2,3), ... and emits one combining
//! instruction per pair; an odd trailing wire is carried to the next level
//! without being re-emitted. Every instruction lowers the live count by one,
//! so reducing `n` wires to width `w` always costs `n - w` instructions,
//! whatever the parity pattern of the levels. On the last level only as many
//! pairs are combined as are needed to land exactly on `w`; the rest are
//! carried in order.

use std::io::Write;

use crate::emit::Emitter;
use crate::error::{PwsError, Result};
use crate::instruction::BinaryOp;
use crate::wire::Wire;

/// Reduce `ivals` with `op` until exactly `width` wires remain.
///
/// A list already at or below `width` is returned unchanged.
pub fn reduce<W: Write>(
    em: &mut Emitter<W>,
    ivals: &[Wire],
    op: BinaryOp,
    width: usize,
) -> Result<Vec<Wire>> {
    if ivals.is_empty() {
        return Err(PwsError::EmptyReduction);
    }
    if width == 0 {
        return Err(PwsError::InvalidWidth(width));
    }

    let mut level = ivals.to_vec();
    while level.len() > width {
        let pairs = (level.len() / 2).min(level.len() - width);
        let mut next = Vec::with_capacity(level.len() - pairs);
        for pair in level[..2 * pairs].chunks_exact(2) {
            next.push(em.binary(op, pair[0], pair[1])?);
        }
        next.extend_from_slice(&level[2 * pairs..]);
        level = next;
    }
    Ok(level)
}

/// Full reduction down to a single wire.
pub fn reduce_to_one<W: Write>(
    em: &mut Emitter<W>,
    ivals: &[Wire],
    op: BinaryOp,
) -> Result<Wire> {
    let out = reduce(em, ivals, op, 1)?;
    Ok(out[0])
}
