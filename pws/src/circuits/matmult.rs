//! Dense matrix multiplication: `C = A * B` for two `n x n` matrices.
//!
//! Inputs `V0..V(n^2)` hold `A` row-major, `V(n^2)..V(2n^2)` hold `B`
//! row-major. Each output cell is an `n`-term dot product: `n` multiplies
//! followed by an add tree of `n - 1` instructions.

use std::io::Write;

use tracing::debug;

use super::{require_fits, require_positive, Circuit};
use crate::emit::Emitter;
use crate::error::Result;
use crate::instruction::BinaryOp;
use crate::reduce::reduce_to_one;
use crate::wire::Wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatMulParams {
    /// Matrix dimension `n`.
    pub dim: u64,
}

impl MatMulParams {
    pub fn new(dim: u64) -> Self {
        Self { dim }
    }

    /// Emit the dot product of row `r` of `A` and column `c` of `B`.
    fn dot_product<W: Write>(
        &self,
        em: &mut Emitter<W>,
        inputs: &[Wire],
        r: u64,
        c: u64,
    ) -> Result<Wire> {
        let n = self.dim;
        let size = n * n;
        em.comment(format!("row {r}, col {c}"))?;

        let mut products = Vec::with_capacity(n as usize);
        for k in 0..n {
            let a = inputs[(r * n + k) as usize];
            let b = inputs[(size + k * n + c) as usize];
            products.push(em.mul(a, b)?);
        }
        reduce_to_one(em, &products, BinaryOp::Add)
    }
}

impl Circuit for MatMulParams {
    fn file_name(&self) -> String {
        format!("matmult_{}.pws", self.dim)
    }

    fn validate(&self) -> Result<()> {
        require_positive("dim", self.dim)?;
        // n^2 cells, each 2n wires on top of the 2n^2 inputs: n^2 (2n + 1)
        let n = self.dim;
        let wires = n
            .checked_mul(n)
            .and_then(|size| size.checked_mul(n.checked_mul(2)?.checked_add(1)?));
        require_fits("dim", wires)?;
        Ok(())
    }

    fn build<W: Write>(&self, em: &mut Emitter<W>) -> Result<()> {
        let n = self.dim;
        debug!(dim = n, "generating matrix multiply");

        let inputs = em.inputs(2 * n * n)?;

        let mut cells = Vec::with_capacity((n * n) as usize);
        for r in 0..n {
            for c in 0..n {
                cells.push(self.dot_product(em, &inputs, r, c)?);
            }
        }

        for cell in cells {
            em.output(cell)?;
        }
        Ok(())
    }
}
