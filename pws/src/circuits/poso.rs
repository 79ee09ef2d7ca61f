//! Proof of sub-order (PoSO) constraint circuit.
//!
//! Checks random linear combinations of secret values against claimed
//! bit-decompositions. For every repetition `r` and every batch `b` of up to
//! `m` secrets:
//!
//!   dp_rb    = sum_k secret[b*m + k] * coeff[r*m + k]
//!   recomb_rb = recombine(bits_rb)
//!   recomb_rb == dp_rb                (bind)
//!
//! The circuit is only satisfiable when every supplied decomposition matches
//! its batch sum, and the decomposition is `n` bits wide, which bounds it.
//!
//! Input layout:
//!   0..num_poso                 secret values
//!   num_poso..+m*reps           random coefficients, `m` per repetition
//!   num_poso+m*reps..           bits, `n` per (rep, batch), rep-major

use std::io::Write;

use tracing::debug;

use super::{require_fits, require_positive, Circuit};
use crate::emit::Emitter;
use crate::error::{PwsError, Result};
use crate::gadgets::{recombine, verify_bits, Weights};
use crate::instruction::BinaryOp;
use crate::reduce::reduce_to_one;
use crate::wire::Wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosoParams {
    /// Number of secret values.
    pub num_poso: u64,
    /// Bit width of each decomposition (log of the bound).
    pub bits: u64,
    /// Secrets per batch, and random coefficients per repetition.
    pub batch: u64,
    pub reps: u64,
    pub weights: Weights,
    /// Also emit boolean checks over every decomposition bit.
    pub check_bits: bool,
}

impl PosoParams {
    pub fn new(num_poso: u64, bits: u64, batch: u64, reps: u64) -> Self {
        Self {
            num_poso,
            bits,
            batch,
            reps,
            weights: Weights::default(),
            check_bits: false,
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_bit_checks(mut self, check_bits: bool) -> Self {
        self.check_bits = check_bits;
        self
    }

    /// Batches per repetition: `ceil(num_poso / batch)`.
    pub fn batches(&self) -> u64 {
        self.num_poso.div_ceil(self.batch)
    }

    pub fn coefficient_inputs(&self) -> u64 {
        self.batch * self.reps
    }

    pub fn bit_inputs(&self) -> u64 {
        self.reps * self.bits * self.batches()
    }

    pub fn input_count(&self) -> u64 {
        self.num_poso + self.coefficient_inputs() + self.bit_inputs()
    }

    /// [`input_count`](Self::input_count) with every step checked.
    fn checked_input_count(&self) -> Option<u64> {
        let coeffs = self.batch.checked_mul(self.reps)?;
        let bits = self.reps.checked_mul(self.bits)?.checked_mul(self.batches())?;
        self.num_poso.checked_add(coeffs)?.checked_add(bits)
    }

    /// Dot product of batch `b` with the coefficients of repetition `r`.
    ///
    /// A final short batch wraps around and reuses secrets from the start.
    fn batch_sum<W: Write>(
        &self,
        em: &mut Emitter<W>,
        secrets: &[Wire],
        coeffs: &[Wire],
        r: u64,
        b: u64,
    ) -> Result<Wire> {
        let mut products = Vec::with_capacity(self.batch as usize);
        for k in 0..self.batch {
            let j = (b * self.batch + k) % self.num_poso;
            let coeff = coeffs[(r * self.batch + k) as usize];
            products.push(em.mul(secrets[j as usize], coeff)?);
        }
        reduce_to_one(em, &products, BinaryOp::Add)
    }
}

impl Circuit for PosoParams {
    fn file_name(&self) -> String {
        format!(
            "poso_{}_{}_{}_{}.pws",
            self.num_poso, self.bits, self.batch, self.reps
        )
    }

    fn validate(&self) -> Result<()> {
        require_positive("num_poso", self.num_poso)?;
        require_positive("n", self.bits)?;
        require_positive("m", self.batch)?;
        require_positive("reps", self.reps)?;
        // bit 64 would need the constant 2^64
        if self.weights == Weights::PowersOfTwo && self.bits > 64 {
            return Err(PwsError::InvalidParameter {
                name: "n",
                reason: "power-of-two weights support at most 64 bits".into(),
            });
        }
        require_fits("reps", self.checked_input_count())?;
        Ok(())
    }

    fn build<W: Write>(&self, em: &mut Emitter<W>) -> Result<()> {
        debug!(
            num_poso = self.num_poso,
            n = self.bits,
            m = self.batch,
            reps = self.reps,
            batches = self.batches(),
            "generating PoSO"
        );

        em.comment("Inputs")?;
        let inputs = em.inputs(self.input_count())?;
        let (secrets, rest) = inputs.split_at(self.num_poso as usize);
        let (coeffs, bit_inputs) = rest.split_at(self.coefficient_inputs() as usize);

        em.comment("PoSO")?;
        let width = self.bits as usize;
        let mut sum_checks = Vec::new();
        let mut bit_checks = Vec::new();
        for r in 0..self.reps {
            for b in 0..self.batches() {
                em.comment(format!("rep {r}, batch {b}"))?;
                let sum = self.batch_sum(em, secrets, coeffs, r, b)?;

                let start = ((r * self.batches() + b) * self.bits) as usize;
                let bits = &bit_inputs[start..start + width];
                if self.check_bits {
                    bit_checks.extend(verify_bits(em, bits)?);
                }

                let recombined = recombine(em, bits, self.weights)?;
                em.bind(recombined, sum)?;
                sum_checks.push(recombined);
            }
        }

        em.comment("Sum checks")?;
        let check = reduce_to_one(em, &sum_checks, BinaryOp::Or)?;

        let bit_check = if self.check_bits {
            em.comment("Bit checks")?;
            Some(reduce_to_one(em, &bit_checks, BinaryOp::Add)?)
        } else {
            None
        };

        em.comment("Output")?;
        em.output(check)?;
        if let Some(bit_check) = bit_check {
            em.output(bit_check)?;
        }
        Ok(())
    }
}
