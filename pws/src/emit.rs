//! Instruction emitter: allocates output wires and appends PWS lines to a sink.
//!
//! The emitter is the only place that touches the wire counter and the output
//! stream. Every helper allocates its result wire first and then writes
//! exactly one line, so wires appear in the stream in id order.

use std::io::Write;

use tracing::{debug, trace};

use crate::error::Result;
use crate::instruction::{BinaryOp, Instruction};
use crate::wire::{Wire, WireAllocator};

// ============================================================================
// EmitStats
// ============================================================================

/// Per-kind tally of everything written through an [`Emitter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub inputs: u64,
    pub outputs: u64,
    pub adds: u64,
    pub muls: u64,
    pub ors: u64,
    pub nots: u64,
    pub scales: u64,
    pub binds: u64,
    pub comments: u64,
    /// Counter value after the last instruction (next free wire id).
    pub wires: u64,
}

impl EmitStats {
    fn record(&mut self, inst: &Instruction) {
        match inst {
            Instruction::Input { .. } => self.inputs += 1,
            Instruction::Output { .. } => self.outputs += 1,
            Instruction::Binary { op, .. } => match op {
                BinaryOp::Add => self.adds += 1,
                BinaryOp::Mul => self.muls += 1,
                BinaryOp::Or => self.ors += 1,
            },
            Instruction::Not { .. } => self.nots += 1,
            Instruction::Scale { .. } => self.scales += 1,
            Instruction::Bind { .. } => self.binds += 1,
            Instruction::Comment(_) => self.comments += 1,
        }
    }

    /// Instructions that compute a new value.
    pub fn arithmetic(&self) -> u64 {
        self.adds + self.muls + self.ors + self.nots + self.scales
    }

    /// Every `P ...` line, i.e. everything except comments.
    pub fn instructions(&self) -> u64 {
        self.inputs + self.outputs + self.arithmetic() + self.binds
    }
}

// ============================================================================
// Emitter
// ============================================================================

pub struct Emitter<W: Write> {
    sink: W,
    wires: WireAllocator,
    next_input: u64,
    next_output: u64,
    stats: EmitStats,
}

impl<W: Write> Emitter<W> {
    /// Emitter whose first wire is `V0`.
    pub fn new(sink: W) -> Self {
        Self::with_allocator(sink, WireAllocator::default())
    }

    pub fn with_allocator(sink: W, wires: WireAllocator) -> Self {
        Self {
            sink,
            wires,
            next_input: 0,
            next_output: 0,
            stats: EmitStats::default(),
        }
    }

    /// Write one instruction line.
    pub fn emit(&mut self, inst: Instruction) -> Result<()> {
        writeln!(self.sink, "{inst}")?;
        trace!(instruction = %inst, "emit");
        self.stats.record(&inst);
        Ok(())
    }

    // --- Declarations ---

    /// Bind a caller-chosen wire to an input slot.
    pub fn declare_input(&mut self, wire: Wire, slot: u64) -> Result<()> {
        self.emit(Instruction::Input { wire, slot })
    }

    /// Allocate `count` wires and bind them to consecutive input slots.
    pub fn inputs(&mut self, count: u64) -> Result<Vec<Wire>> {
        let mut wires = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let wire = self.wires.next();
            let slot = self.next_input;
            self.next_input += 1;
            self.declare_input(wire, slot)?;
            wires.push(wire);
        }
        Ok(wires)
    }

    /// Declare `wire` as the next output slot. Returns the slot number.
    pub fn output(&mut self, wire: Wire) -> Result<u64> {
        let slot = self.next_output;
        self.next_output += 1;
        self.emit(Instruction::Output { wire, slot })?;
        Ok(slot)
    }

    pub fn comment(&mut self, text: impl Into<String>) -> Result<()> {
        self.emit(Instruction::Comment(text.into()))
    }

    // --- Arithmetic ---

    pub fn binary(&mut self, op: BinaryOp, lhs: Wire, rhs: Wire) -> Result<Wire> {
        let out = self.wires.next();
        self.emit(Instruction::Binary { out, op, lhs, rhs })?;
        Ok(out)
    }

    pub fn add(&mut self, lhs: Wire, rhs: Wire) -> Result<Wire> {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn mul(&mut self, lhs: Wire, rhs: Wire) -> Result<Wire> {
        self.binary(BinaryOp::Mul, lhs, rhs)
    }

    pub fn or(&mut self, lhs: Wire, rhs: Wire) -> Result<Wire> {
        self.binary(BinaryOp::Or, lhs, rhs)
    }

    pub fn not(&mut self, operand: Wire) -> Result<Wire> {
        let out = self.wires.next();
        self.emit(Instruction::Not { out, operand })?;
        Ok(out)
    }

    /// `factor * operand`.
    pub fn scale(&mut self, factor: u64, operand: Wire) -> Result<Wire> {
        let out = self.wires.next();
        self.emit(Instruction::Scale {
            out,
            factor,
            operand,
        })?;
        Ok(out)
    }

    /// Assert `target == source`. No wire is allocated.
    pub fn bind(&mut self, target: Wire, source: Wire) -> Result<()> {
        self.emit(Instruction::Bind { target, source })
    }

    // --- Queries ---

    pub fn stats(&self) -> EmitStats {
        EmitStats {
            wires: self.wires.peek().index(),
            ..self.stats
        }
    }

    /// Next wire id the emitter will allocate.
    pub fn next_wire(&self) -> Wire {
        self.wires.peek()
    }

    /// Flush the sink and hand it back together with the final tally.
    pub fn finish(mut self) -> Result<(W, EmitStats)> {
        self.sink.flush()?;
        let stats = self.stats();
        debug!(
            inputs = stats.inputs,
            outputs = stats.outputs,
            arithmetic = stats.arithmetic(),
            wires = stats.wires,
            "circuit emitted"
        );
        Ok((self.sink, stats))
    }
}
