pub mod circuits;
pub mod emit;
pub mod error;
pub mod gadgets;
pub mod instruction;
pub mod reduce;
pub mod wire;

pub use circuits::{Circuit, MatMulParams, PosoParams};
pub use emit::{EmitStats, Emitter};
pub use error::{PwsError, Result};
pub use gadgets::{recombine, verify_bits, Weights};
pub use instruction::{BinaryOp, Instruction};
pub use reduce::{reduce, reduce_to_one};
pub use wire::{Wire, WireAllocator};
