use std::io;

/// Errors raised while emitting a PWS circuit.
#[derive(Debug, thiserror::Error)]
pub enum PwsError {
    /// The output sink rejected a write. Generation stops at the first one.
    #[error("failed to write instruction: {0}")]
    Io(#[from] io::Error),
    /// A reduction tree was asked to combine zero wires.
    #[error("cannot reduce an empty wire list")]
    EmptyReduction,
    /// Reduction target width must be at least 1.
    #[error("invalid reduction width: {0}")]
    InvalidWidth(usize),
    /// Recombination needs at least one bit wire.
    #[error("cannot recombine an empty bit sequence")]
    EmptyBits,
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, PwsError>;
