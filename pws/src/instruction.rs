//! PWS instruction model and its textual rendering.
//!
//! One instruction per line, fields separated by single spaces, each line
//! terminated by the end-of-instruction marker `E`:
//!
//! ```text
//! P V<id> = I<slot> E            input binding
//! P V<id> = O<slot> E            output declaration
//! P V<id> = V<a> <op> V<b> E     op in {+, *, OR}
//! P V<id> = V<a> NOT V<a> E      logical complement
//! P V<id> = <k> * V<a> E         constant-scaled multiply
//! P V<id> = V<a> E               equality binding
//! // <text>                      comment, ignored by consumers
//! ```

use std::fmt;

use crate::wire::Wire;

// ============================================================================
// BinaryOp
// ============================================================================

/// Two-operand wire operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Mul,
    Or,
}

impl BinaryOp {
    /// Token printed between the operands.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Mul => "*",
            BinaryOp::Or => "OR",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Instruction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Bind `wire` to external input `slot`.
    Input { wire: Wire, slot: u64 },
    /// Expose the value on `wire` as external output `slot`.
    Output { wire: Wire, slot: u64 },
    Binary {
        out: Wire,
        op: BinaryOp,
        lhs: Wire,
        rhs: Wire,
    },
    /// Logical complement, written as a self-NOT.
    Not { out: Wire, operand: Wire },
    Scale {
        out: Wire,
        factor: u64,
        operand: Wire,
    },
    /// Equality assertion: `target` must carry the same value as `source`.
    /// Both wires already exist; nothing new is defined.
    Bind { target: Wire, source: Wire },
    Comment(String),
}

impl Instruction {
    /// The wire this line defines, if any.
    pub fn defines(&self) -> Option<Wire> {
        match self {
            Instruction::Input { wire, .. } => Some(*wire),
            Instruction::Binary { out, .. }
            | Instruction::Not { out, .. }
            | Instruction::Scale { out, .. } => Some(*out),
            Instruction::Output { .. } | Instruction::Bind { .. } | Instruction::Comment(_) => {
                None
            }
        }
    }

    /// True for instructions that compute a new value.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Instruction::Binary { .. } | Instruction::Not { .. } | Instruction::Scale { .. }
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Input { wire, slot } => write!(f, "P V{wire} = I{slot} E"),
            Instruction::Output { wire, slot } => write!(f, "P V{wire} = O{slot} E"),
            Instruction::Binary { out, op, lhs, rhs } => {
                write!(f, "P V{out} = V{lhs} {op} V{rhs} E")
            }
            Instruction::Not { out, operand } => {
                write!(f, "P V{out} = V{operand} NOT V{operand} E")
            }
            Instruction::Scale {
                out,
                factor,
                operand,
            } => write!(f, "P V{out} = {factor} * V{operand} E"),
            Instruction::Bind { target, source } => write!(f, "P V{target} = V{source} E"),
            Instruction::Comment(text) => write!(f, "// {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(id: u64) -> Wire {
        Wire::new(id)
    }

    #[test]
    fn test_render_input_output() {
        let input = Instruction::Input { wire: w(3), slot: 3 };
        assert_eq!(input.to_string(), "P V3 = I3 E");

        let output = Instruction::Output { wire: w(17), slot: 0 };
        assert_eq!(output.to_string(), "P V17 = O0 E");
    }

    #[test]
    fn test_render_binary_ops() {
        let add = Instruction::Binary {
            out: w(8),
            op: BinaryOp::Add,
            lhs: w(4),
            rhs: w(5),
        };
        let mul = Instruction::Binary {
            out: w(9),
            op: BinaryOp::Mul,
            lhs: w(0),
            rhs: w(6),
        };
        let or = Instruction::Binary {
            out: w(10),
            op: BinaryOp::Or,
            lhs: w(8),
            rhs: w(9),
        };
        assert_eq!(add.to_string(), "P V8 = V4 + V5 E");
        assert_eq!(mul.to_string(), "P V9 = V0 * V6 E");
        assert_eq!(or.to_string(), "P V10 = V8 OR V9 E");
    }

    #[test]
    fn test_render_not_scale_bind_comment() {
        assert_eq!(
            Instruction::Not { out: w(12), operand: w(7) }.to_string(),
            "P V12 = V7 NOT V7 E"
        );
        assert_eq!(
            Instruction::Scale {
                out: w(13),
                factor: 16,
                operand: w(7),
            }
            .to_string(),
            "P V13 = 16 * V7 E"
        );
        assert_eq!(
            Instruction::Bind { target: w(30), source: w(22) }.to_string(),
            "P V30 = V22 E"
        );
        assert_eq!(Instruction::Comment("row 0, col 1".into()).to_string(), "// row 0, col 1");
    }

    #[test]
    fn test_defines() {
        assert_eq!(Instruction::Input { wire: w(1), slot: 1 }.defines(), Some(w(1)));
        assert_eq!(Instruction::Not { out: w(5), operand: w(1) }.defines(), Some(w(5)));
        assert_eq!(Instruction::Output { wire: w(5), slot: 0 }.defines(), None);
        assert_eq!(Instruction::Bind { target: w(5), source: w(2) }.defines(), None);
        assert_eq!(Instruction::Comment(String::new()).defines(), None);
    }

    #[test]
    fn test_is_arithmetic() {
        let scale = Instruction::Scale {
            out: w(2),
            factor: 4,
            operand: w(1),
        };
        assert!(scale.is_arithmetic());
        assert!(!Instruction::Input { wire: w(0), slot: 0 }.is_arithmetic());
        assert!(!Instruction::Bind { target: w(2), source: w(1) }.is_arithmetic());
    }
}
