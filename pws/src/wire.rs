//! Wires and wire allocation for PWS circuits.
//!
//! Every value in a PWS circuit lives on a wire `V<id>`. Ids are handed out
//! in strictly increasing order and never reused, so the emitted
//! instruction stream is topologically sorted by construction.
//!
//! Wire layout used by the generators:
//!   0..n_inputs   = circuit inputs (bound to `I<slot>`)
//!   n_inputs..    = intermediates, in emission order

use std::fmt;

// ============================================================================
// Wire
// ============================================================================

/// A reference to a wire in a PWS circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wire(pub(crate) u64);

impl Wire {
    /// Wire with a known id, for inputs laid out by a generator.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id, as printed after `V`.
    #[inline]
    pub fn index(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// WireAllocator
// ============================================================================

/// Monotonic wire-id counter.
///
/// Owned by one emitter; there is no global counter, so several circuits can
/// be generated in the same process without interfering.
#[derive(Debug, Clone)]
pub struct WireAllocator {
    base: u64,
    next: u64,
}

impl WireAllocator {
    /// Allocator whose first wire is `base`.
    pub fn starting_at(base: u64) -> Self {
        Self { base, next: base }
    }

    /// Wires `0..count` for the circuit inputs, plus an allocator positioned
    /// right after them.
    pub fn inputs(count: u64) -> (Vec<Wire>, Self) {
        ((0..count).map(Wire).collect(), Self::starting_at(count))
    }

    /// Hand out the next free wire.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Wire {
        let w = Wire(self.next);
        self.next += 1;
        w
    }

    /// The wire the next call to [`next`](Self::next) will return.
    pub fn peek(&self) -> Wire {
        Wire(self.next)
    }

    /// Number of wires handed out since construction.
    pub fn allocated(&self) -> u64 {
        self.next - self.base
    }
}

impl Default for WireAllocator {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = WireAllocator::starting_at(8);
        let a = alloc.next();
        let b = alloc.next();
        let c = alloc.next();
        assert_eq!((a.index(), b.index(), c.index()), (8, 9, 10));
        assert!(a < b && b < c);
        assert_eq!(alloc.allocated(), 3);
    }

    #[test]
    fn test_peek_does_not_allocate() {
        let mut alloc = WireAllocator::default();
        assert_eq!(alloc.peek(), Wire::new(0));
        assert_eq!(alloc.peek(), Wire::new(0));
        assert_eq!(alloc.next(), Wire::new(0));
        assert_eq!(alloc.peek(), Wire::new(1));
    }

    #[test]
    fn test_inputs_layout() {
        let (ins, mut alloc) = WireAllocator::inputs(4);
        assert_eq!(ins, vec![Wire(0), Wire(1), Wire(2), Wire(3)]);
        assert_eq!(alloc.next(), Wire(4));
        assert_eq!(alloc.allocated(), 1);
    }

    #[test]
    fn test_wire_display() {
        assert_eq!(Wire::new(42).to_string(), "42");
    }
}
