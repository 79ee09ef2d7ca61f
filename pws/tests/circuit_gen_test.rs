use std::collections::HashSet;

use pws::{Circuit, MatMulParams, PosoParams, Weights};

fn render<C: Circuit>(circuit: &C) -> (String, pws::EmitStats) {
    let (buf, stats) = circuit.generate(Vec::new()).unwrap();
    (String::from_utf8(buf).unwrap(), stats)
}

fn count(text: &str, pred: impl Fn(&str) -> bool) -> usize {
    text.lines().filter(|l| pred(l)).count()
}

/// Every line is either a comment or a `P ... E` instruction, every wire
/// referenced on the right-hand side was defined on an earlier line, and
/// defining lines introduce wires in strictly increasing order.
fn assert_well_formed(text: &str) {
    let mut defined: HashSet<u64> = HashSet::new();
    let mut last: Option<u64> = None;
    for line in text.lines() {
        if line.starts_with("// ") {
            continue;
        }
        let fields: Vec<&str> = line.split(' ').collect();
        assert_eq!(fields[0], "P", "bad line: {line}");
        assert_eq!(fields[2], "=", "bad line: {line}");
        assert_eq!(*fields.last().unwrap(), "E", "bad line: {line}");

        let lhs: u64 = fields[1][1..].parse().unwrap();
        let rhs = &fields[3..fields.len() - 1];
        for tok in rhs {
            if let Some(id) = tok.strip_prefix('V') {
                let id: u64 = id.parse().unwrap();
                assert!(defined.contains(&id), "V{id} used before definition: {line}");
            }
        }

        let is_output = rhs.len() == 1 && rhs[0].starts_with('O');
        let is_bind = rhs.len() == 1 && rhs[0].starts_with('V');
        if is_output || is_bind {
            assert!(defined.contains(&lhs), "V{lhs} not defined: {line}");
        } else {
            assert!(defined.insert(lhs), "V{lhs} defined twice: {line}");
            assert!(last.is_none_or(|prev| lhs > prev), "V{lhs} out of order");
            last = Some(lhs);
        }
    }
}

// ======================================================================
// Matrix multiply
// ======================================================================

#[test]
fn matmult_two_by_two_counts() {
    let (text, stats) = render(&MatMulParams::new(2));
    assert_eq!(stats.inputs, 8);
    assert_eq!(stats.outputs, 4);
    assert_eq!(stats.muls, 8);
    assert_eq!(stats.adds, 4);
    assert_eq!(stats.arithmetic(), 12);
    assert_eq!(count(&text, |l| l.contains("= I")), 8);
    assert_eq!(count(&text, |l| l.contains("= O")), 4);
    assert_well_formed(&text);
}

#[test]
fn matmult_counts_for_odd_dimensions() {
    for n in 1..=7u64 {
        let (text, stats) = render(&MatMulParams::new(n));
        assert_eq!(stats.inputs, 2 * n * n);
        assert_eq!(stats.outputs, n * n);
        // per cell: n multiplies and n - 1 adds
        assert_eq!(stats.muls, n * n * n);
        assert_eq!(stats.adds, n * n * (n - 1));
        assert_eq!(stats.wires, 2 * n * n + n * n * (2 * n - 1));
        assert_well_formed(&text);
    }
}

#[test]
fn matmult_output_is_deterministic() {
    let (a, _) = render(&MatMulParams::new(5));
    let (b, _) = render(&MatMulParams::new(5));
    assert_eq!(a, b);
}

// ======================================================================
// PoSO
// ======================================================================

#[test]
fn poso_four_secrets_two_batches() {
    let params = PosoParams::new(4, 8, 2, 1);
    let (text, stats) = render(&params);

    // 4 secrets, 2 coefficients, 1 * 8 * ceil(4 / 2) = 16 bits
    assert_eq!(stats.inputs, 4 + 2 + 16);
    assert_eq!(params.bit_inputs(), 16);

    // two batches: each a 2-product dot product and one recombination
    assert_eq!(stats.muls, 4);
    assert_eq!(stats.binds, 2);
    assert_eq!(stats.scales, 2 * 6);
    // 1 add per dot product, 1 doubling + 7 tree adds per recombination
    assert_eq!(stats.adds, 2 * (1 + 8));

    // the two sum checks collapse through a single OR into the only output
    assert_eq!(stats.ors, 1);
    assert_eq!(stats.outputs, 1);
    assert!(text.contains("P V56 = V38 OR V55 E\n"));
    assert!(text.contains("P V38 = V24 E\n"));
    assert!(text.contains("P V55 = V41 E\n"));
    assert!(text.ends_with("// Output\nP V56 = O0 E\n"));
    assert_well_formed(&text);
}

#[test]
fn poso_uneven_batches_and_reps() {
    let params = PosoParams::new(5, 4, 2, 3);
    let (text, stats) = render(&params);
    let groups = params.reps * params.batches();
    assert_eq!(groups, 9);
    assert_eq!(stats.inputs, 5 + 6 + 3 * 4 * 3);
    assert_eq!(stats.binds, groups);
    assert_eq!(stats.ors, groups - 1);
    assert_eq!(count(&text, |l| l.starts_with("// rep ")), groups as usize);
    assert_well_formed(&text);
}

#[test]
fn poso_power_of_two_weights() {
    let params = PosoParams::new(2, 5, 2, 1).with_weights(Weights::PowersOfTwo);
    let (text, _) = render(&params);
    assert!(text.contains(" = 4 * V"));
    assert!(text.contains(" = 8 * V"));
    assert!(text.contains(" = 16 * V"));
    assert!(!text.contains(" = 1 * V"));
    assert_well_formed(&text);
}

#[test]
fn poso_bit_checks() {
    let params = PosoParams::new(4, 8, 2, 2).with_bit_checks(true);
    let (text, stats) = render(&params);
    let bits = params.bit_inputs();
    assert_eq!(stats.nots, bits);
    // one multiply per check on top of the dot products
    assert_eq!(stats.muls, 2 * 4 + bits);
    assert_eq!(stats.outputs, 2);
    assert_well_formed(&text);
}

#[test]
fn poso_output_is_deterministic() {
    let params = PosoParams::new(6, 16, 4, 2);
    let (a, _) = render(&params);
    let (b, _) = render(&params);
    assert_eq!(a, b);
}
