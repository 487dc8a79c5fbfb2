// SPDX-License-Identifier: Apache-2.0

//! Exhaustive, stage-classified verification of the carry-select model.
//!
//! Every one of the 256 input pairs is evaluated and checked bit-exactly
//! against arithmetic reference values, speculative branches included. A
//! failing vector is classified by the first structural stage that diverges;
//! the sweep itself is fail-soft and always evaluates all vectors before the
//! aggregate verdict is formed.

use bitvec::vec::BitVec;
use serde::Serialize;

use crate::bits::{U2, U4};
use crate::csa::{csa4, Csa4Eval, LowSelect};

/// Number of vectors in the exhaustive sweep: 16 x 16 input pairs.
pub const VECTOR_COUNT: usize = 256;

/// The first structural stage at which a vector diverged, if any.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
pub enum Stage {
    Pass,
    /// The primary `{carry, sum}` output disagrees with `a + b`.
    Primary,
    /// A low-block speculative branch is wrong, or the constant-zero mux
    /// identity (`chosen == branch0`) is violated.
    LowBlockInternal,
    /// A high-block speculative branch is wrong, independent of selection.
    HighBlockPrecomp,
    /// The high block's chosen result does not match the branch named by the
    /// low block's carry-out.
    HighMux,
}

/// A mismatching signal. `expected` and `actual` pack the carry above the
/// sum bits: 3-bit values for block signals, a 5-bit value for the primary
/// output.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize)]
pub struct Mismatch {
    pub signal: &'static str,
    pub expected: u8,
    pub actual: u8,
}

/// Per-vector outcome.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize)]
pub struct Verdict {
    pub a: u8,
    pub b: u8,
    pub stage: Stage,
    pub mismatch: Option<Mismatch>,
}

/// Read access to one evaluation's internal signals.
///
/// The design was originally checked by two near-duplicate testbenches that
/// asserted the same properties while indexing different signals: one read
/// each block's discrete wires, the other sliced wide 4-bit speculative sum
/// vectors. Both are views of the same evaluation, so the verifier is
/// written once against this trait and instantiated per view.
pub trait InternalView {
    /// The input pair this evaluation was produced from.
    fn vector(&self) -> (U4, U4);
    /// The primary output, `(sum, carry_out)`.
    fn primary(&self) -> (U4, bool);
    /// The low block's speculative `(sum, carry)` for the assumed carry-in.
    fn low_branch(&self, cin: bool) -> (U2, bool);
    /// The low block's muxed `(sum, carry)`.
    fn low_chosen(&self) -> (U2, bool);
    /// The high block's speculative `(sum, carry)` for the assumed carry-in.
    fn high_branch(&self, cin: bool) -> (U2, bool);
    /// The high block's muxed `(sum, carry)`.
    fn high_chosen(&self) -> (U2, bool);
}

/// View that reads each block's wires directly.
pub struct BlockWires<'a>(pub &'a Csa4Eval);

impl InternalView for BlockWires<'_> {
    fn vector(&self) -> (U4, U4) {
        (self.0.a, self.0.b)
    }

    fn primary(&self) -> (U4, bool) {
        (self.0.sum, self.0.carry)
    }

    fn low_branch(&self, cin: bool) -> (U2, bool) {
        let branch = if cin { self.0.low.branch1 } else { self.0.low.branch0 };
        (branch.sum, branch.carry)
    }

    fn low_chosen(&self) -> (U2, bool) {
        (self.0.low.chosen.sum, self.0.low.chosen.carry)
    }

    fn high_branch(&self, cin: bool) -> (U2, bool) {
        let branch = if cin { self.0.high.branch1 } else { self.0.high.branch0 };
        (branch.sum, branch.carry)
    }

    fn high_chosen(&self) -> (U2, bool) {
        (self.0.high.chosen.sum, self.0.high.chosen.carry)
    }
}

/// View that reads the wide 4-bit speculative sum vectors and the 2-bit
/// speculative carry vectors, slicing out the per-block lanes.
pub struct SpeculativeVectors<'a>(pub &'a Csa4Eval);

impl InternalView for SpeculativeVectors<'_> {
    fn vector(&self) -> (U4, U4) {
        (self.0.a, self.0.b)
    }

    fn primary(&self) -> (U4, bool) {
        (self.0.sum, self.0.carry)
    }

    fn low_branch(&self, cin: bool) -> (U2, bool) {
        let sum = self.0.speculative_sum(cin).lo2();
        let carry = self.0.speculative_carry(cin).get_lsb(0);
        (sum, carry)
    }

    fn low_chosen(&self) -> (U2, bool) {
        (self.0.sum.lo2(), self.0.low.chosen.carry)
    }

    fn high_branch(&self, cin: bool) -> (U2, bool) {
        let sum = self.0.speculative_sum(cin).hi2();
        let carry = self.0.speculative_carry(cin).get_lsb(1);
        (sum, carry)
    }

    fn high_chosen(&self) -> (U2, bool) {
        (self.0.sum.hi2(), self.0.carry)
    }
}

fn packed2(sum: U2, carry: bool) -> u8 {
    sum.value() | (carry as u8) << 2
}

fn packed4(sum: U4, carry: bool) -> u8 {
    sum.value() | (carry as u8) << 4
}

/// Checks one evaluated vector against arithmetic reference values.
///
/// Checks run in structural order and stop at the first divergence. In
/// particular a primary-output mismatch does not cascade into the internal
/// checks: the composite matches its contract only when whole, so the
/// internal stages are only meaningful once the primary output agrees.
pub fn verify_vector<V: InternalView>(view: &V) -> Verdict {
    let (a, b) = view.vector();
    let fail = |stage, signal, expected, actual| Verdict {
        a: a.value(),
        b: b.value(),
        stage,
        mismatch: Some(Mismatch {
            signal,
            expected,
            actual,
        }),
    };

    // a. Primary output: the 5-bit `{carry, sum}` must equal a + b.
    let expected_full = a.value() + b.value();
    let (sum, carry) = view.primary();
    let actual_full = packed4(sum, carry);
    if actual_full != expected_full {
        return fail(Stage::Primary, "primary", expected_full, actual_full);
    }

    // b. Low block internals: both speculative branches against arithmetic,
    // then the constant-zero mux identity (chosen must equal branch0, never
    // branch1).
    for (cin, signal) in [(false, "low_branch0"), (true, "low_branch1")] {
        let expected = a.lo2().value() + b.lo2().value() + cin as u8;
        let (s, c) = view.low_branch(cin);
        if packed2(s, c) != expected {
            return fail(Stage::LowBlockInternal, signal, expected, packed2(s, c));
        }
    }
    {
        let (bs, bc) = view.low_branch(false);
        let (s, c) = view.low_chosen();
        if packed2(s, c) != packed2(bs, bc) {
            return fail(
                Stage::LowBlockInternal,
                "low_chosen",
                packed2(bs, bc),
                packed2(s, c),
            );
        }
    }

    // c. High block precomputation, independent of which branch gets
    // selected.
    for (cin, signal) in [(false, "high_branch0"), (true, "high_branch1")] {
        let expected = a.hi2().value() + b.hi2().value() + cin as u8;
        let (s, c) = view.high_branch(cin);
        if packed2(s, c) != expected {
            return fail(Stage::HighBlockPrecomp, signal, expected, packed2(s, c));
        }
    }

    // d. High mux: chosen must match the branch named by the low block's
    // carry-out.
    let (_, low_carry) = view.low_chosen();
    let (bs, bc) = view.high_branch(low_carry);
    let (s, c) = view.high_chosen();
    if packed2(s, c) != packed2(bs, bc) {
        return fail(
            Stage::HighMux,
            "high_chosen",
            packed2(bs, bc),
            packed2(s, c),
        );
    }

    Verdict {
        a: a.value(),
        b: b.value(),
        stage: Stage::Pass,
        mismatch: None,
    }
}

/// Which internal-signal view the verifier reads.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, clap::ValueEnum)]
pub enum ViewKind {
    /// Discrete per-block wires.
    BlockWires,
    /// Wide 4-bit speculative sum vectors, sliced per block.
    SpeculativeVectors,
}

/// Aggregate outcome of the exhaustive sweep.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SweepResult {
    pub total: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    /// Failing verdicts in sweep order (`a` outer, `b` inner).
    pub failures: Vec<Verdict>,
    /// Pass flag per vector, indexed by `a * 16 + b`.
    pub pass_bitmap: BitVec,
}

impl SweepResult {
    pub fn overall_pass(&self) -> bool {
        self.fail_count == 0
    }

    pub fn summary(&self) -> SweepSummary {
        SweepSummary {
            total: self.total,
            pass_count: self.pass_count,
            fail_count: self.fail_count,
            overall_pass: self.overall_pass(),
            failures: self.failures.clone(),
        }
    }
}

/// Serializable roll-up consumed by the reporting side.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct SweepSummary {
    pub total: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub overall_pass: bool,
    pub failures: Vec<Verdict>,
}

/// Runs the exhaustive 256-vector sweep for the given wiring variant,
/// reading internal signals through the given view.
///
/// Vectors are independent of each other; the lexicographic order here is a
/// reporting convenience, not a correctness requirement, and the aggregate
/// is a plain commutative tally.
pub fn run_sweep(wiring: LowSelect, view: ViewKind) -> SweepResult {
    let mut failures: Vec<Verdict> = Vec::new();
    let mut pass_bitmap = BitVec::repeat(false, VECTOR_COUNT);
    let mut pass_count = 0usize;
    for a in 0..=U4::MAX {
        for b in 0..=U4::MAX {
            let eval = csa4(U4::new(a), U4::new(b), wiring);
            let verdict = match view {
                ViewKind::BlockWires => verify_vector(&BlockWires(&eval)),
                ViewKind::SpeculativeVectors => verify_vector(&SpeculativeVectors(&eval)),
            };
            if verdict.stage == Stage::Pass {
                pass_count += 1;
                pass_bitmap.set(a as usize * 16 + b as usize, true);
            } else {
                log::debug!(
                    "vector a={} b={} diverged at stage {:?}",
                    a,
                    b,
                    verdict.stage
                );
                failures.push(verdict);
            }
        }
    }
    let fail_count = VECTOR_COUNT - pass_count;
    log::info!(
        "sweep complete ({:?}, {:?}): {} passed, {} failed",
        wiring,
        view,
        pass_count,
        fail_count
    );
    SweepResult {
        total: VECTOR_COUNT,
        pass_count,
        fail_count,
        failures,
        pass_bitmap,
    }
}
