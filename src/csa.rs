// SPDX-License-Identifier: Apache-2.0

//! The 4-bit carry-select composition.
//!
//! A carry-select adder specializes groups of bits on whether the carry-in to
//! the group is zero or one, then picks the precomputed result that matches
//! once the true carry arrives. This model fixes the partition at two 2-bit
//! blocks and keeps every speculative signal observable, because the verifier
//! inspects the unselected branches too.

use serde::Serialize;

use crate::adder::{ripple_add2, RippleAdd2};
use crate::bits::{U2, U4};
use crate::mux::{mux2, mux2_u2};

/// One evaluated 2-bit carry-select block.
///
/// Both ripple branches are evaluated regardless of `select`; "always compute
/// both, then pick" is the defining idiom of the block and holds even where
/// the select line is wired to a constant.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct BlockEval {
    /// Ripple result specialized on carry-in = 0.
    pub branch0: RippleAdd2,
    /// Ripple result specialized on carry-in = 1.
    pub branch1: RippleAdd2,
    /// The select line value the block saw.
    pub select: bool,
    /// The muxed result: `branch1` if `select` else `branch0`.
    pub chosen: RippleAdd2,
}

/// Evaluates one 2-bit block of the carry-select partition.
pub fn block_eval(a: U2, b: U2, select: bool) -> BlockEval {
    // Specialization that assumes carry-in = 0.
    let branch0 = ripple_add2(a, b, false);
    // Specialization that assumes carry-in = 1.
    let branch1 = ripple_add2(a, b, true);
    // Mux to select between the two.
    let chosen = RippleAdd2 {
        sum: mux2_u2(select, branch1.sum, branch0.sum),
        carry: mux2(select, branch1.carry, branch0.carry),
    };
    BlockEval {
        branch0,
        branch1,
        select,
        chosen,
    }
}

/// How the low block's select line is tied to zero.
///
/// The low block never sees the true incoming carry; its carry-select
/// machinery is present but inert, so it behaves as a plain ripple adder with
/// carry-in 0. The two source variants of the design express the same
/// constant differently and must stay behaviorally identical.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, clap::ValueEnum)]
pub enum LowSelect {
    /// The select pin is tied to ground at the instantiation.
    Hardwired,
    /// A named internal net, driven to zero, feeds the pin.
    ForcedNet,
}

impl LowSelect {
    /// The level present on the low block's select line. Constant zero for
    /// both wiring variants.
    pub fn level(&self) -> bool {
        match self {
            LowSelect::Hardwired => false,
            LowSelect::ForcedNet => false,
        }
    }
}

/// One fully evaluated 4-bit carry-select addition, internals included.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Csa4Eval {
    pub a: U4,
    pub b: U4,
    /// Low 2-bit block; its select is the constant-zero wiring.
    pub low: BlockEval,
    /// High 2-bit block; its select is the low block's chosen carry-out.
    pub high: BlockEval,
    /// `{high.chosen.sum, low.chosen.sum}`.
    pub sum: U4,
    /// `high.chosen.carry`.
    pub carry: bool,
}

impl Csa4Eval {
    /// Packs carry and sum into the 5-bit value `{carry, sum[3:0]}`.
    pub fn packed(&self) -> u8 {
        self.sum.value() | (self.carry as u8) << 4
    }

    /// The 4-bit concatenation of both blocks' speculative sums for the
    /// given assumed carry-in.
    pub fn speculative_sum(&self, cin: bool) -> U4 {
        let (high, low) = if cin {
            (self.high.branch1.sum, self.low.branch1.sum)
        } else {
            (self.high.branch0.sum, self.low.branch0.sum)
        };
        U4::concat(high, low)
    }

    /// The 2-bit vector of both blocks' speculative carries for the given
    /// assumed carry-in: low block in bit 0, high block in bit 1.
    pub fn speculative_carry(&self, cin: bool) -> U2 {
        let (high, low) = if cin {
            (self.high.branch1.carry, self.low.branch1.carry)
        } else {
            (self.high.branch0.carry, self.low.branch0.carry)
        };
        U2::new(low as u8 | (high as u8) << 1)
    }
}

/// Evaluates the full 4-bit carry-select adder for one input pair.
///
/// Stage A: the low block's select is a wiring-time constant zero, so its
/// chosen result always equals its carry-in-0 branch. Stage B: the high
/// block's select is the carry-out chosen by stage A, which is the genuine
/// carry-select path.
pub fn csa4(a: U4, b: U4, wiring: LowSelect) -> Csa4Eval {
    let low = block_eval(a.lo2(), b.lo2(), wiring.level());
    let high = block_eval(a.hi2(), b.hi2(), low.chosen.carry);
    Csa4Eval {
        a,
        b,
        low,
        high,
        sum: U4::concat(high.chosen.sum, low.chosen.sum),
        carry: high.chosen.carry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_eval_populates_both_branches() {
        // select = 0, yet branch1 must still hold the cin=1 speculation.
        let block = block_eval(U2::new(3), U2::new(3), false);
        assert_eq!(block.branch0.packed(), 0b110);
        assert_eq!(block.branch1.packed(), 0b111);
        assert_eq!(block.chosen, block.branch0);
    }

    #[test]
    fn test_block_eval_select_picks_branch1() {
        let block = block_eval(U2::new(1), U2::new(2), true);
        assert_eq!(block.chosen, block.branch1);
        assert_eq!(block.chosen.packed(), 1 + 2 + 1);
    }

    #[test]
    fn test_csa4_zero_plus_zero() {
        let eval = csa4(U4::new(0), U4::new(0), LowSelect::Hardwired);
        assert_eq!(eval.packed(), 0);
        assert_eq!(eval.low.branch0.packed(), 0b000);
        assert_eq!(eval.low.branch1.packed(), 0b001);
        assert_eq!(eval.high.branch0.packed(), 0b000);
        assert_eq!(eval.high.branch1.packed(), 0b001);
        // Low carry 0 selects the high block's branch0.
        assert!(!eval.high.select);
        assert_eq!(eval.high.chosen, eval.high.branch0);
    }

    #[test]
    fn test_csa4_fifteen_plus_fifteen() {
        let eval = csa4(U4::new(15), U4::new(15), LowSelect::Hardwired);
        // 15 + 15 = 30 = 0b11110.
        assert_eq!(eval.packed(), 30);
        // Low block: 3 + 3 = 6, carry set, but the constant-zero select still
        // routes branch0 through the mux.
        assert_eq!(eval.low.branch0.packed(), 0b110);
        assert_eq!(eval.low.chosen, eval.low.branch0);
        assert!(eval.low.chosen.carry);
        // High block: 3 + 3 + 1 = 7 via the selected branch1.
        assert!(eval.high.select);
        assert_eq!(eval.high.chosen, eval.high.branch1);
        assert_eq!(eval.high.chosen.packed(), 0b111);
    }

    #[test]
    fn test_csa4_low_quirk_ignores_true_carry() {
        // a=3, b=1: low 3+1 = 0b100 carries, low 3+1+1 = 0b101.
        let eval = csa4(U4::new(3), U4::new(1), LowSelect::Hardwired);
        assert_eq!(eval.low.branch0.packed(), 0b100);
        assert_eq!(eval.low.branch1.packed(), 0b101);
        // The chosen result is branch0 regardless of the real carry.
        assert_eq!(eval.low.chosen, eval.low.branch0);
        assert_eq!(eval.packed(), 4);
    }

    #[test]
    fn test_low_select_levels_are_constant_zero() {
        assert!(!LowSelect::Hardwired.level());
        assert!(!LowSelect::ForcedNet.level());
    }

    #[test]
    fn test_speculative_vectors_concatenate_blocks() {
        let eval = csa4(U4::new(0b0111), U4::new(0b0001), LowSelect::Hardwired);
        // cin=0 speculation: low 3+1=100, high 1+0=01.
        assert_eq!(eval.speculative_sum(false).value(), 0b0100);
        assert_eq!(eval.speculative_carry(false).value(), 0b01);
        // cin=1 speculation: low 3+1+1=101, high 1+0+1=10.
        assert_eq!(eval.speculative_sum(true).value(), 0b1001);
        assert_eq!(eval.speculative_carry(true).value(), 0b01);
    }
}
