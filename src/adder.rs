// SPDX-License-Identifier: Apache-2.0

//! The 1-bit and 2-bit adder primitives the carry-select blocks build on.

use crate::bits::U2;

/// Result of a 1-bit full add. Satisfies `sum + 2*carry == a + b + cin`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct FullAdd {
    pub sum: bool,
    pub carry: bool,
}

/// Adds two operand bits and a carry-in.
pub fn full_add(a: bool, b: bool, cin: bool) -> FullAdd {
    // The truth table for an adder bit is:
    //
    //  a b c | sum cout
    // --------
    //  0 0 0 | 0   0
    //  0 0 1 | 1   0
    //  0 1 0 | 1   0
    //  0 1 1 | 0   1
    //  1 0 0 | 1   0
    //  1 0 1 | 0   1
    //  1 1 0 | 0   1
    //  1 1 1 | 1   1
    //
    // sum = a ^ b ^ c_in
    // cout = (a & b) | (b & c_in) | (a & c_in)
    FullAdd {
        sum: a ^ b ^ cin,
        carry: (a && b) || (b && cin) || (a && cin),
    }
}

/// Result of a 2-bit ripple add. Satisfies `sum + 4*carry == a + b + cin`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct RippleAdd2 {
    pub sum: U2,
    pub carry: bool,
}

impl RippleAdd2 {
    /// Packs carry and sum into one small integer with the carry at weight 4,
    /// i.e. the 3-bit value `{carry, sum[1], sum[0]}`.
    pub fn packed(&self) -> u8 {
        self.sum.value() | (self.carry as u8) << 2
    }
}

/// Chains two full adders: bit 0 first, its carry rippling into bit 1.
pub fn ripple_add2(a: U2, b: U2, cin: bool) -> RippleAdd2 {
    let bit0 = full_add(a.get_lsb(0), b.get_lsb(0), cin);
    let bit1 = full_add(a.get_lsb(1), b.get_lsb(1), bit0.carry);
    RippleAdd2 {
        sum: U2::new(bit0.sum as u8 | (bit1.sum as u8) << 1),
        carry: bit1.carry,
    }
}
