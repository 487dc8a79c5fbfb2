// SPDX-License-Identifier: Apache-2.0

//! 2:1 selectors, single-bit and per-lane over 2-bit operands.

use crate::bits::U2;

/// 2:1 mux over single bits.
pub fn mux2(selector: bool, on_true: bool, on_false: bool) -> bool {
    if selector {
        on_true
    } else {
        on_false
    }
}

/// Applies `mux2` lane-by-lane across 2-bit operands.
pub fn mux2_u2(selector: bool, on_true: U2, on_false: U2) -> U2 {
    let mut value = 0u8;
    for lane in 0..2 {
        let bit = mux2(selector, on_true.get_lsb(lane), on_false.get_lsb(lane));
        value |= (bit as u8) << lane;
    }
    U2::new(value)
}
