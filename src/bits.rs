// SPDX-License-Identifier: Apache-2.0

//! Fixed-width unsigned values used throughout the adder model.
//!
//! Index 0 is the least significant bit everywhere in this crate.

/// A 2-bit unsigned value, 0..=3.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct U2(u8);

impl U2 {
    pub const MAX: u8 = 0b11;

    pub fn new(value: u8) -> Self {
        assert!(
            value <= Self::MAX,
            "value {} does not fit in a 2-bit unsigned",
            value
        );
        U2(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the bit at `index` where 0 is the least significant bit.
    pub fn get_lsb(&self, index: usize) -> bool {
        assert!(
            index < 2,
            "index {} is out of bounds for a 2-bit value",
            index
        );
        (self.0 >> index) & 1 == 1
    }
}

impl TryFrom<u8> for U2 {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            Err(format!(
                "expected a value representable in 2 bits, got {}",
                value
            ))
        } else {
            Ok(U2(value))
        }
    }
}

/// A 4-bit unsigned value (nibble), 0..=15.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct U4(u8);

impl U4 {
    pub const MAX: u8 = 0b1111;

    pub fn new(value: u8) -> Self {
        assert!(
            value <= Self::MAX,
            "value {} does not fit in a 4-bit unsigned",
            value
        );
        U4(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// The low 2-bit slice, bits [1:0].
    pub fn lo2(&self) -> U2 {
        U2::new(self.0 & U2::MAX)
    }

    /// The high 2-bit slice, bits [3:2].
    pub fn hi2(&self) -> U2 {
        U2::new(self.0 >> 2)
    }

    /// Concatenates two 2-bit slices, `msbs` landing in bits [3:2].
    pub fn concat(msbs: U2, lsbs: U2) -> Self {
        U4::new(msbs.value() << 2 | lsbs.value())
    }
}

impl TryFrom<u8> for U4 {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            Err(format!(
                "expected a value representable in 4 bits, got {}",
                value
            ))
        } else {
            Ok(U4(value))
        }
    }
}
