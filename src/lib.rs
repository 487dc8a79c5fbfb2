// SPDX-License-Identifier: Apache-2.0

pub mod adder;
pub mod bits;
pub mod csa;
pub mod mux;
pub mod verify;
