//! Cryptographic primitives for the airdrop catalog service.
//! Everything here is pure: no I/O, no clocks, no shared state.

pub mod hex;
pub mod personal_sign;
