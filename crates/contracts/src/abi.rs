//! ABI definitions for the tracked events and the calls whose inputs are
//! recovered during decoding.

pub mod calls;
pub mod logs;
