//! ABI definitions and address book for the zk-rollup L1 contracts.

pub mod abi;

pub use constants::{AddressBook, MAINNET_ADDRESS_BOOK};
mod constants;
