use alloy_primitives::{address, Address};

/// The L1 addresses of the rollup contracts watched by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressBook {
    /// The address of the rollup contract.
    pub rollup: Address,
    /// The address of the global exit root contract.
    pub global_exit_root: Address,
}

/// The mainnet rollup contract addresses.
pub const MAINNET_ADDRESS_BOOK: AddressBook = AddressBook {
    rollup: address!("5132A183E9F3CB7C848b0AAC5Ae0c4f0491B7aB2"),
    global_exit_root: address!("580bda1e7A0CFAe92Fa7F6c20A3794F169CE3CFb"),
};
