use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory registry of the signers authorized to submit sequencing
/// transactions, keyed by address.
#[derive(Debug, Default)]
pub struct AuthRegistry {
    signers: RwLock<HashMap<Address, PrivateKeySigner>>,
}

impl AuthRegistry {
    /// Returns a new empty [`AuthRegistry`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the signer under its address, replacing any signer
    /// previously registered for the same address.
    pub fn add_or_replace_signer(&self, signer: PrivateKeySigner) {
        let address = signer.address();
        tracing::debug!(target: "zkrollup::sequencer", %address, "registering signer");
        self.signers.write().insert(address, signer);
    }

    /// Returns the signer registered for the address, if any.
    pub fn signer(&self, address: Address) -> Option<PrivateKeySigner> {
        self.signers.read().get(&address).cloned()
    }

    /// Returns true when no signer is registered.
    pub fn is_empty(&self) -> bool {
        self.signers.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_signer::Signer;

    #[test]
    fn test_should_register_and_return_signer() {
        let registry = AuthRegistry::new();
        assert!(registry.is_empty());

        let signer = PrivateKeySigner::random();
        let address = signer.address();
        registry.add_or_replace_signer(signer);

        assert_eq!(registry.signer(address).map(|s| s.address()), Some(address));
        assert!(registry.signer(Address::ZERO).is_none());
    }

    #[test]
    fn test_should_replace_signer_for_same_address() {
        let registry = AuthRegistry::new();
        let signer = PrivateKeySigner::random();
        let address = signer.address();

        registry.add_or_replace_signer(signer.clone().with_chain_id(Some(1)));
        registry.add_or_replace_signer(signer.with_chain_id(Some(5)));

        // last registration wins.
        assert_eq!(registry.signer(address).and_then(|s| s.chain_id()), Some(5));
    }
}
