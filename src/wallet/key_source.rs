use crate::util::{Error, Result};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::collections::HashMap;

/// Supplies the private key for a public key's derivation coordinates
///
/// Implementations are shared read-only between signing calls.
pub trait KeySource: Send + Sync {
    /// Returns the 32-byte private key at account / index on the external or change branch
    fn private_key(&self, account: u32, index: u32, external: bool) -> Result<[u8; 32]>;
}

/// In-memory key source keyed by derivation coordinates
#[derive(Default)]
pub struct KeyChain {
    keys: HashMap<(u32, u32, bool), [u8; 32]>,
}

impl KeyChain {
    /// Creates an empty key chain
    pub fn new() -> KeyChain {
        KeyChain {
            keys: HashMap::new(),
        }
    }

    /// Adds a private key and returns its compressed public key
    pub fn insert(
        &mut self,
        account: u32,
        index: u32,
        external: bool,
        private_key: [u8; 32],
    ) -> Result<[u8; 33]> {
        let secp = Secp256k1::signing_only();
        let secret_key = SecretKey::from_slice(&private_key)?;
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        self.keys.insert((account, index, external), private_key);
        Ok(public_key.serialize())
    }

    /// Returns the number of keys held
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether no keys are held
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeySource for KeyChain {
    fn private_key(&self, account: u32, index: u32, external: bool) -> Result<[u8; 32]> {
        match self.keys.get(&(account, index, external)) {
            Some(key) => Ok(*key),
            None => {
                let branch = if external { 0 } else { 1 };
                let msg = format!("No key at {}'/{}/{}", account, branch, index);
                Err(Error::BadArgument(msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex;

    #[test]
    fn insert_and_lookup() {
        let mut chain = KeyChain::new();
        assert!(chain.is_empty());
        let public_key = chain.insert(0, 5, true, [1; 32]).unwrap();
        assert!(chain.len() == 1);
        assert!(!chain.is_empty());
        assert!(public_key[0] == 2 || public_key[0] == 3);
        assert!(chain.private_key(0, 5, true).unwrap() == [1; 32]);
        assert!(chain.private_key(0, 5, false).is_err());
        assert!(chain.private_key(1, 5, true).is_err());
    }

    #[test]
    fn generator_point() {
        let mut key = [0; 32];
        key[31] = 1;
        let mut chain = KeyChain::new();
        let public_key = chain.insert(0, 0, true, key).unwrap();
        let g = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        assert!(hex::encode(&public_key[..]) == g);
    }

    #[test]
    fn invalid_key() {
        let mut chain = KeyChain::new();
        assert!(chain.insert(0, 0, true, [0; 32]).is_err());
        assert!(chain.is_empty());
    }
}
