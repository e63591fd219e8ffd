use crate::transaction::sighash::{SIGHASH_ALL, SIGHASH_FORKID};

/// Signature hash domain parameters of a network
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct SigHashParams {
    /// Sighash type appended to ECDSA signatures and committed to by the digest
    pub value: u8,
    /// Whether every non-witness spend uses the BIP-143 style digest with a fork id
    pub forked: bool,
}

impl SigHashParams {
    /// SIGHASH_ALL with the legacy digest for non-witness spends
    pub const fn standard() -> SigHashParams {
        SigHashParams {
            value: SIGHASH_ALL,
            forked: false,
        }
    }

    /// SIGHASH_ALL | SIGHASH_FORKID with the forked digest for every spend
    pub const fn forked() -> SigHashParams {
        SigHashParams {
            value: SIGHASH_ALL | SIGHASH_FORKID,
            forked: true,
        }
    }
}

impl Default for SigHashParams {
    fn default() -> SigHashParams {
        SigHashParams::standard()
    }
}

/// Network type
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Network {
    Mainnet = 0,
    Testnet = 1,
    Regtest = 2,
    BitcoinCash = 3,
    BitcoinSv = 4,
}

impl Network {
    /// Returns the signature hash parameters used when signing on this network
    pub fn sig_hash(&self) -> SigHashParams {
        match self {
            Network::Mainnet | Network::Testnet | Network::Regtest => SigHashParams::standard(),
            Network::BitcoinCash | Network::BitcoinSv => SigHashParams::forked(),
        }
    }
}
