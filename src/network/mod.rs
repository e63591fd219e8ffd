//! Network presets for signature hashing
//!
//! # Examples
//!
//! ```rust
//! use txsign::network::Network;
//!
//! let params = Network::BitcoinCash.sig_hash();
//! assert!(params.forked);
//! assert_eq!(params.value, 0x41);
//! ```

mod network;

pub use self::network::{Network, SigHashParams};
