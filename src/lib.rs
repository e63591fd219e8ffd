//! Sign the inputs of Bitcoin-family transactions using Rust.
//!
//! Legacy, segwit v0 and taproot key-path inputs are supported. Signatures can be made with
//! keys held in memory or by an external signer that only ever sees the digest.

extern crate byteorder;
extern crate digest;
extern crate hex;
#[macro_use]
extern crate log;
extern crate ring;
extern crate ripemd160;
extern crate secp256k1;

pub mod messages;
pub mod network;
pub mod script;
pub mod transaction;
pub mod util;
pub mod wallet;
