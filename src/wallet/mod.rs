//! Private key sources for signing

mod key_source;

pub use self::key_source::{KeyChain, KeySource};
