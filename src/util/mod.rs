//! Hashing, encoding and error helpers

mod amount;
mod hash160;
mod hash256;
mod result;
mod serdes;
pub(crate) mod var_int;

pub use self::amount::Amount;
pub use self::hash160::{hash160, Hash160};
pub use self::hash256::{sha256, sha256d, tagged_hash, Hash256};
pub use self::result::{Error, Result};
pub use self::serdes::{read_var_bytes, write_var_bytes, Serializable};
