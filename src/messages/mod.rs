//! Transaction wire types
//!
//! # Examples
//!
//! Construct and serialize a transaction:
//!
//! ```rust
//! use txsign::messages::{OutPoint, Tx, TxIn, TxOut};
//! use txsign::script::Script;
//! use txsign::util::{Amount, Hash256, Serializable};
//!
//! let tx = Tx {
//!     version: 2,
//!     inputs: vec![TxIn {
//!         prev_output: OutPoint {
//!             hash: Hash256([0; 32]),
//!             index: 0,
//!         },
//!         unlock_script: Script(vec![]),
//!         sequence: 0xffffffff,
//!         witness: vec![],
//!     }],
//!     outputs: vec![TxOut {
//!         amount: Amount(1000),
//!         lock_script: Script(vec![]),
//!     }],
//!     lock_time: 0,
//! };
//!
//! let mut bytes = Vec::new();
//! tx.write(&mut bytes).unwrap();
//! assert_eq!(bytes.len(), tx.size());
//! ```

mod out_point;
mod tx;
mod tx_in;
mod tx_out;

pub use self::out_point::OutPoint;
pub use self::tx::Tx;
pub use self::tx_in::{TxIn, SEQUENCE_FINAL};
pub use self::tx_out::TxOut;
