//! Witness v0 key-hash scripts, native and nested in P2SH

use crate::script::op_codes::OP_0;
use crate::script::Script;
use crate::transaction::p2sh;
use crate::util::{hash160, Hash160};

/// Creates the version 0 witness program for a public key hash
///
/// The program is also the native P2WPKH lock script.
pub fn witness_program(pubkey_hash: &Hash160) -> Script {
    let mut script = Script::new();
    script.append(OP_0);
    script.append_data(&pubkey_hash.0);
    script
}

/// Creates the P2SH lock script that wraps a P2WPKH witness program
pub fn create_nested_lock_script(pubkey_hash: &Hash160) -> Script {
    p2sh::create_lock_script(&hash160(&witness_program(pubkey_hash).0))
}

/// Creates the unlock script of a nested P2WPKH input: a single push of the witness program
pub fn create_nested_unlock_script(pubkey_hash: &Hash160) -> Script {
    let mut script = Script::new();
    script.append_data(&witness_program(pubkey_hash).0);
    script
}
