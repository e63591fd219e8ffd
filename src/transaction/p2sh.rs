//! Pay-to-script-hash transaction scripts

use crate::script::op_codes::{OP_EQUAL, OP_HASH160};
use crate::script::Script;
use crate::util::{hash160, Hash160};

/// Creates the lock script that pays to the hash of a redeem script
pub fn create_lock_script(script_hash: &Hash160) -> Script {
    let mut script = Script::new();
    script.append(OP_HASH160);
    script.append_data(&script_hash.0);
    script.append(OP_EQUAL);
    script
}

/// Creates the lock script for a redeem script
pub fn create_lock_script_for(redeem_script: &Script) -> Script {
    create_lock_script(&hash160(&redeem_script.0))
}

/// Creates the standard unlock script: each signing item pushed, then the redeem script
pub fn create_unlock_script(items: &[Vec<u8>], redeem_script: &Script) -> Script {
    let mut unlock_script = Script::from_pushes(items);
    unlock_script.append_data(&redeem_script.0);
    unlock_script
}
