//! Opcodes needed to build the standard lock and unlock scripts

/// Pushes an empty array onto the stack; also the witness version 0 marker
pub const OP_0: u8 = 0;
/// Offset for the opcodes that push the next N bytes onto the stack
pub const OP_PUSH: u8 = 0;
/// The next byte is the number of bytes to push onto the stack
pub const OP_PUSHDATA1: u8 = 76;
/// The next two bytes are the number of bytes to push onto the stack
pub const OP_PUSHDATA2: u8 = 77;
/// The next four bytes are the number of bytes to push onto the stack
pub const OP_PUSHDATA4: u8 = 78;
/// Pushes the number 1 onto the stack; also the witness version 1 marker
pub const OP_1: u8 = 81;
/// Duplicates the top stack item
pub const OP_DUP: u8 = 118;
/// Returns 1 if the inputs are exactly equal, 0 otherwise
pub const OP_EQUAL: u8 = 135;
/// Same as OP_EQUAL, but runs OP_VERIFY afterward
pub const OP_EQUALVERIFY: u8 = 136;
/// The input is hashed twice: first with SHA-256 and then with RIPEMD-160
pub const OP_HASH160: u8 = 169;
/// Verifies a signature against the transaction digest and a public key
pub const OP_CHECKSIG: u8 = 172;
/// Fails the script unless the lock time has passed
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 177;
/// Removes the top stack item
pub const OP_DROP: u8 = 117;
