//! Script byte containers and push-opcode framing
//!
//! # Examples
//!
//! Frame a signature and a public key as a signature script:
//!
//! ```rust
//! use txsign::script::Script;
//!
//! let items = vec![vec![0x30; 71], vec![0x02; 33]];
//! let script = Script::from_pushes(&items);
//! assert_eq!(script.0.len(), 1 + 71 + 1 + 33);
//! ```

use crate::script::op_codes::*;
use hex;
use std::fmt;

pub mod op_codes;
mod script_type;

pub use self::script_type::ScriptType;

/// Transaction script
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<u8>);

impl Script {
    /// Creates a new empty script
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Creates a script that pushes each item in order
    pub fn from_pushes(items: &[Vec<u8>]) -> Script {
        let mut script = Script(Vec::with_capacity(items.iter().map(|i| i.len() + 3).sum()));
        for item in items.iter() {
            script.append_data(item);
        }
        script
    }

    /// Appends a single opcode or data byte
    pub fn append(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Appends the opcodes and provided data that push it onto the stack
    pub fn append_data(&mut self, data: &[u8]) {
        let len = data.len();
        match len {
            0 => self.0.push(OP_0),
            1..=75 => self.0.push(OP_PUSH + len as u8),
            76..=255 => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(len as u8);
            }
            256..=65535 => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(len as u16).to_le_bytes());
            }
            _ => {
                self.0.push(OP_PUSHDATA4);
                self.0.extend_from_slice(&(len as u32).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
    }

    /// Returns true if the script holds no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}
