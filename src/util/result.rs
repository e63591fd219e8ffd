use hex::FromHexError;
use secp256k1;
use std;
use std::io;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// An argument provided is invalid
    BadArgument(String),
    /// The data given is not valid
    BadData(String),
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// Standard library IO error
    IOError(io::Error),
    /// No private key could be derived for the input's public key
    NoPrivateKey,
    /// The input index does not refer to an input of the transaction
    NoPreviousOutput,
    /// The previous output carries no public key to sign for
    NoPreviousOutputAddress,
    /// A pay-to-script-hash input has neither a redeem script nor an unlock script builder
    NoRedeemScript,
    /// The previous output's script type cannot be signed
    NotSupportedScriptType,
    /// Error in the Secp256k1 library
    Secp256k1Error(secp256k1::Error),
    /// The builder already holds a transaction with the same identifier
    TransactionAlreadyExists,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => f.write_str(&format!("Bad argument: {}", s)),
            Error::BadData(s) => f.write_str(&format!("Bad data: {}", s)),
            Error::FromHexError(e) => f.write_str(&format!("Hex decoding error: {}", e)),
            Error::IOError(e) => f.write_str(&format!("IO error: {}", e)),
            Error::NoPrivateKey => f.write_str("No private key"),
            Error::NoPreviousOutput => f.write_str("No previous output"),
            Error::NoPreviousOutputAddress => f.write_str("No previous output address"),
            Error::NoRedeemScript => f.write_str("No redeem script"),
            Error::NotSupportedScriptType => f.write_str("Script type not supported"),
            Error::Secp256k1Error(e) => f.write_str(&format!("Secp256k1 error: {}", e)),
            Error::TransactionAlreadyExists => f.write_str("Transaction already exists"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FromHexError(e) => Some(e),
            Error::IOError(e) => Some(e),
            Error::Secp256k1Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IOError(e)
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;
