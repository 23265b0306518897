//! Error types for NBT reading, writing and tree manipulation.
//!
//! This module contains the [`Error`] type which represents every failure the
//! codec and the value model can report. Schema verification failures are a
//! separate, non-fatal type: see [`VerifyError`](crate::VerifyError).
//!
//! # Example
//!
//! ```
//! use nbt_schema::{Error, NbtTree, Result};
//!
//! fn try_parse(data: &[u8]) -> Result<()> {
//!     match NbtTree::from_slice(data) {
//!         Ok(tree) => {
//!             println!("root {:?} has {} entries", tree.name, tree.root.len());
//!             Ok(())
//!         }
//!         Err(Error::UnexpectedEndOfStream) => {
//!             println!("data was truncated");
//!             Err(Error::UnexpectedEndOfStream)
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//!
//! assert!(try_parse(&[0x0A, 0x00]).is_err());
//! ```

use std::fmt::{self, Display};

use crate::TagID;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when reading,
/// writing or manipulating NBT trees.
///
/// Codec errors abort the whole read or write; no partial tree is ever
/// returned.
#[derive(Debug)]
pub enum Error {
    /// A custom message raised through serde.
    Message(String),

    /// An I/O error other than a premature end of input.
    IO(std::io::Error),

    /// The input ended in the middle of a value.
    UnexpectedEndOfStream,

    /// A string, array or list length prefix was negative.
    ///
    /// Nothing after the prefix is consumed.
    NegativeLength(i32),

    /// A tag id byte outside the known range was found.
    UnknownTagKind(u8),

    /// The outermost tag was not a compound. Holds the id byte found.
    InvalidRoot(u8),

    /// A list declared `End` elements but a non-zero count.
    UntypedList(i32),

    /// String bytes were not valid text in the configured encoding.
    InvalidString,

    /// Bytes remain after the root compound was fully read.
    TrailingData(usize),

    /// Nesting of lists and compounds exceeded the configured limit.
    DepthLimitExceeded(usize),

    /// A string is too long for its 16-bit length prefix.
    StringTooLong(usize),

    /// An array or list is too long for its 32-bit length prefix.
    LengthTooLong(usize),

    /// A value of one tag type was used where another was required.
    TypeMismatch { expected: TagID, actual: TagID },

    /// A strict insert found the key already present.
    DuplicateKey(String),
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::UnexpectedEndOfStream => formatter.write_str("unexpected end of input"),
            Error::NegativeLength(len) => {
                formatter.write_str(&format!("negative length prefix: {len}"))
            }
            Error::UnknownTagKind(tag) => {
                formatter.write_str(&format!("invalid NBT tag type: {tag:#04x}"))
            }
            Error::InvalidRoot(tag) => formatter.write_str(&format!(
                "root tag must be a compound, found tag type {tag:#04x}"
            )),
            Error::UntypedList(len) => {
                formatter.write_str(&format!("list of TAG_End declares {len} elements"))
            }
            Error::InvalidString => formatter.write_str("string is not valid in the configured encoding"),
            Error::TrailingData(remaining_bytes) => formatter.write_str(&format!(
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            )),
            Error::DepthLimitExceeded(depth) => {
                formatter.write_str(&format!("nesting depth exceeds limit of {depth}"))
            }
            Error::StringTooLong(len) => {
                formatter.write_str(&format!("string too long: {len} bytes"))
            }
            Error::LengthTooLong(len) => formatter.write_str(&format!("sequence too long: {len}")),
            Error::TypeMismatch { expected, actual } => formatter.write_str(&format!(
                "tag type mismatch: expected {expected}, got {actual}"
            )),
            Error::DuplicateKey(key) => {
                formatter.write_str(&format!("compound already contains key {key:?}"))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEndOfStream
        } else {
            Error::IO(error)
        }
    }
}
