use std::borrow::Cow;

use crate::{Error, Result, cold_path};

/// How string payloads and names are encoded on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum StringEncoding {
    /// Standard UTF-8. Invalid input fails with [`Error::InvalidString`].
    #[default]
    Utf8,
    /// Java's modified UTF-8 (CESU-8 with an overlong NUL), as written by the
    /// Java edition. Invalid sequences decode to U+FFFD.
    Mutf8,
}

impl StringEncoding {
    pub(crate) fn decode(self, bytes: Vec<u8>) -> Result<String> {
        match self {
            StringEncoding::Utf8 => String::from_utf8(bytes).map_err(|_| {
                cold_path();
                Error::InvalidString
            }),
            StringEncoding::Mutf8 => Ok(simd_cesu8::mutf8::decode_lossy(&bytes).into_owned()),
        }
    }

    pub(crate) fn encode(self, value: &str) -> Cow<'_, [u8]> {
        match self {
            StringEncoding::Utf8 => Cow::Borrowed(value.as_bytes()),
            StringEncoding::Mutf8 => simd_cesu8::mutf8::encode(value),
        }
    }
}

/// Options shared by the reader and the writer.
///
/// ```
/// use nbt_schema::{Config, StringEncoding};
///
/// let config = Config {
///     string_encoding: StringEncoding::Mutf8,
///     ..Config::default()
/// };
/// assert_eq!(config.max_depth, 512);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub string_encoding: StringEncoding,
    /// Deepest nesting of lists and compounds accepted below the root.
    pub max_depth: usize,
}

impl Config {
    pub const DEFAULT_MAX_DEPTH: usize = 512;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            string_encoding: StringEncoding::Utf8,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
