#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}

/// Longest string payload the 16-bit signed length prefix can describe.
pub(crate) const MAX_STRING_LEN: usize = i16::MAX as usize;

/// Longest array or list the 32-bit signed length prefix can describe.
pub(crate) const MAX_SEQUENCE_LEN: usize = i32::MAX as usize;

/// Upper bound on speculative preallocation while decoding lists.
pub(crate) const LIST_PREALLOC_LIMIT: usize = 4096;
