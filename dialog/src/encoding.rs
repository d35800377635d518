//! String encodings accepted by the native library.
//!
//! NFD exposes every entry point twice: a `U8` flavor taking UTF-8 and an `N`
//! flavor taking the platform character type, which is UTF-16 on Windows.
//! [`NativeText`] is the strategy the shim is generic over; [`PlatformText`]
//! picks the one to use for the current target.

use std::fmt;
use std::ptr::{self, NonNull};
use std::slice;

use crate::DialogError;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Utf8 {}
    impl Sealed for super::Utf16 {}
}

/// Encoding tag, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// NUL-terminated UTF-8 (`U8` entry points).
    Utf8,
    /// NUL-terminated UTF-16 (`N` entry points on Windows).
    Utf16,
}

impl Encoding {
    /// The encoding [`PlatformText`] resolves to on this target.
    #[must_use]
    pub const fn native() -> Self {
        <PlatformText as NativeText>::ENCODING
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => f.write_str("UTF-8"),
            Self::Utf16 => f.write_str("UTF-16"),
        }
    }
}

/// A NUL-terminated string encoding understood by the native library.
///
/// Sealed: the two implementations are [`Utf8`] and [`Utf16`].
pub trait NativeText: sealed::Sealed + Copy + fmt::Debug + 'static {
    /// Code unit of the encoding.
    type Unit: Copy + Eq + fmt::Debug + 'static;

    /// Terminator.
    const NUL: Self::Unit;

    /// Tag for this encoding.
    const ENCODING: Encoding;

    /// Encode `text` followed by a terminator.
    ///
    /// # Errors
    /// Returns [`DialogError::Encoding`] if `text` contains an interior NUL.
    fn encode(text: &str) -> Result<Vec<Self::Unit>, DialogError>;

    /// Decode code units without a terminator.
    ///
    /// # Errors
    /// Returns [`DialogError::Encoding`] if the units are not a valid sequence.
    fn decode_units(units: &[Self::Unit]) -> Result<String, DialogError>;

    /// Number of units before the terminator.
    ///
    /// # Safety
    /// `ptr` must point to a readable, NUL-terminated sequence of units.
    unsafe fn len(ptr: *const Self::Unit) -> usize {
        let mut len = 0;
        // SAFETY: the caller guarantees a terminator before the end of the
        // allocation, so every offset up to it is in bounds.
        while unsafe { *ptr.add(len) } != Self::NUL {
            len += 1;
        }
        len
    }

    /// Decode a NUL-terminated string.
    ///
    /// # Safety
    /// Same as [`NativeText::len`].
    ///
    /// # Errors
    /// Returns [`DialogError::Encoding`] if the string is not a valid sequence.
    unsafe fn decode(ptr: *const Self::Unit) -> Result<String, DialogError> {
        // SAFETY: forwarded from the caller.
        let len = unsafe { Self::len(ptr) };
        // SAFETY: the `len` units before the terminator are readable.
        let units = unsafe { slice::from_raw_parts(ptr, len) };
        Self::decode_units(units)
    }

    /// Encode `text` into a heap string that can be handed to native code.
    ///
    /// Must be released with [`NativeText::release`].
    ///
    /// # Errors
    /// Same as [`NativeText::encode`].
    fn alloc(text: &str) -> Result<NonNull<Self::Unit>, DialogError> {
        let boxed = Self::encode(text)?.into_boxed_slice();
        Ok(NonNull::from(Box::leak(boxed)).cast())
    }

    /// Free a string produced by [`NativeText::alloc`].
    ///
    /// # Safety
    /// `ptr` must come from [`NativeText::alloc`] of the same encoding and
    /// must not be used afterwards.
    unsafe fn release(ptr: NonNull<Self::Unit>) {
        // SAFETY: `alloc` never emits interior terminators, so the scanned
        // length plus one is the length of the original boxed slice.
        unsafe {
            let len = Self::len(ptr.as_ptr()) + 1;
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len)));
        }
    }
}

/// UTF-8 strings for the `U8` entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8;

impl NativeText for Utf8 {
    type Unit = u8;
    const NUL: u8 = 0;
    const ENCODING: Encoding = Encoding::Utf8;

    fn encode(text: &str) -> Result<Vec<u8>, DialogError> {
        let mut units = Vec::with_capacity(text.len() + 1);
        units.extend_from_slice(text.as_bytes());
        if units.contains(&0) {
            return Err(DialogError::encoding(Encoding::Utf8, "interior NUL"));
        }
        units.push(0);
        Ok(units)
    }

    fn decode_units(units: &[u8]) -> Result<String, DialogError> {
        std::str::from_utf8(units)
            .map(str::to_owned)
            .map_err(|e| DialogError::encoding(Encoding::Utf8, e.to_string()))
    }
}

/// UTF-16 strings for the `N` entry points on Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf16;

impl NativeText for Utf16 {
    type Unit = u16;
    const NUL: u16 = 0;
    const ENCODING: Encoding = Encoding::Utf16;

    fn encode(text: &str) -> Result<Vec<u16>, DialogError> {
        if text.contains('\0') {
            return Err(DialogError::encoding(Encoding::Utf16, "interior NUL"));
        }
        Ok(text.encode_utf16().chain(std::iter::once(0)).collect())
    }

    fn decode_units(units: &[u16]) -> Result<String, DialogError> {
        String::from_utf16(units).map_err(|e| DialogError::encoding(Encoding::Utf16, e.to_string()))
    }
}

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        /// Encoding of the native entry points on this target.
        pub type PlatformText = Utf16;
    } else {
        /// Encoding of the native entry points on this target.
        pub type PlatformText = Utf8;
    }
}
