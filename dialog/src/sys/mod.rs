//! The native backend seam.
//!
//! [`NativeBackend`] and [`NativeDialogs`] mirror the C entry points of
//! nativefiledialog-extended one to one, down to the raw pointers and result
//! codes, so that all marshaling stays in this crate and can be exercised
//! against a fake. [`Nfd`] is the real library, available with the `native`
//! feature.

use std::ffi::c_char;
use std::marker::PhantomData;
use std::ptr::NonNull;

pub use nfdkit_sys::{nfdfiltersize_t, nfdpathset_t, nfdpathsetsize_t, nfdresult_t};

use crate::DialogError;
use crate::encoding::NativeText;

#[cfg(feature = "native")]
mod nfd;
#[cfg(feature = "native")]
pub use nfd::Nfd;

/// Decoded native result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NfdResult {
    /// The call failed and left a message in the native error state.
    Error,
    /// The user confirmed a selection.
    Okay,
    /// The user dismissed the dialog.
    Cancel,
}

impl NfdResult {
    /// Decode a raw result code.
    ///
    /// # Errors
    /// Returns [`DialogError::UnexpectedResult`] for codes the library does not define.
    pub fn from_raw(code: nfdresult_t) -> Result<Self, DialogError> {
        match code {
            nfdkit_sys::NFD_ERROR => Ok(Self::Error),
            nfdkit_sys::NFD_OKAY => Ok(Self::Okay),
            nfdkit_sys::NFD_CANCEL => Ok(Self::Cancel),
            other => Err(DialogError::UnexpectedResult(other)),
        }
    }

    /// The raw code, as a backend returns it.
    #[must_use]
    pub const fn into_raw(self) -> nfdresult_t {
        match self {
            Self::Error => nfdkit_sys::NFD_ERROR,
            Self::Okay => nfdkit_sys::NFD_OKAY,
            Self::Cancel => nfdkit_sys::NFD_CANCEL,
        }
    }
}

/// Filter item in encoding `E`. Layout-compatible with `nfdu8filteritem_t`
/// and `nfdnfilteritem_t`.
#[repr(C)]
#[derive(Debug)]
pub struct RawFilter<E: NativeText> {
    /// Display name.
    pub name: *const E::Unit,
    /// Comma separated extensions.
    pub spec: *const E::Unit,
    _encoding: PhantomData<E>,
}

impl<E: NativeText> RawFilter<E> {
    pub(crate) const fn new(name: *const E::Unit, spec: *const E::Unit) -> Self {
        Self {
            name,
            spec,
            _encoding: PhantomData,
        }
    }
}

/// Entry points that do not depend on the string encoding.
///
/// # Safety
/// Implementors stand in for the C library. [`NativeBackend::get_error`] must
/// return null or a NUL-terminated string that stays valid until the next
/// [`NativeBackend::clear_error`]. A path-set written by a successful dialog
/// call must stay valid until it is passed to [`NativeBackend::path_set_free`].
pub unsafe trait NativeBackend {
    /// `NFD_Init`.
    fn init(&self) -> nfdresult_t;

    /// `NFD_Quit`.
    fn quit(&self);

    /// `NFD_GetError`.
    fn get_error(&self) -> *const c_char;

    /// `NFD_ClearError`.
    fn clear_error(&self);

    /// `NFD_PathSet_GetCount`.
    ///
    /// # Safety
    /// `path_set` must be a live path-set and `count` writable.
    unsafe fn path_set_get_count(
        &self,
        path_set: *const nfdpathset_t,
        count: *mut nfdpathsetsize_t,
    ) -> nfdresult_t;

    /// `NFD_PathSet_Free`.
    ///
    /// # Safety
    /// `path_set` must be a live path-set; it is dangling afterwards.
    unsafe fn path_set_free(&self, path_set: *const nfdpathset_t);
}

/// Dialog entry points taking strings in encoding `E`.
///
/// # Safety
/// On [`NfdResult::Okay`], every `out_*` pointer must have been set to a
/// NUL-terminated string (or path-set) owned by the backend that stays valid
/// until passed to the matching free function. Input strings and filter
/// lists must not be retained past the call.
pub unsafe trait NativeDialogs<E: NativeText>: NativeBackend {
    /// `NFD_OpenDialog{U8,N}`.
    ///
    /// # Safety
    /// `out_path` must be writable; `filters` must point to `count` items whose
    /// strings are NUL-terminated; `default_path` must be null or NUL-terminated.
    unsafe fn open_dialog(
        &self,
        out_path: *mut *mut E::Unit,
        filters: *const RawFilter<E>,
        count: nfdfiltersize_t,
        default_path: *const E::Unit,
    ) -> nfdresult_t;

    /// `NFD_OpenDialogMultiple{U8,N}`.
    ///
    /// # Safety
    /// As [`NativeDialogs::open_dialog`].
    unsafe fn open_dialog_multiple(
        &self,
        out_paths: *mut *const nfdpathset_t,
        filters: *const RawFilter<E>,
        count: nfdfiltersize_t,
        default_path: *const E::Unit,
    ) -> nfdresult_t;

    /// `NFD_SaveDialog{U8,N}`.
    ///
    /// # Safety
    /// As [`NativeDialogs::open_dialog`]; `default_name` must be null or NUL-terminated.
    unsafe fn save_dialog(
        &self,
        out_path: *mut *mut E::Unit,
        filters: *const RawFilter<E>,
        count: nfdfiltersize_t,
        default_path: *const E::Unit,
        default_name: *const E::Unit,
    ) -> nfdresult_t;

    /// `NFD_PickFolder{U8,N}`.
    ///
    /// # Safety
    /// `out_path` must be writable; `default_path` must be null or NUL-terminated.
    unsafe fn pick_folder(
        &self,
        out_path: *mut *mut E::Unit,
        default_path: *const E::Unit,
    ) -> nfdresult_t;

    /// `NFD_FreePath{U8,N}`.
    ///
    /// # Safety
    /// `path` must come from a dialog call on this backend.
    unsafe fn free_path(&self, path: *mut E::Unit);

    /// `NFD_PathSet_GetPath{U8,N}`.
    ///
    /// # Safety
    /// `path_set` must be live, `index` below its count, `out_path` writable.
    unsafe fn path_set_get_path(
        &self,
        path_set: *const nfdpathset_t,
        index: nfdpathsetsize_t,
        out_path: *mut *mut E::Unit,
    ) -> nfdresult_t;

    /// `NFD_PathSet_FreePath{U8,N}`.
    ///
    /// # Safety
    /// `path` must come from [`NativeDialogs::path_set_get_path`].
    unsafe fn path_set_free_path(&self, path: *const E::Unit);

    /// Allocate a marshaled argument string, such as a filter name or spec.
    ///
    /// # Errors
    /// Returns [`DialogError::Encoding`] if `text` cannot be encoded.
    fn alloc_string(&self, text: &str) -> Result<NonNull<E::Unit>, DialogError> {
        E::alloc(text)
    }

    /// Release a string from [`NativeDialogs::alloc_string`].
    ///
    /// # Safety
    /// `ptr` must come from `alloc_string` on this backend and not be reused.
    unsafe fn free_string(&self, ptr: NonNull<E::Unit>) {
        // SAFETY: forwarded from the caller; the default `alloc_string` uses `E::alloc`.
        unsafe { E::release(ptr) }
    }
}
