//! The linked nativefiledialog-extended library.

use std::ffi::c_char;

use nfdkit_sys as ffi;
use nfdkit_sys::{nfdfiltersize_t, nfdpathset_t, nfdpathsetsize_t, nfdresult_t};

use super::{NativeBackend, NativeDialogs, RawFilter};
use crate::encoding::Utf8;
#[cfg(windows)]
use crate::encoding::Utf16;

/// Backend calling into `libnfd`.
///
/// Each dialog operation brackets the call with its own `NFD_Init` /
/// `NFD_Quit`; nothing is kept between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nfd;

// SAFETY: forwards to the C library, which upholds the documented contract.
unsafe impl NativeBackend for Nfd {
    fn init(&self) -> nfdresult_t {
        // SAFETY: no preconditions.
        unsafe { ffi::NFD_Init() }
    }

    fn quit(&self) {
        // SAFETY: only called by the session guard after a successful init.
        unsafe { ffi::NFD_Quit() }
    }

    fn get_error(&self) -> *const c_char {
        // SAFETY: no preconditions; the result is owned by the library.
        unsafe { ffi::NFD_GetError() }
    }

    fn clear_error(&self) {
        // SAFETY: no preconditions.
        unsafe { ffi::NFD_ClearError() }
    }

    unsafe fn path_set_get_count(
        &self,
        path_set: *const nfdpathset_t,
        count: *mut nfdpathsetsize_t,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PathSet_GetCount(path_set, count) }
    }

    unsafe fn path_set_free(&self, path_set: *const nfdpathset_t) {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PathSet_Free(path_set) }
    }
}

// SAFETY: `RawFilter<Utf8>` is layout-compatible with `nfdu8filteritem_t` and
// `u8` with `nfdu8char_t`.
unsafe impl NativeDialogs<Utf8> for Nfd {
    unsafe fn open_dialog(
        &self,
        out_path: *mut *mut u8,
        filters: *const RawFilter<Utf8>,
        count: nfdfiltersize_t,
        default_path: *const u8,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe {
            ffi::NFD_OpenDialogU8(
                out_path.cast(),
                filters.cast(),
                count,
                default_path.cast(),
            )
        }
    }

    unsafe fn open_dialog_multiple(
        &self,
        out_paths: *mut *const nfdpathset_t,
        filters: *const RawFilter<Utf8>,
        count: nfdfiltersize_t,
        default_path: *const u8,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe {
            ffi::NFD_OpenDialogMultipleU8(out_paths, filters.cast(), count, default_path.cast())
        }
    }

    unsafe fn save_dialog(
        &self,
        out_path: *mut *mut u8,
        filters: *const RawFilter<Utf8>,
        count: nfdfiltersize_t,
        default_path: *const u8,
        default_name: *const u8,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe {
            ffi::NFD_SaveDialogU8(
                out_path.cast(),
                filters.cast(),
                count,
                default_path.cast(),
                default_name.cast(),
            )
        }
    }

    unsafe fn pick_folder(&self, out_path: *mut *mut u8, default_path: *const u8) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PickFolderU8(out_path.cast(), default_path.cast()) }
    }

    unsafe fn free_path(&self, path: *mut u8) {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_FreePathU8(path.cast()) }
    }

    unsafe fn path_set_get_path(
        &self,
        path_set: *const nfdpathset_t,
        index: nfdpathsetsize_t,
        out_path: *mut *mut u8,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PathSet_GetPathU8(path_set, index, out_path.cast()) }
    }

    unsafe fn path_set_free_path(&self, path: *const u8) {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PathSet_FreePathU8(path.cast()) }
    }
}

// SAFETY: `RawFilter<Utf16>` is layout-compatible with `nfdnfilteritem_t` and
// `nfdnchar_t` is `u16` on Windows.
#[cfg(windows)]
unsafe impl NativeDialogs<Utf16> for Nfd {
    unsafe fn open_dialog(
        &self,
        out_path: *mut *mut u16,
        filters: *const RawFilter<Utf16>,
        count: nfdfiltersize_t,
        default_path: *const u16,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_OpenDialogN(out_path, filters.cast(), count, default_path) }
    }

    unsafe fn open_dialog_multiple(
        &self,
        out_paths: *mut *const nfdpathset_t,
        filters: *const RawFilter<Utf16>,
        count: nfdfiltersize_t,
        default_path: *const u16,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_OpenDialogMultipleN(out_paths, filters.cast(), count, default_path) }
    }

    unsafe fn save_dialog(
        &self,
        out_path: *mut *mut u16,
        filters: *const RawFilter<Utf16>,
        count: nfdfiltersize_t,
        default_path: *const u16,
        default_name: *const u16,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe {
            ffi::NFD_SaveDialogN(out_path, filters.cast(), count, default_path, default_name)
        }
    }

    unsafe fn pick_folder(&self, out_path: *mut *mut u16, default_path: *const u16) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PickFolderN(out_path, default_path) }
    }

    unsafe fn free_path(&self, path: *mut u16) {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_FreePathN(path) }
    }

    unsafe fn path_set_get_path(
        &self,
        path_set: *const nfdpathset_t,
        index: nfdpathsetsize_t,
        out_path: *mut *mut u16,
    ) -> nfdresult_t {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PathSet_GetPathN(path_set, index, out_path) }
    }

    unsafe fn path_set_free_path(&self, path: *const u16) {
        // SAFETY: forwarded from the caller.
        unsafe { ffi::NFD_PathSet_FreePathN(path) }
    }
}
