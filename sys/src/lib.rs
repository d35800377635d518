//! Raw C ABI of nativefiledialog-extended.
//!
//! Types and constants are always available. The `extern "C"` block is only
//! compiled with the `link` feature, which also makes the build script emit
//! the `nfd` link directives.
//!
//! `U8` entry points take UTF-8 strings on every platform. `N` entry points
//! take the platform native character type: `wchar_t` on Windows, `char`
//! elsewhere. Outside Windows `nfd.h` defines every `U8` name as a macro for
//! its `N` sibling (`#define NFD_OpenDialogU8 NFD_OpenDialogN`), so the
//! library only exports the `N` symbols there and the `U8` items below link
//! against those.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_uint, c_void};

/// Result code returned by every fallible NFD entry point.
pub type nfdresult_t = c_int;

/// The call failed; the message is available from `NFD_GetError`.
pub const NFD_ERROR: nfdresult_t = 0;
/// The user picked something.
pub const NFD_OKAY: nfdresult_t = 1;
/// The user dismissed the dialog.
pub const NFD_CANCEL: nfdresult_t = 2;

/// UTF-8 character unit.
pub type nfdu8char_t = c_char;

/// Native character unit (`wchar_t`, UTF-16 on Windows).
#[cfg(windows)]
pub type nfdnchar_t = u16;

/// Native character unit (`char`, UTF-8 outside Windows).
#[cfg(not(windows))]
pub type nfdnchar_t = c_char;

/// Number of entries in a filter list.
pub type nfdfiltersize_t = c_uint;

/// Number of entries in a path-set.
pub type nfdpathsetsize_t = c_uint;

/// Opaque path-set handle returned by the multiple-selection dialog.
pub type nfdpathset_t = c_void;

/// Filter entry in UTF-8.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct nfdu8filteritem_t {
    /// Display name, e.g. `"Images"`.
    pub name: *const nfdu8char_t,
    /// Comma separated extensions, e.g. `"png,jpg"`.
    pub spec: *const nfdu8char_t,
}

/// Filter entry in the native character type.
#[cfg(windows)]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct nfdnfilteritem_t {
    /// Display name.
    pub name: *const nfdnchar_t,
    /// Comma separated extensions.
    pub spec: *const nfdnchar_t,
}

/// Filter entry in the native character type, the same as UTF-8 here.
#[cfg(not(windows))]
pub type nfdnfilteritem_t = nfdu8filteritem_t;

#[cfg(feature = "link")]
unsafe extern "C" {
    /// Initialize the library. Must be paired with `NFD_Quit`.
    pub fn NFD_Init() -> nfdresult_t;
    /// Tear down what [`NFD_Init`] set up.
    pub fn NFD_Quit();

    /// Last error message, or null. Owned by the library.
    pub fn NFD_GetError() -> *const c_char;
    /// Reset the last error message.
    pub fn NFD_ClearError();

    /// Free a path returned by a `U8` dialog.
    #[cfg_attr(not(windows), link_name = "NFD_FreePathN")]
    pub fn NFD_FreePathU8(file_path: *mut nfdu8char_t);

    /// Single file open dialog.
    #[cfg_attr(not(windows), link_name = "NFD_OpenDialogN")]
    pub fn NFD_OpenDialogU8(
        out_path: *mut *mut nfdu8char_t,
        filter_list: *const nfdu8filteritem_t,
        filter_count: nfdfiltersize_t,
        default_path: *const nfdu8char_t,
    ) -> nfdresult_t;

    /// Multiple file open dialog. On success `out_paths` must be released
    /// with [`NFD_PathSet_Free`].
    #[cfg_attr(not(windows), link_name = "NFD_OpenDialogMultipleN")]
    pub fn NFD_OpenDialogMultipleU8(
        out_paths: *mut *const nfdpathset_t,
        filter_list: *const nfdu8filteritem_t,
        filter_count: nfdfiltersize_t,
        default_path: *const nfdu8char_t,
    ) -> nfdresult_t;

    /// Save dialog.
    #[cfg_attr(not(windows), link_name = "NFD_SaveDialogN")]
    pub fn NFD_SaveDialogU8(
        out_path: *mut *mut nfdu8char_t,
        filter_list: *const nfdu8filteritem_t,
        filter_count: nfdfiltersize_t,
        default_path: *const nfdu8char_t,
        default_name: *const nfdu8char_t,
    ) -> nfdresult_t;

    /// Folder picker.
    #[cfg_attr(not(windows), link_name = "NFD_PickFolderN")]
    pub fn NFD_PickFolderU8(
        out_path: *mut *mut nfdu8char_t,
        default_path: *const nfdu8char_t,
    ) -> nfdresult_t;

    /// Number of paths in a path-set.
    pub fn NFD_PathSet_GetCount(
        path_set: *const nfdpathset_t,
        count: *mut nfdpathsetsize_t,
    ) -> nfdresult_t;

    /// Path at `index`. Release with [`NFD_PathSet_FreePathU8`].
    #[cfg_attr(not(windows), link_name = "NFD_PathSet_GetPathN")]
    pub fn NFD_PathSet_GetPathU8(
        path_set: *const nfdpathset_t,
        index: nfdpathsetsize_t,
        out_path: *mut *mut nfdu8char_t,
    ) -> nfdresult_t;

    /// Free a path obtained from [`NFD_PathSet_GetPathU8`].
    #[cfg_attr(not(windows), link_name = "NFD_PathSet_FreePathN")]
    pub fn NFD_PathSet_FreePathU8(file_path: *const nfdu8char_t);

    /// Free a path-set.
    pub fn NFD_PathSet_Free(path_set: *const nfdpathset_t);
}

#[cfg(feature = "link")]
unsafe extern "C" {
    /// Free a path returned by an `N` dialog.
    pub fn NFD_FreePathN(file_path: *mut nfdnchar_t);

    /// Single file open dialog.
    pub fn NFD_OpenDialogN(
        out_path: *mut *mut nfdnchar_t,
        filter_list: *const nfdnfilteritem_t,
        filter_count: nfdfiltersize_t,
        default_path: *const nfdnchar_t,
    ) -> nfdresult_t;

    /// Multiple file open dialog.
    pub fn NFD_OpenDialogMultipleN(
        out_paths: *mut *const nfdpathset_t,
        filter_list: *const nfdnfilteritem_t,
        filter_count: nfdfiltersize_t,
        default_path: *const nfdnchar_t,
    ) -> nfdresult_t;

    /// Save dialog.
    pub fn NFD_SaveDialogN(
        out_path: *mut *mut nfdnchar_t,
        filter_list: *const nfdnfilteritem_t,
        filter_count: nfdfiltersize_t,
        default_path: *const nfdnchar_t,
        default_name: *const nfdnchar_t,
    ) -> nfdresult_t;

    /// Folder picker.
    pub fn NFD_PickFolderN(
        out_path: *mut *mut nfdnchar_t,
        default_path: *const nfdnchar_t,
    ) -> nfdresult_t;

    /// Path at `index`. Release with [`NFD_PathSet_FreePathN`].
    pub fn NFD_PathSet_GetPathN(
        path_set: *const nfdpathset_t,
        index: nfdpathsetsize_t,
        out_path: *mut *mut nfdnchar_t,
    ) -> nfdresult_t;

    /// Free a path obtained from [`NFD_PathSet_GetPathN`].
    pub fn NFD_PathSet_FreePathN(file_path: *const nfdnchar_t);
}
