//! The four dialog operations.
//!
//! Every operation runs `Init → native call → {Okay, Cancel, Error} → Quit`.
//! Locals are declared in acquisition order so they drop in reverse: result
//! buffers first, then marshaled filters, then the session.

use std::path::PathBuf;
use std::ptr;

use crate::encoding::NativeText;
use crate::marshal::{
    Completion, MarshaledFilters, NativePath, PathSet, Session, arg_ptr, check, encode_arg,
};
use crate::sys::{NativeDialogs, nfdresult_t};
use crate::{DialogError, FileDialog};

fn finish_single<E, B>(
    backend: &B,
    code: nfdresult_t,
    out: *mut E::Unit,
) -> Result<Option<PathBuf>, DialogError>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    match check(backend, code)? {
        Completion::Okay => {
            let path = NativePath::<E, B>::adopt(backend, out)?;
            path.decode().map(|p| Some(PathBuf::from(p)))
        }
        Completion::Cancel => Ok(None),
    }
}

/// Pick one existing file.
pub(crate) fn open_single<E, B>(
    backend: &B,
    dialog: &FileDialog,
) -> Result<Option<PathBuf>, DialogError>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    log::debug!("open single file dialog ({})", E::ENCODING);
    let default_path = encode_arg::<E>(dialog.location_text()?)?;

    let _session = Session::open(backend)?;
    let filters = MarshaledFilters::<E, B>::new(backend, &dialog.filters)?;

    let mut out = ptr::null_mut();
    // SAFETY: `out` is writable; filter strings and `default_path` outlive the call.
    let code = unsafe {
        backend.open_dialog(
            &raw mut out,
            filters.as_ptr(),
            filters.count(),
            arg_ptr(default_path.as_deref()),
        )
    };
    finish_single::<E, B>(backend, code, out)
}

/// Pick any number of existing files.
pub(crate) fn open_multiple<E, B>(
    backend: &B,
    dialog: &FileDialog,
) -> Result<Vec<PathBuf>, DialogError>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    log::debug!("open multiple files dialog ({})", E::ENCODING);
    let default_path = encode_arg::<E>(dialog.location_text()?)?;

    let _session = Session::open(backend)?;
    let filters = MarshaledFilters::<E, B>::new(backend, &dialog.filters)?;

    let mut out = ptr::null();
    // SAFETY: as in `open_single`.
    let code = unsafe {
        backend.open_dialog_multiple(
            &raw mut out,
            filters.as_ptr(),
            filters.count(),
            arg_ptr(default_path.as_deref()),
        )
    };

    match check(backend, code)? {
        Completion::Okay => {
            let set = PathSet::<E, B>::adopt(backend, out)?;
            let paths = set.decode_all()?;
            Ok(paths.into_iter().map(PathBuf::from).collect())
        }
        Completion::Cancel => Ok(Vec::new()),
    }
}

/// Choose a file name to save to.
pub(crate) fn save_single<E, B>(
    backend: &B,
    dialog: &FileDialog,
) -> Result<Option<PathBuf>, DialogError>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    log::debug!("save file dialog ({})", E::ENCODING);
    let default_path = encode_arg::<E>(dialog.location_text()?)?;
    let default_name = encode_arg::<E>(dialog.file_name.as_deref())?;

    let _session = Session::open(backend)?;
    let filters = MarshaledFilters::<E, B>::new(backend, &dialog.filters)?;

    let mut out = ptr::null_mut();
    // SAFETY: as in `open_single`; `default_name` also outlives the call.
    let code = unsafe {
        backend.save_dialog(
            &raw mut out,
            filters.as_ptr(),
            filters.count(),
            arg_ptr(default_path.as_deref()),
            arg_ptr(default_name.as_deref()),
        )
    };
    finish_single::<E, B>(backend, code, out)
}

/// Pick one folder. Filters do not apply.
pub(crate) fn pick_folder<E, B>(
    backend: &B,
    dialog: &FileDialog,
) -> Result<Option<PathBuf>, DialogError>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    log::debug!("pick folder dialog ({})", E::ENCODING);
    let default_path = encode_arg::<E>(dialog.location_text()?)?;

    let _session = Session::open(backend)?;

    let mut out = ptr::null_mut();
    // SAFETY: `out` is writable; `default_path` outlives the call.
    let code = unsafe { backend.pick_folder(&raw mut out, arg_ptr(default_path.as_deref())) };
    finish_single::<E, B>(backend, code, out)
}
