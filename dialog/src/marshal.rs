//! Scoped ownership of everything that crosses the native boundary.
//!
//! Each guard releases its resource in `Drop`, so cleanup runs on every exit
//! path of a dialog call, including a panic unwinding out of the backend.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::encoding::NativeText;
use crate::error::UNKNOWN_NATIVE_ERROR;
use crate::sys::{
    NativeBackend, NativeDialogs, NfdResult, RawFilter, nfdfiltersize_t, nfdpathset_t,
    nfdpathsetsize_t, nfdresult_t,
};
use crate::{DialogError, Filter};

/// Read the native error message and clear the native error state.
pub(crate) fn take_error<B: NativeBackend + ?Sized>(backend: &B) -> DialogError {
    let raw = backend.get_error();
    let message = if raw.is_null() {
        UNKNOWN_NATIVE_ERROR.to_owned()
    } else {
        // SAFETY: the backend keeps the message alive until `clear_error`.
        unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned()
    };
    backend.clear_error();

    log::warn!("native dialog error: {message}");
    DialogError::Native(message)
}

/// A native call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completion {
    Okay,
    Cancel,
}

/// Fail with the native message on [`NfdResult::Error`].
pub(crate) fn check<B: NativeBackend + ?Sized>(
    backend: &B,
    code: nfdresult_t,
) -> Result<Completion, DialogError> {
    match NfdResult::from_raw(code)? {
        NfdResult::Error => Err(take_error(backend)),
        NfdResult::Okay => Ok(Completion::Okay),
        NfdResult::Cancel => Ok(Completion::Cancel),
    }
}

/// An initialized native session. Quits on drop.
pub(crate) struct Session<'b, B: NativeBackend + ?Sized> {
    backend: &'b B,
}

impl<'b, B: NativeBackend + ?Sized> Session<'b, B> {
    /// Initialize the library. No session exists (and no quit follows) if this fails.
    pub(crate) fn open(backend: &'b B) -> Result<Self, DialogError> {
        check(backend, backend.init())?;
        log::debug!("native dialog session acquired");
        Ok(Self { backend })
    }
}

impl<B: NativeBackend + ?Sized> Drop for Session<'_, B> {
    fn drop(&mut self) {
        self.backend.quit();
        log::debug!("native dialog session released");
    }
}

/// Filter list marshaled into native strings: one allocation per name and
/// one per spec.
pub(crate) struct MarshaledFilters<'b, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    backend: &'b B,
    strings: Vec<NonNull<E::Unit>>,
    items: Vec<RawFilter<E>>,
    count: nfdfiltersize_t,
}

impl<'b, E, B> MarshaledFilters<'b, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    pub(crate) fn new(backend: &'b B, filters: &[Filter]) -> Result<Self, DialogError> {
        let count = nfdfiltersize_t::try_from(filters.len())
            .map_err(|_| DialogError::TooManyFilters(filters.len()))?;

        let mut marshaled = Self {
            backend,
            strings: Vec::with_capacity(filters.len() * 2),
            items: Vec::with_capacity(filters.len()),
            count,
        };

        // An early return drops `marshaled`, freeing what was allocated so far.
        for filter in filters {
            let name = marshaled.push(&filter.name)?;
            let spec = marshaled.push(&filter.spec)?;
            marshaled.items.push(RawFilter::new(name, spec));
        }

        log::trace!(
            "marshaled {} filters into {} {} strings",
            marshaled.items.len(),
            marshaled.strings.len(),
            E::ENCODING
        );
        Ok(marshaled)
    }

    fn push(&mut self, text: &str) -> Result<*const E::Unit, DialogError> {
        let ptr = self.backend.alloc_string(text)?;
        self.strings.push(ptr);
        Ok(ptr.as_ptr().cast_const())
    }

    /// Pointer to the filter items, or null when there are none.
    pub(crate) fn as_ptr(&self) -> *const RawFilter<E> {
        if self.items.is_empty() {
            ptr::null()
        } else {
            self.items.as_ptr()
        }
    }

    pub(crate) const fn count(&self) -> nfdfiltersize_t {
        self.count
    }
}

impl<E, B> Drop for MarshaledFilters<'_, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    fn drop(&mut self) {
        for ptr in self.strings.drain(..) {
            // SAFETY: every entry came from `alloc_string` on this backend and
            // the items pointing at it are no longer handed out.
            unsafe { self.backend.free_string(ptr) };
        }
    }
}

/// Encode an optional argument into a call-local buffer. Absent and empty
/// text both become `None`, which is passed as a null pointer.
pub(crate) fn encode_arg<E: NativeText>(
    text: Option<&str>,
) -> Result<Option<Vec<E::Unit>>, DialogError> {
    text.filter(|t| !t.is_empty()).map(E::encode).transpose()
}

pub(crate) fn arg_ptr<T>(buffer: Option<&[T]>) -> *const T {
    buffer.map_or(ptr::null(), <[T]>::as_ptr)
}

/// A path returned by a single-selection dialog. Freed with `free_path`.
pub(crate) struct NativePath<'b, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    backend: &'b B,
    ptr: NonNull<E::Unit>,
}

impl<'b, E, B> NativePath<'b, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    /// Take ownership of a path written by a successful dialog call.
    pub(crate) fn adopt(backend: &'b B, raw: *mut E::Unit) -> Result<Self, DialogError> {
        NonNull::new(raw)
            .map(|ptr| Self { backend, ptr })
            .ok_or(DialogError::MissingResult("path"))
    }

    pub(crate) fn decode(&self) -> Result<String, DialogError> {
        // SAFETY: the backend contract guarantees a NUL-terminated string.
        unsafe { E::decode(self.ptr.as_ptr()) }
    }
}

impl<E, B> Drop for NativePath<'_, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    fn drop(&mut self) {
        // SAFETY: the pointer came from a dialog call on this backend.
        unsafe { self.backend.free_path(self.ptr.as_ptr()) };
    }
}

/// One entry fetched from a path-set. Freed with `path_set_free_path`.
struct PathSetEntry<'b, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    backend: &'b B,
    ptr: NonNull<E::Unit>,
}

impl<E, B> Drop for PathSetEntry<'_, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    fn drop(&mut self) {
        // SAFETY: the pointer came from `path_set_get_path` on this backend.
        unsafe { self.backend.path_set_free_path(self.ptr.as_ptr()) };
    }
}

/// The path-set handle from a multiple-selection dialog. Freed with `path_set_free`.
pub(crate) struct PathSet<'b, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    backend: &'b B,
    handle: NonNull<nfdpathset_t>,
    _encoding: PhantomData<E>,
}

impl<'b, E, B> PathSet<'b, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    pub(crate) fn adopt(backend: &'b B, raw: *const nfdpathset_t) -> Result<Self, DialogError> {
        NonNull::new(raw.cast_mut())
            .map(|handle| Self {
                backend,
                handle,
                _encoding: PhantomData,
            })
            .ok_or(DialogError::MissingResult("path set"))
    }

    fn count(&self) -> Result<nfdpathsetsize_t, DialogError> {
        let mut count: nfdpathsetsize_t = 0;
        // SAFETY: the handle is live until this guard drops.
        let code = unsafe {
            self.backend
                .path_set_get_count(self.handle.as_ptr().cast_const(), &raw mut count)
        };
        check(self.backend, code)?;
        Ok(count)
    }

    fn get(&self, index: nfdpathsetsize_t) -> Result<String, DialogError> {
        let mut out = ptr::null_mut();
        // SAFETY: the handle is live and `index` is below the reported count.
        let code = unsafe {
            self.backend
                .path_set_get_path(self.handle.as_ptr().cast_const(), index, &raw mut out)
        };
        check(self.backend, code)?;

        let entry = PathSetEntry::<E, B> {
            backend: self.backend,
            ptr: NonNull::new(out).ok_or(DialogError::MissingResult("path set entry"))?,
        };
        // SAFETY: the backend contract guarantees a NUL-terminated string.
        unsafe { E::decode(entry.ptr.as_ptr()) }
    }

    /// Decode every entry in index order, freeing each as it is consumed.
    pub(crate) fn decode_all(&self) -> Result<Vec<String>, DialogError> {
        let count = self.count()?;
        log::trace!("decoding {count} paths from native path set");
        (0..count).map(|index| self.get(index)).collect()
    }
}

impl<E, B> Drop for PathSet<'_, E, B>
where
    E: NativeText,
    B: NativeDialogs<E> + ?Sized,
{
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful multiple-selection call.
        unsafe { self.backend.path_set_free(self.handle.as_ptr().cast_const()) };
    }
}
