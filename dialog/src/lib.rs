//! Native open/save/folder dialogs.
//!
//! A thin binding over nativefiledialog-extended. Each call marshals its
//! arguments into the platform string encoding (UTF-16 on Windows, UTF-8
//! elsewhere), runs the native dialog inside its own init/quit session, and
//! decodes the result, freeing every native allocation on the way out.
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # fn main() -> Result<(), nfdkit_dialog::DialogError> {
//! use nfdkit_dialog::FileDialog;
//!
//! let picked = FileDialog::new()
//!     .set_location("/tmp")
//!     .add_filter("Images", &["png", "jpg"])
//!     .show_open_single_file()?;
//!
//! match picked {
//!     Some(path) => println!("picked {}", path.display()),
//!     None => println!("cancelled"),
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```

#![warn(missing_docs)]

mod call;
pub mod encoding;
mod error;
mod marshal;
pub mod sys;

use std::path::{Path, PathBuf};

pub use encoding::{Encoding, NativeText, PlatformText, Utf8, Utf16};
pub use error::DialogError;
use sys::NativeDialogs;

/// A file type filter: a display name and a comma separated list of
/// extensions without dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    /// Name shown in the dialog, e.g. `"Images"`.
    pub name: String,
    /// Extensions, e.g. `"png,jpg"`.
    pub spec: String,
}

impl Filter {
    /// Create a filter from a name and a spec string as NFD expects it.
    pub fn new(name: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: spec.into(),
        }
    }

    /// Create a filter from a list of extensions.
    pub fn from_extensions(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self::new(name, extensions.join(","))
    }
}

impl<N: Into<String>, S: Into<String>> From<(N, S)> for Filter {
    fn from((name, spec): (N, S)) -> Self {
        Self::new(name, spec)
    }
}

/// A native file dialog (open/save/folder).
#[derive(Debug, Clone)]
pub struct FileDialog {
    /// Starting directory.
    pub location: Option<PathBuf>,
    /// Suggested file name for save dialogs.
    pub file_name: Option<String>,
    /// File filters, in display order.
    pub filters: Vec<Filter>,
}

impl FileDialog {
    /// Create a new file dialog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            location: None,
            file_name: None,
            filters: Vec::new(),
        }
    }

    /// Set the starting location.
    #[must_use]
    pub fn set_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Set the suggested file name. Only save dialogs use it.
    #[must_use]
    pub fn set_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Add a file extension filter.
    /// Usage: .add_filter("Image", &["png", "jpg"])
    #[must_use]
    pub fn add_filter(self, name: impl Into<String>, extensions: &[&str]) -> Self {
        self.with_filter(Filter::from_extensions(name, extensions))
    }

    /// Add a filter with a raw spec string such as `"png,jpg"`.
    #[must_use]
    pub fn add_filter_spec(self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.with_filter(Filter::new(name, spec))
    }

    /// Add a prepared filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    fn location_text(&self) -> Result<Option<&str>, DialogError> {
        self.location.as_deref().map(path_text).transpose()
    }

    /// Show the dialog to select a single file to open, using `backend`
    /// with strings in encoding `E`.
    ///
    /// # Errors
    /// Returns the native error message if the dialog fails, or an encoding
    /// error if a path or filter cannot be represented.
    pub fn show_open_single_file_with<E, B>(
        &self,
        backend: &B,
    ) -> Result<Option<PathBuf>, DialogError>
    where
        E: NativeText,
        B: NativeDialogs<E> + ?Sized,
    {
        call::open_single::<E, B>(backend, self)
    }

    /// Show the dialog to select several files to open. Cancelling yields
    /// an empty list.
    ///
    /// # Errors
    /// Same as [`FileDialog::show_open_single_file_with`].
    pub fn show_open_multiple_files_with<E, B>(
        &self,
        backend: &B,
    ) -> Result<Vec<PathBuf>, DialogError>
    where
        E: NativeText,
        B: NativeDialogs<E> + ?Sized,
    {
        call::open_multiple::<E, B>(backend, self)
    }

    /// Show the dialog to choose a file to save to.
    ///
    /// # Errors
    /// Same as [`FileDialog::show_open_single_file_with`].
    pub fn show_save_single_file_with<E, B>(
        &self,
        backend: &B,
    ) -> Result<Option<PathBuf>, DialogError>
    where
        E: NativeText,
        B: NativeDialogs<E> + ?Sized,
    {
        call::save_single::<E, B>(backend, self)
    }

    /// Show the dialog to select a folder. Filters are ignored.
    ///
    /// # Errors
    /// Same as [`FileDialog::show_open_single_file_with`].
    pub fn show_pick_folder_with<E, B>(&self, backend: &B) -> Result<Option<PathBuf>, DialogError>
    where
        E: NativeText,
        B: NativeDialogs<E> + ?Sized,
    {
        call::pick_folder::<E, B>(backend, self)
    }
}

#[cfg(feature = "native")]
impl FileDialog {
    /// Show the dialog to select a single file to open.
    /// Blocks until the user closes it.
    ///
    /// # Errors
    /// Returns the native error message if the dialog fails.
    pub fn show_open_single_file(&self) -> Result<Option<PathBuf>, DialogError> {
        self.show_open_single_file_with::<PlatformText, _>(&sys::Nfd)
    }

    /// Show the dialog to select several files to open.
    ///
    /// # Errors
    /// Returns the native error message if the dialog fails.
    pub fn show_open_multiple_files(&self) -> Result<Vec<PathBuf>, DialogError> {
        self.show_open_multiple_files_with::<PlatformText, _>(&sys::Nfd)
    }

    /// Show the dialog to choose a file to save to.
    ///
    /// # Errors
    /// Returns the native error message if the dialog fails.
    pub fn show_save_single_file(&self) -> Result<Option<PathBuf>, DialogError> {
        self.show_save_single_file_with::<PlatformText, _>(&sys::Nfd)
    }

    /// Show the dialog to select a folder.
    ///
    /// # Errors
    /// Returns the native error message if the dialog fails.
    pub fn show_pick_folder(&self) -> Result<Option<PathBuf>, DialogError> {
        self.show_pick_folder_with::<PlatformText, _>(&sys::Nfd)
    }
}

impl Default for FileDialog {
    fn default() -> Self {
        Self::new()
    }
}

fn path_text(path: &Path) -> Result<&str, DialogError> {
    path.to_str()
        .ok_or_else(|| DialogError::encoding(Encoding::native(), "path is not valid Unicode"))
}
