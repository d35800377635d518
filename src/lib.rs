//! # nfdkit
//!
//! Rust bindings for nativefiledialog-extended: the platform's own open
//! file, open files, save file and pick folder dialogs.
//!
//! ## Features
//!
//! - `dialog` (default): the dialog API, re-exported as [`dialog`].
//! - `native`: link against `libnfd` and enable the blocking `show_*`
//!   methods. Set `NFD_LIB_DIR` to add a link search path and `NFD_STATIC=1`
//!   to link the library statically.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! nfdkit = { version = "0.1", features = ["native"] }
//! ```
//!
//! ```rust,ignore
//! use nfdkit::dialog::FileDialog;
//!
//! fn choose_images() -> Result<(), nfdkit::dialog::DialogError> {
//!     let paths = FileDialog::new()
//!         .add_filter("Images", &["png", "jpg"])
//!         .show_open_multiple_files()?;
//!     for path in paths {
//!         println!("{}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "dialog")]
pub use nfdkit_dialog as dialog;
