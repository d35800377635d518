//! Build script for nfdkit-sys.
//!
//! Linking is opt-in through the `link` feature so the binding layer can be
//! built and tested on machines without `libnfd` installed.

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=NFD_LIB_DIR");
    println!("cargo:rerun-if-env-changed=NFD_STATIC");

    if env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("NFD_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }

    let statik = env::var("NFD_STATIC").is_ok_and(|v| v != "0");
    if !statik {
        println!("cargo:rustc-link-lib=dylib=nfd");
        return;
    }

    println!("cargo:rustc-link-lib=static=nfd");

    // A static libnfd leaves its platform dependencies unresolved.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    match target_os.as_str() {
        "windows" => {
            for lib in ["ole32", "uuid", "shell32"] {
                println!("cargo:rustc-link-lib=dylib={lib}");
            }
        }
        "macos" => {
            for framework in ["AppKit", "UniformTypeIdentifiers"] {
                println!("cargo:rustc-link-lib=framework={framework}");
            }
        }
        _ => {
            for lib in ["gtk-3", "gdk-3", "gobject-2.0", "glib-2.0"] {
                println!("cargo:rustc-link-lib=dylib={lib}");
            }
        }
    }
}
