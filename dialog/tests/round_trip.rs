mod common;

use std::path::PathBuf;

use common::{FakeNfd, Reply};
use nfdkit_dialog::{FileDialog, NativeText, Utf8, Utf16};

const NON_ASCII: [&str; 4] = [
    "/home/ユーザー/résumé.pdf",
    "C:\\Users\\Zoë\\Документы",
    "/srv/📁 archive/📄",
    "/tmp/naïve café",
];

fn open_echo<E: NativeText>(location: &str) -> Option<PathBuf> {
    let fake = FakeNfd::new(Reply::EchoDefaultPath);
    let picked = FileDialog::new()
        .set_location(location)
        .show_open_single_file_with::<E, _>(&fake)
        .unwrap();
    assert!(fake.results_balanced());
    picked
}

#[test]
fn default_path_survives_utf8_round_trip() {
    for text in NON_ASCII {
        assert_eq!(open_echo::<Utf8>(text), Some(PathBuf::from(text)));
    }
}

#[test]
fn default_path_survives_utf16_round_trip() {
    for text in NON_ASCII {
        assert_eq!(open_echo::<Utf16>(text), Some(PathBuf::from(text)));
    }
}

#[test]
fn save_name_survives_both_encodings() {
    for text in ["Überblick 2024.xlsx", "报告.docx", "🎵.flac"] {
        let fake = FakeNfd::new(Reply::EchoDefaultName);
        let dialog = FileDialog::new().set_file_name(text);

        let via_utf8 = dialog.show_save_single_file_with::<Utf8, _>(&fake).unwrap();
        let via_utf16 = dialog.show_save_single_file_with::<Utf16, _>(&fake).unwrap();

        assert_eq!(via_utf8, Some(PathBuf::from(text)));
        assert_eq!(via_utf16, Some(PathBuf::from(text)));
        assert!(fake.results_balanced());
    }
}

#[test]
fn multiple_selection_echo_decodes_non_ascii() {
    let fake = FakeNfd::new(Reply::EchoDefaultPath);

    let paths = FileDialog::new()
        .set_location(NON_ASCII[0])
        .show_open_multiple_files_with::<Utf16, _>(&fake)
        .unwrap();

    assert_eq!(paths, [PathBuf::from(NON_ASCII[0])]);
    assert!(fake.results_balanced());
}

#[test]
fn filter_text_reaches_native_side_unchanged() {
    let fake = FakeNfd::new(Reply::Cancel);

    FileDialog::new()
        .add_filter("Imágenes", &["png", "jpg"])
        .show_open_single_file_with::<Utf16, _>(&fake)
        .unwrap();

    assert_eq!(
        fake.calls()[0].filters,
        [("Imágenes".to_owned(), "png,jpg".to_owned())]
    );
}
