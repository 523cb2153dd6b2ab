//! End-to-end tests through the public API, across both backends.

use std::path::PathBuf;

use filebundle::compress;
use filebundle::{
    Backend, BundleEntry, BundleError, DirEntry, FileBundle, FileType, OpenFlags, Settings,
};
use tempfile::TempDir;

// ============================================================================
// Shared test setup
// ============================================================================

static TABLE: BundleEntry<'static> = BundleEntry::dir(
    "",
    &[
        BundleEntry::dir(
            "listing",
            &[
                BundleEntry::file("a", b"alpha"),
                BundleEntry::file("b", b"bravo"),
                BundleEntry::file("c", b"charlie"),
            ],
        ),
        BundleEntry::dir(
            "text",
            &[
                BundleEntry::file("lines.txt", b"hello\nworld"),
                BundleEntry::file("empty.txt", b""),
                BundleEntry::file("plain.html", b"<p>plain</p>"),
            ],
        ),
    ],
);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("filebundle=trace")
        .try_init();
}

/// A data root with one nested directory and a text file.
fn disk_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("text")).unwrap();
    std::fs::write(tmp.path().join("text/lines.txt"), b"hello\nworld").unwrap();
    std::fs::write(tmp.path().join("text/empty.txt"), b"").unwrap();
    tmp
}

fn read_all_lines(fb_path: &str, fb: &FileBundle<'_, impl filebundle::DataRoot>) -> Vec<Vec<u8>> {
    let mut f = fb.open(fb_path, OpenFlags::raw()).unwrap();
    let mut lines = Vec::new();
    while let Some(line) = f.read_line(256).unwrap() {
        lines.push(line);
    }
    lines
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn bundle_listing_is_ordered_and_repeatable_across_reopen() {
    init_tracing();
    let fb = FileBundle::new(&TABLE);
    let expected = vec![DirEntry::file("a"), DirEntry::file("b"), DirEntry::file("c")];

    for _ in 0..2 {
        let mut dir = fb.open_dir("listing").unwrap();
        let mut seen = Vec::new();
        while let Some(entry) = dir.read_entry() {
            seen.push(entry);
        }
        assert_eq!(seen, expected);
        // Exhausted handles stay exhausted.
        assert!(dir.read_entry().is_none());
        dir.close();
    }
}

#[test]
fn bundle_root_lists_top_level() {
    let fb = FileBundle::new(&TABLE);
    let entries = fb.read_dir("").unwrap();
    assert_eq!(
        entries,
        vec![DirEntry::directory("listing"), DirEntry::directory("text")]
    );
}

#[test]
fn bundle_file_is_not_a_directory() {
    let fb = FileBundle::new(&TABLE);
    assert!(matches!(
        fb.open_dir("text/lines.txt"),
        Err(BundleError::NotADirectory(_))
    ));
}

#[test]
fn direct_listing_classifies_entries() {
    let tmp = disk_root();
    let fb = FileBundle::with_data_root(&TABLE, tmp.path().to_path_buf());
    let mut entries = fb.read_dir("text").unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.kind == FileType::File));
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn both_flags_rejected_for_both_backends() {
    let both = OpenFlags {
        decompress: true,
        compress: true,
    };

    let fb = FileBundle::new(&TABLE);
    assert!(matches!(
        fb.open("text/lines.txt", both),
        Err(BundleError::InvalidRequest(_))
    ));
    // Rejected before any lookup happens.
    assert!(matches!(
        fb.open("no/such/file", both),
        Err(BundleError::InvalidRequest(_))
    ));

    let tmp = disk_root();
    let direct = FileBundle::with_data_root(&TABLE, tmp.path().to_path_buf());
    assert!(matches!(
        direct.open("text/lines.txt", both),
        Err(BundleError::InvalidRequest(_))
    ));
    let dir = direct.open_dir("text").unwrap();
    assert!(matches!(
        dir.open_file("missing", both),
        Err(BundleError::InvalidRequest(_))
    ));
}

#[test]
fn decompress_is_noop_on_plain_entries() {
    let fb = FileBundle::new(&TABLE);
    for path in ["listing/a", "listing/b", "text/lines.txt", "text/plain.html"] {
        let raw = fb.read(path, OpenFlags::raw()).unwrap();
        let inflated = fb.read(path, OpenFlags::decompress()).unwrap();
        assert_eq!(raw, inflated, "{path}");

        let f = fb.open(path, OpenFlags::decompress()).unwrap();
        assert!(!f.is_compressed());
        assert_eq!(f.size(), raw.len() as u64);
    }
}

#[test]
fn compressed_entry_served_raw_or_inflated() {
    let plain = b"var app = {};\n".repeat(300);
    let gz = compress::compress(&plain).unwrap();
    let entries = [BundleEntry::gzip_file("app.js", &gz, plain.len() as u64)];
    let table = BundleEntry::dir("", &entries);
    let fb = FileBundle::new(&table);

    let dir = fb.open_dir("").unwrap();
    let mut raw = dir.open_file("app.js", OpenFlags::raw()).unwrap();
    assert!(raw.is_compressed());
    assert_eq!(raw.size(), gz.len() as u64);
    assert_eq!(raw.read_to_end().unwrap(), gz);

    let mut inflated = dir.open_file("app.js", OpenFlags::decompress()).unwrap();
    assert!(!inflated.is_compressed());
    assert_eq!(inflated.size(), plain.len() as u64);
    assert_eq!(inflated.read_to_end().unwrap(), plain);
}

// ============================================================================
// Compression round trips
// ============================================================================

#[test]
fn compress_round_trip_sizes() {
    for size in [1usize, 4096, 1_000_000] {
        let data: Vec<u8> = (0..size).map(|i| (i * 31 % 251) as u8).collect();
        let gz = compress::compress(&data).unwrap();
        let back = compress::decompress(&gz, size as u64).unwrap();
        assert_eq!(back.len(), size);
        assert_eq!(back, data);
    }
}

#[test]
fn compress_flag_round_trips_through_both_backends() {
    let tmp = disk_root();
    let bundle = FileBundle::new(&TABLE);
    let direct = FileBundle::with_data_root(&TABLE, tmp.path().to_path_buf());

    for fb_read in [
        bundle.read("text/lines.txt", OpenFlags::compress()).unwrap(),
        direct.read("text/lines.txt", OpenFlags::compress()).unwrap(),
    ] {
        assert_eq!(&fb_read[..2], &[0x1f, 0x8b]);
        assert_eq!(compress::decompress(&fb_read, 11).unwrap(), b"hello\nworld");
    }

    let f = direct.open("text/lines.txt", OpenFlags::compress()).unwrap();
    assert_eq!(f.backend(), Backend::Direct);
    assert!(f.is_compressed());
}

#[test]
fn compress_of_empty_file_fails_open() {
    let fb = FileBundle::new(&TABLE);
    assert!(matches!(
        fb.open("text/empty.txt", OpenFlags::compress()),
        Err(BundleError::Compress(_))
    ));
}

// ============================================================================
// Reads
// ============================================================================

#[test]
fn empty_file_is_at_end_immediately() {
    let tmp = disk_root();
    let bundle = FileBundle::new(&TABLE);
    let direct = FileBundle::with_data_root(&TABLE, tmp.path().to_path_buf());

    for mut f in [
        bundle.open("text/empty.txt", OpenFlags::raw()).unwrap(),
        direct.open("text/empty.txt", OpenFlags::raw()).unwrap(),
    ] {
        assert!(f.at_end());
        assert_eq!(f.size(), 0);
        let mut buf = [0u8; 16];
        assert_eq!(f.read(&mut buf).unwrap(), None);
        assert_eq!(f.position(), 0);
    }
}

#[test]
fn read_line_splits_hello_world() {
    let tmp = disk_root();
    let bundle = FileBundle::new(&TABLE);
    let direct = FileBundle::with_data_root(&TABLE, tmp.path().to_path_buf());

    let expected = vec![b"hello".to_vec(), b"world".to_vec()];
    assert_eq!(read_all_lines("text/lines.txt", &bundle), expected);
    assert_eq!(read_all_lines("text/lines.txt", &direct), expected);
}

#[test]
fn settings_drive_backend_choice() {
    let tmp = disk_root();
    let text = format!("(data_root: Some({:?}))", tmp.path().display().to_string());
    let settings = Settings::from_ron_str(&text).unwrap();
    assert_eq!(settings.data_root, Some(PathBuf::from(tmp.path())));

    let fb = FileBundle::with_data_root(&TABLE, &settings);
    assert_eq!(fb.open_dir("text").unwrap().backend(), Backend::Direct);
    // The bundle-only directory does not exist on disk.
    assert!(fb.open_dir("listing").unwrap_err().is_not_found());

    let fb = FileBundle::with_data_root(&TABLE, Settings::default());
    assert_eq!(fb.open_dir("listing").unwrap().backend(), Backend::Bundle);
}
