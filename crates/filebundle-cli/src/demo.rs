//! Demo table compiled into `fbtool`.
//!
//! Laid out the way a build-time generator would emit it. `app.js` is
//! stored as a gzip member; its uncompressed length is recorded alongside.

use filebundle::BundleEntry;

const APP_JS_SIZE: u64 = 276;

pub static DEMO: BundleEntry<'static> = BundleEntry::dir(
    "",
    &[
        BundleEntry::file("README.txt", include_bytes!("../assets/README.txt")),
        BundleEntry::dir(
            "webui",
            &[
                BundleEntry::file("index.html", include_bytes!("../assets/webui/index.html")),
                BundleEntry::gzip_file(
                    "app.js",
                    include_bytes!("../assets/webui/app.js.gz"),
                    APP_JS_SIZE,
                ),
            ],
        ),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use filebundle::{FileBundle, OpenFlags};

    #[test]
    fn test_demo_app_js_inflates() {
        let fb = FileBundle::new(&DEMO);
        let js = fb.read("webui/app.js", OpenFlags::decompress()).unwrap();
        assert_eq!(js.len() as u64, APP_JS_SIZE);
        assert!(js.starts_with(b"// Demo script"));
    }

    #[test]
    fn test_demo_layout() {
        let names: Vec<_> = DEMO.children().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["README.txt", "webui"]);
    }
}
