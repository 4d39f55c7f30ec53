#![no_main]

use fcmkit_edit::runpath::ensure_runpath_in_document;
use fcmkit_pbxproj::Document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Ok(mut doc) = Document::parse(s) else { return };

    // Whatever parses must serialize back byte for byte.
    assert_eq!(doc.to_string(), s);

    ensure_runpath_in_document(&mut doc);
    let patched = doc.to_string();
    let _ = Document::parse(&patched);
});
