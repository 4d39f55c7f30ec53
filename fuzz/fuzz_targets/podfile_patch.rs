#![no_main]

use arbitrary::Arbitrary;
use fcmkit_edit::podfile::{validate_sdk_version, with_firebase_version, with_post_install};
use fcmkit_types::PluginVars;
use fcmkit_types::vars::IOS_STRIP_DEBUG;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    podfile: &'a str,
    version: &'a str,
    strip_debug: bool,
}

fuzz_target!(|input: Input<'_>| {
    let vars: PluginVars = [(IOS_STRIP_DEBUG, input.strip_debug.to_string())]
        .into_iter()
        .collect();

    let patched = with_post_install(input.podfile, &vars);
    if let Some(text) = &patched {
        // A second pass never adds another block.
        assert!(with_post_install(text, &vars).is_none());
    }

    if validate_sdk_version(input.version).is_ok() {
        let base = patched.as_deref().unwrap_or(input.podfile);
        let _ = with_firebase_version(base, input.version);
    }
});
