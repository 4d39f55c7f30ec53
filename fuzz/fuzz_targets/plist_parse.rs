#![no_main]

use fcmkit_edit::plist::{Plist, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Ok(mut plist) = Plist::parse(s) else { return };

    if let Some(dict) = plist.dict_mut() {
        dict.set("FirebaseMessagingAutoInitEnabled", Value::Boolean(false));
    }
    let xml = plist.to_xml();
    let _ = Plist::parse(&xml);
});
