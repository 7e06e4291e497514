#![no_main]
use libfuzzer_sys::fuzz_target;

// First half is the catalog JSON, second half the image bytes.
fuzz_target!(|data: &[u8]| {
    let (catalog, image) = data.split_at(data.len() / 2);
    let Ok(text) = std::str::from_utf8(catalog) else {
        return;
    };
    if let Ok(schema) = ecuscope::DefinitionSchema::from_json_str(text) {
        for resolved in ecuscope::resolve(image, &schema) {
            let _ = ecuscope::interpret(&resolved).to_string();
        }
    }
});
