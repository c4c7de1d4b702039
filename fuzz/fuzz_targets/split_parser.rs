#![no_main]

use id_splits::split::Split;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Must never panic; anything accepted is a usable split
        if let Ok(split) = Split::from_json(input) {
            assert!(split.levels() >= 1);
            assert!(split.parts().iter().all(|&p| p >= 1));
        }
    }
});
