#![no_main]

use verreq::{Requirement, Version};

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if s.chars().all(|s| !s.is_control()) {
            let _ = Version::parse(s);
            if let Ok(requirement) = Requirement::parse(s) {
                // the canonical form must always parse back
                let again = Requirement::parse(requirement.to_string());
                assert_eq!(again.ok(), Some(requirement));
            }
        }
    }
});
