#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let once = match well_known_bots::format::generate(&s) {
        Ok(t) => t,
        Err(_) => return,
    };

    // Canonical output must itself be canonical.
    if let Err(e) = well_known_bots::format::check_format(&once) {
        panic!(
            "generate produced non-canonical text: {}\nInput (lossy): {:?}",
            e,
            s.get(..200).unwrap_or(&s),
        );
    }
});
