#![no_main]

use libfuzzer_sys::fuzz_target;
use well_known_bots::ValidateOptions;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let records = match well_known_bots::parse(&s) {
        Ok(r) => r,
        Err(_) => return,
    };

    // Must never panic, whatever shape or regex the records carry.
    let all = well_known_bots::validate_all(&records, &ValidateOptions::default());
    let first = well_known_bots::validate_all(
        &records,
        &ValidateOptions {
            fail_fast: true,
            ..ValidateOptions::default()
        },
    );

    // Fail-fast reports exactly the first aggregated diagnostic.
    match (all, first) {
        (Ok(_), Ok(_)) => {}
        (Err(all), Err(first)) => assert_eq!(first.as_slice(), &all[..1]),
        (all, first) => panic!("modes disagree: {:?} vs {:?}", all, first),
    }
});
