#![no_main]
//! Floor division against i64::div_euclid for every input

use std::num::NonZeroU32;

use glkdate_core::{expand, simplify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (i64, u32, i32)| {
    let (secs, factor, simple) = input;
    if let Some(f) = NonZeroU32::new(factor) {
        let expected = secs.div_euclid(factor as i64) as i32;
        assert_eq!(simplify(secs, f), expected);
    }
    let _ = expand(simple, factor);
});
