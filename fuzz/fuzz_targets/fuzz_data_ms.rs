#![no_main]

use gcms_data::formats::agilent::AgilentReader;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail with an error, never panic.
    // Offsets and counts come straight from the input, so this also covers
    // huge scan counts and records pointing past the end of the file.
    let _ = AgilentReader::new().read_from(Cursor::new(data), "fuzz");
});
