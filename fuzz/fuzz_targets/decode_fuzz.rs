//! Decoder fuzz target: arbitrary bytes must never panic the decoder, and a
//! successful decode must consume between 1 and len bytes.
//! Lines are also pushed through the rewriter when they are valid UTF-8.
//! Build with: cargo fuzz run decode_fuzz -- -max_len=1000000 (requires nightly and cargo fuzz).
//! The large max_len lets inputs reach past the nesting cap.

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    if let Ok(d) = gotype_demangle::decode(data) {
        assert!(d.consumed > 0 && d.consumed <= data.len());
    }
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = gotype_demangle::rewrite_line(s);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run decode_fuzz");
}
