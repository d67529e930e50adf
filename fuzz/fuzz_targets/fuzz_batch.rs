#![no_main]

//! Protocol fuzzer.
//!
//! Feeds arbitrary bytes as batch commands to a small game. Malformed input
//! must be answered with `ERROR` lines, never a panic or a fatal error.

use std::io::Read;

use gamma::batch::{LineReader, read_setup, run_batch};
use libfuzzer_sys::fuzz_target;

/// Fixed initial line; arbitrary board sizes would only exercise allocation.
const HEADER: &[u8] = b"B 8 8 4 2\n";

fuzz_target!(|data: &[u8]| {
    let mut lines = LineReader::new(HEADER.chain(data));
    let mut out = Vec::new();
    let mut err = Vec::new();

    let Ok(Some((_, mut board))) = read_setup(&mut lines, &mut out, &mut err) else {
        panic!("header did not start a game");
    };
    assert!(run_batch(&mut board, &mut lines, &mut out, &mut err).is_ok());
});
