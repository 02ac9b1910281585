#![no_main]

use libfuzzer_sys::fuzz_target;
use pickaxe_git::{RECORD_SEPARATOR, extract_evidence, parse_log};

fuzz_target!(|data: &[u8]| {
    for record in parse_log(data, RECORD_SEPARATOR) {
        for line in extract_evidence(&record.diff_body, "+") {
            assert!(line.raw_line.starts_with('+') && !line.raw_line.starts_with("+++"));
        }
    }
});
