#![no_main]
use libfuzzer_sys::fuzz_target;
use treeline::Parser;

fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new(data);
    let _ = parser.parse_document();
});
