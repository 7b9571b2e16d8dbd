#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let report = treeline::validate_jsonl(s);
        assert_eq!(
            report.total_lines,
            report.valid_lines + report.invalid_lines + report.empty_lines
        );
        assert_eq!(report.errors.len(), report.invalid_lines);
        assert_eq!(report.records.len(), report.valid_lines);
    }
});
