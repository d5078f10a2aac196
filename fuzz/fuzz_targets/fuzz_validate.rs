#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are expected here; panics are not.
        if let Ok(record) = tcg_invoice::validate_str(s) {
            let _ = tcg_invoice::compute_totals(&record.items, &record.tax_rate);
        }
    }
});
