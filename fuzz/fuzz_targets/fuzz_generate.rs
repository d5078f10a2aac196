#![no_main]

use libfuzzer_sys::fuzz_target;
use tcg_invoice::{RenderConfig, price, validate_str};
use tcg_invoice::pdf::render_invoice;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that validates and prices must also render.
        if let Ok(invoice) = validate_str(s).and_then(price) {
            render_invoice(&invoice, &RenderConfig::default()).expect("priced invoice must render");
        }
    }
});
