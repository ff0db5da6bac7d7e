#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = dds::decode_config(data) else {
        return;
    };
    // keep allocations sane for the fuzzer
    if config.width > 1024 || config.height > 1024 {
        return;
    }
    let _ = dds::decode(data);
});
