#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = std::io::Cursor::new(data);
    let _time_description = sdp_time::TimeDescription::unmarshal(&mut cursor);
});
