#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let tables = ecuscope::find_tables(data);
    for pair in tables.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
    for table in &tables {
        assert!(table.len() >= 16 && table.end <= data.len());
    }
    let region = ecuscope::Region::new(0, data.len()).unwrap();
    let usage = ecuscope::analyze_space(data, region);
    assert_eq!(usage.total(), data.len());
});
