use crate::common::test_data::{KB32, KB64};
use crate::common::test_utils::{blank_image, fill};
use ecuscope::config::TUNE_SIZE;
use ecuscope::{analyze_space, Region, RomImage};

#[test]
fn blank_tunes_are_fully_leftover() {
    let image = RomImage::from_bytes(blank_image(KB64)).unwrap();
    for region in image.tune_regions(TUNE_SIZE) {
        let usage = analyze_space(image.as_bytes(), region);
        assert_eq!(usage.used_bytes, 0);
        assert_eq!(usage.leftover_bytes, KB32);
    }
}

#[test]
fn usage_counts_interior_padding_as_used() {
    let mut data = blank_image(KB32);
    fill(&mut data, 0, 0x100, 0x10);
    // a padding gap inside the used area still counts as used
    fill(&mut data, 0x200, 0x210, 0x20);
    let usage = analyze_space(&data, Region::new(0, KB32).unwrap());
    assert_eq!(usage.used_bytes, 0x210);
    assert_eq!(usage.leftover_bytes, KB32 - 0x210);
}

#[test]
fn fully_used_tune_has_no_leftover() {
    let mut data = blank_image(KB64);
    data[0x7FFF] = 0x00;
    let image = RomImage::from_bytes(data).unwrap();
    let regions = image.tune_regions(TUNE_SIZE);
    let first = analyze_space(image.as_bytes(), regions[0]);
    assert_eq!(first.used_bytes, KB32);
    assert_eq!(first.leftover_bytes, 0);
    assert_eq!(first.used_percent(), 100.0);

    let second = analyze_space(image.as_bytes(), regions[1]);
    assert_eq!(second.used_bytes, 0);
}

#[test]
fn used_plus_leftover_equals_region_length() {
    let mut data = blank_image(KB32);
    for i in (0..KB32).step_by(97) {
        data[i] = (i % 251) as u8;
    }
    for start in (0..KB32).step_by(1021) {
        for end in (start..=KB32).step_by(3067) {
            let region = Region::within(start, end, KB32).unwrap();
            let usage = analyze_space(&data, region);
            assert_eq!(usage.total(), region.len());
        }
    }
}
