use crate::common::test_data::{KB32, ROW};
use crate::common::test_utils::{blank_image, fill, row_pattern};
use ecuscope::analysis::tables::find_tables_with;
use ecuscope::config::TableScanConfig;
use ecuscope::find_tables;

#[test]
fn separated_blocks_become_separate_tables() {
    let mut data = blank_image(KB32);
    fill(&mut data, 0x1000, 0x1100, 0x40);
    fill(&mut data, 0x2000, 0x2040, 0x41);
    fill(&mut data, 0x3000, 0x3008, 0x42);

    let tables = find_tables(&data);
    let spans: Vec<(usize, usize)> = tables.iter().map(|t| (t.start, t.end)).collect();
    // the 8-byte block occupies a full row, so it meets the 16-byte minimum
    assert_eq!(
        spans,
        vec![(0x1000, 0x1100), (0x2000, 0x2040), (0x3000, 0x3010)]
    );
    assert_eq!(tables[2].column_count, 8);
}

#[test]
fn gap_of_two_rows_merges_gap_of_three_splits() {
    let merged = row_pattern(&[true, false, false, true], ROW);
    assert_eq!(find_tables(&merged).len(), 1);

    let split = row_pattern(&[true, false, false, false, true], ROW);
    let tables = find_tables(&split);
    assert_eq!(tables.len(), 2);
    assert_eq!((tables[0].start, tables[0].end), (0, 16));
    assert_eq!((tables[1].start, tables[1].end), (64, 80));
}

#[test]
fn tables_are_ordered_and_disjoint() {
    let mut data = blank_image(KB32);
    for (i, start) in (0..KB32).step_by(0x400).enumerate() {
        let len = 0x10 * (1 + i % 5);
        fill(&mut data, start, start + len, i as u8);
    }
    let tables = find_tables(&data);
    assert!(!tables.is_empty());
    for pair in tables.windows(2) {
        assert!(pair[0].start < pair[1].start);
        assert!(pair[0].end <= pair[1].start);
    }
    for table in &tables {
        assert!(table.len() >= 16);
        assert_eq!(table.start % ROW, 0);
        assert_eq!(table.end % ROW, 0);
    }
}

#[test]
fn table_open_at_end_of_image_runs_to_end() {
    let mut data = blank_image(KB32);
    fill(&mut data, KB32 - 0x30, KB32 - 0x20, 0x01);
    let tables = find_tables(&data);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].end, KB32);
}

#[test]
fn wider_rows_change_the_grid() {
    let mut data = blank_image(256);
    fill(&mut data, 0, 40, 0x33);
    let cfg = TableScanConfig {
        row_size: 32,
        ..TableScanConfig::default()
    };
    let tables = find_tables_with(&data, &cfg, 0xFF);
    assert_eq!(tables.len(), 1);
    assert_eq!((tables[0].start, tables[0].end), (0, 64));
    assert_eq!(tables[0].column_count, 32);
    assert_eq!(tables[0].rows(&data, 32)[1][7], Some(0x33));
    assert_eq!(tables[0].rows(&data, 32)[1][8], Some(0xFF));
}
