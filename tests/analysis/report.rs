use crate::common::sample_file_path;
use crate::common::test_data::{KB64, SAMPLE_DEFINITIONS};
use crate::common::test_utils::{blank_image, fill};
use ecuscope::definitions::DefinitionSchema;
use ecuscope::io::IOLimits;
use ecuscope::{analyze, render_text, AnalysisConfig, RenderOptions, RomImage, RomSize};

fn image() -> RomImage {
    let mut data = blank_image(KB64);
    fill(&mut data, 0x0000, 0x0080, 0x10);
    data[0x1A] = 0xFF;
    fill(&mut data, 0x0400, 0x04A0, 0x30);
    fill(&mut data, 0x8000, 0x9000, 0x40);
    RomImage::from_bytes(data).unwrap()
}

#[test]
fn report_covers_all_three_analyses() {
    let schema =
        DefinitionSchema::from_json_file(sample_file_path(SAMPLE_DEFINITIONS), IOLimits::default())
            .unwrap();
    let image = image();
    let report = analyze(&image, &schema, &AnalysisConfig::default());

    assert_eq!(report.image_size, RomSize::Kb64);
    assert_eq!(report.tunes.len(), 2);
    assert_eq!(report.tunes[0].usage.used_bytes, 0x04A0);
    assert_eq!(report.tunes[1].usage.used_bytes, 0x1000);

    let spans: Vec<(usize, usize)> = report.tables.iter().map(|t| (t.start, t.end)).collect();
    assert_eq!(spans, vec![(0, 0x80), (0x400, 0x4A0), (0x8000, 0x9000)]);

    // on a 64KB image the tail block is fully inside the image
    let tail = report
        .definitions
        .iter()
        .find(|d| d.resolved.route == "tail")
        .unwrap();
    assert!(!tail.resolved.is_truncated());
    assert_eq!(report.definitions.len(), 6);
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn analysis_is_deterministic() {
    let schema =
        DefinitionSchema::from_json_file(sample_file_path(SAMPLE_DEFINITIONS), IOLimits::default())
            .unwrap();
    let image = image();
    let config = AnalysisConfig::default();
    let first = analyze(&image, &schema, &config);
    let second = analyze(&image, &schema, &config);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn empty_catalog_still_reports_space_and_tables() {
    let image = image();
    let report = analyze(&image, &DefinitionSchema::default(), &AnalysisConfig::default());
    assert!(report.definitions.is_empty());
    assert_eq!(report.tables.len(), 3);

    let text = render_text(&report, &image, &RenderOptions::default());
    assert!(text.contains("Tune 1 (0x0000 - 0x7FFF):"));
    assert!(text.contains("Identified Definitions:"));
    assert!(!text.contains("Skipped definitions"));
}
