use crate::common::sample_file_path;
use crate::common::test_data::{KB32, SAMPLE_DEFINITIONS};
use crate::common::test_utils::blank_image;
use ecuscope::definitions::{
    resolve_with_diagnostics, DiagnosticReason, DefinitionSchema, Interpretation,
    InterpretedValue, SeriesEntry,
};
use ecuscope::io::IOLimits;
use ecuscope::{interpret, resolve};

fn sample_schema() -> DefinitionSchema {
    DefinitionSchema::from_json_file(sample_file_path(SAMPLE_DEFINITIONS), IOLimits::default())
        .unwrap()
}

fn sample_image() -> Vec<u8> {
    let mut data = blank_image(KB32);
    data[0x1A] = 0xFF;
    data[0x2B] = 0x00;
    data[0x2C] = 0x00;
    data[0x2D] = 0x90;
    for i in 0..12 {
        data[0x100 + i] = 0x20 + i as u8;
    }
    for i in 0..160 {
        data[0x400 + i] = i as u8;
    }
    data[0x7FFA..].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
    data
}

#[test]
fn sample_catalog_resolves_in_document_order() {
    let schema = sample_schema();
    let resolution = resolve_with_diagnostics(&sample_image(), &schema);
    let routes: Vec<&str> = resolution
        .definitions
        .iter()
        .map(|d| d.route.as_str())
        .collect();
    assert_eq!(
        routes,
        vec![
            "vtecEnable",
            "launch:enable",
            "launch:rpm",
            "idleTargets",
            "fuelMap",
            "tail"
        ]
    );
    assert_eq!(resolution.diagnostics.len(), 1);
    assert_eq!(resolution.diagnostics[0].route, "broken");
    assert_eq!(
        resolution.diagnostics[0].reason,
        DiagnosticReason::InvalidAddress
    );
}

#[test]
fn resolved_bytes_match_the_image() {
    let data = sample_image();
    for def in resolve(&data, &sample_schema()) {
        let end = (def.offset + def.byte_length()).min(data.len());
        assert_eq!(def.raw_bytes, &data[def.offset..end], "{}", def.route);
    }
}

#[test]
fn sample_values_interpret_by_length() {
    let data = sample_image();
    let resolved = resolve(&data, &sample_schema());
    let values: Vec<Interpretation> = resolved.iter().map(interpret).collect();

    assert_eq!(
        values[0],
        Interpretation::Value(InterpretedValue::Flag { enabled: true })
    );
    assert_eq!(
        values[1],
        Interpretation::Value(InterpretedValue::Flag { enabled: false })
    );
    assert_eq!(
        values[2],
        Interpretation::Series(vec![
            SeriesEntry {
                address: 0x2C,
                value: InterpretedValue::RawByte { value: 0 }
            },
            SeriesEntry {
                address: 0x2D,
                value: InterpretedValue::ScaledValue {
                    raw: 0x90,
                    scaled: 7200.0
                }
            },
        ])
    );

    let Interpretation::Value(InterpretedValue::ByteGrid { columns, rows }) = &values[3] else {
        panic!("idle targets should be a grid");
    };
    assert_eq!(*columns, 12);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][11], Some(0x2B));

    let Interpretation::Value(fuel) = &values[4] else {
        panic!("fuel map should be a grid");
    };
    let InterpretedValue::ByteGrid { columns, rows } = fuel else {
        panic!("fuel map should be a grid");
    };
    assert_eq!(*columns, 10);
    assert_eq!(rows.len(), 16);
    assert_eq!(rows[15][9], Some(159));
    assert_eq!(fuel.missing_cells(), 0);
}

#[test]
fn field_past_image_end_marks_missing_cells() {
    let data = sample_image();
    let resolved = resolve(&data, &sample_schema());
    let tail = resolved.iter().find(|d| d.route == "tail").unwrap();
    assert!(tail.is_truncated());
    assert_eq!(tail.raw_bytes, vec![1, 2, 3, 4, 5, 6]);

    let Interpretation::Value(InterpretedValue::ByteGrid { columns, rows }) = interpret(tail)
    else {
        panic!("tail should be a grid");
    };
    assert_eq!(columns, 10);
    assert_eq!(
        rows,
        vec![vec![
            Some(1),
            Some(2),
            Some(3),
            Some(4),
            Some(5),
            Some(6),
            None,
            None,
            None,
            None
        ]]
    );
}

#[test]
fn single_byte_field_past_end_is_absent() {
    let schema = DefinitionSchema::from_json_str(
        r#"{"late": {"address": "8000", "bytes": 1, "description": "", "notes": ""}}"#,
    )
    .unwrap();
    let resolved = resolve(&blank_image(KB32), &schema);
    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].raw_bytes.is_empty());
    assert_eq!(interpret(&resolved[0]), Interpretation::Absent);
}
