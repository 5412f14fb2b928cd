use bridge_normalize::serialize;
use domain::{FieldValue, Item, MEASUREMENT, Origin};

fn sample_item(raw_value: &str) -> Item {
    Item {
        origin: Origin::new("client-1"),
        device_id: "dev42".to_string(),
        control_id: "ctrl7".to_string(),
        raw_value: raw_value.to_string(),
    }
}

#[test]
fn numeric_value_becomes_value_f() {
    for (raw, expected) in [("23.5", 23.5), ("-0", 0.0), ("1e3", 1000.0), ("12.3", 12.3)] {
        let record = serialize(&sample_item(raw)).expect("record");
        assert_eq!(record.fields, FieldValue::Float(expected), "raw={raw}");
        assert_eq!(record.fields.key(), "value_f");
    }
}

#[test]
fn non_numeric_value_becomes_value_s() {
    for raw in ["ON", "3,5", "inf", "NaN", "  "] {
        let record = serialize(&sample_item(raw)).expect("record");
        assert_eq!(record.fields, FieldValue::String(raw.to_string()), "raw={raw}");
        assert!(record.fields.as_f64().is_none());
    }
}

#[test]
fn newline_is_normalized_before_typing() {
    let record = serialize(&sample_item("hello\nworld")).expect("record");
    assert_eq!(record.fields, FieldValue::String("hello world".to_string()));

    // 规整后仍可解析为数值
    let record = serialize(&sample_item("12\n")).expect("record");
    assert_eq!(record.fields, FieldValue::Float(12.0));
}

#[test]
fn empty_value_is_dropped() {
    assert!(serialize(&sample_item("")).is_none());
}

#[test]
fn record_carries_tags_and_measurement() {
    let record = serialize(&sample_item("12.3")).expect("record");
    assert_eq!(record.measurement, MEASUREMENT);
    assert_eq!(record.tags.device_id, "dev42");
    assert_eq!(record.tags.control_id, "ctrl7");
}

#[test]
fn digit_separators_stay_strings() {
    let record = serialize(&sample_item("1_000")).expect("record");
    assert_eq!(record.fields, FieldValue::String("1_000".to_string()));
}
