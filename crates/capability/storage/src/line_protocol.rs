//! InfluxDB 行协议编码
//!
//! 行格式：
//! ```text
//! measurement,tag1=val1,tag2=val2 field=value
//! ```
//!
//! 不写时间戳，由服务端按接收时间落点。

use domain::{FieldValue, StorageRecord};

/// 编码单条记录（不含换行）。
pub fn encode_record(record: &StorageRecord) -> String {
    let mut line = escape_measurement(record.measurement);

    // tag 按 key 字典序排列（control_id < device_id）
    line.push_str(",control_id=");
    line.push_str(&escape_tag(&record.tags.control_id));
    line.push_str(",device_id=");
    line.push_str(&escape_tag(&record.tags.device_id));

    line.push(' ');
    line.push_str(record.fields.key());
    line.push('=');
    line.push_str(&field_value(&record.fields));
    line
}

/// 编码一批记录，按行拼接。
pub fn encode_batch(records: &[StorageRecord]) -> String {
    records
        .iter()
        .map(encode_record)
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(v) => format!("{}", v),
        FieldValue::String(v) => {
            let escaped = v.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{}\"", escaped)
        }
    }
}

/// measurement 中的逗号与空格需转义。
fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

/// tag 值转义：先转义反斜杠，再转义逗号、等号、空格；换行写成 `\n`，保证一条记录一行。
fn escape_tag(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
        .replace('\n', "\\n")
}
