//! Item → StorageRecord 序列化。
//!
//! 字段判定规则：规整后的值能解析为有限浮点数时写 `value_f`，否则原样写 `value_s`；
//! 规整后为空的值不产生记录。

use domain::{FieldValue, Item, StorageRecord};

/// 将单条读数转换为存储记录；空值返回 `None`（静默丢弃，不视为错误）。
pub fn serialize(item: &Item) -> Option<StorageRecord> {
    let value = normalize_value(&item.raw_value);
    if value.is_empty() {
        return None;
    }

    let fields = match parse_numeric(&value) {
        Some(number) => FieldValue::Float(number),
        None => FieldValue::String(value),
    };

    Some(StorageRecord::new(
        item.device_id.clone(),
        item.control_id.clone(),
        fields,
    ))
}

/// 换行符替换为空格。
pub fn normalize_value(raw: &str) -> String {
    raw.replace('\n', " ")
}

/// 数值解析：忽略首尾空白；NaN 与 ±inf 不算数值（行协议无法表示）。
///
/// 只接受十进制与科学计数写法，数字分隔符（`1_000`）与十六进制浮点不算数值。
pub fn parse_numeric(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
