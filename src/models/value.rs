//! Helpers for reading loosely typed JSON coming back from Kea.

use serde_json::{Map, Value};

/// A JSON value that counts as "set": not null, false, zero or empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// First of `keys` whose value in `obj` is truthy.
pub fn first_truthy<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| is_truthy(v))
}

/// Non-negative count from a JSON number. Floats are truncated, negatives clamp to 0.
pub fn as_count(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(u) = n.as_u64() {
        Some(u)
    } else if let Some(i) = n.as_i64() {
        Some(i.max(0) as u64)
    } else {
        n.as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc().max(0.0) as u64)
    }
}

/// Like [`as_count`], but also accepts numeric strings such as `"42"` or `"4.0"`.
pub fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Some(i.max(0) as u64)
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc().max(0.0) as u64)
            }
        }
        _ => as_count(value),
    }
}

/// Text form of a subnet id: integers without a fraction, strings verbatim.
pub fn subnet_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 && f.abs() < 1e15 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!("0")));
    }

    #[test]
    fn test_first_truthy_order() {
        let obj = json!({"value": 0, "sum": 7, "count": 9});
        let obj = obj.as_object().unwrap();
        assert_eq!(first_truthy(obj, &["value", "sum", "count"]), Some(&json!(7)));
        assert_eq!(first_truthy(obj, &["missing"]), None);
    }

    #[test]
    fn test_as_count() {
        assert_eq!(as_count(&json!(12)), Some(12));
        assert_eq!(as_count(&json!(-3)), Some(0));
        assert_eq!(as_count(&json!(7.9)), Some(7));
        assert_eq!(as_count(&json!("12")), None);
        assert_eq!(as_count(&json!(true)), None);
    }

    #[test]
    fn test_parse_count_strings() {
        assert_eq!(parse_count(&json!("12")), Some(12));
        assert_eq!(parse_count(&json!(" 4.0 ")), Some(4));
        assert_eq!(parse_count(&json!("n/a")), None);
    }

    #[test]
    fn test_subnet_key() {
        assert_eq!(subnet_key(&json!(5)), Some("5".to_string()));
        assert_eq!(subnet_key(&json!(5.0)), Some("5".to_string()));
        assert_eq!(subnet_key(&json!("12")), Some("12".to_string()));
        assert_eq!(subnet_key(&json!(null)), None);
        assert_eq!(subnet_key(&json!("")), None);
    }
}
