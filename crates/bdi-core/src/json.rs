//! JSON helpers shared by beliefs, goals and desires.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// JavaScript-style truthiness of a JSON value.
///
/// `false`, `null`, `0` and `""` are falsy; every array and object (even an empty one) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Same as [`is_truthy`], treating a missing value as falsy.
pub fn is_truthy_opt(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Convert arbitrary data into a JSON value and check that it survives a round trip.
///
/// Returns the best-effort value together with a description of what went wrong, if anything.
/// Data that cannot be serialized at all yields `null`.
pub fn round_trip<T>(data: &T) -> (Value, Option<String>)
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let value = match serde_json::to_value(data) {
        Ok(value) => value,
        Err(err) => return (Value::Null, Some(err.to_string())),
    };

    match serde_json::from_value::<T>(value.clone()) {
        Ok(back) if back == *data => (value, None),
        Ok(_) => (value, Some("value changes when converted to JSON".to_string())),
        Err(err) => (value, Some(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_javascript() {
        for falsy in [json!(false), json!(null), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("no"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
        assert!(!is_truthy_opt(None));
    }

    #[test]
    fn round_trip_flags_lossy_data() {
        let (value, issue) = round_trip(&vec![1, 2, 3]);
        assert_eq!(value, json!([1, 2, 3]));
        assert!(issue.is_none());

        let (value, issue) = round_trip(&f64::NAN);
        assert_eq!(value, Value::Null);
        assert!(issue.is_some());
    }
}
