use crate::Number;
use serde_json::Value;

/// json_eq is deep equality of keyword values, under which numbers are equal
/// if their values are (`1 == 1.0`), and objects are equal if they have the
/// same properties with equal values.
pub fn json_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(lhs), Value::Number(rhs)) => Number::from(lhs) == Number::from(rhs),
        (Value::Array(lhs), Value::Array(rhs)) => {
            lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| json_eq(l, r))
        }
        (Value::Object(lhs), Value::Object(rhs)) => {
            lhs.len() == rhs.len()
                && lhs
                    .iter()
                    .all(|(prop, l)| rhs.get(prop).map_or(false, |r| json_eq(l, r)))
        }
        // Remaining scalars, and values of differing types.
        (lhs, rhs) => lhs == rhs,
    }
}
