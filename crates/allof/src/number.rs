use std::cmp::Ordering;

/// `Number` holds the possible numeric representations of a JSON keyword value.
/// Numbers are totally ordered across representations, so that a `minimum`
/// of `5` and one of `5.0` compare as equal.
#[derive(Debug, Copy, Clone)]
pub enum Number {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}
use Number::*;

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(n) = n.as_u64() {
            Unsigned(n)
        } else if let Some(n) = n.as_i64() {
            Signed(n)
        } else {
            // serde_json numbers which are neither u64 nor i64 are always finite f64.
            Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl Number {
    /// Returns the Number of a JSON value, if it is one.
    pub fn of(value: &serde_json::Value) -> Option<Number> {
        match value {
            serde_json::Value::Number(n) => Some(Number::from(n)),
            _ => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Float(_))
    }

    /// Returns true if `self` is an integral multiple of `d`.
    pub fn is_multiple_of(&self, d: &Self) -> bool {
        match (*self, *d) {
            (_, Unsigned(0)) | (_, Signed(0)) => false,
            (Unsigned(n), Unsigned(d)) => n % d == 0,
            (Signed(n), Signed(d)) => (n as i128) % (d as i128) == 0,
            (Unsigned(n), Signed(d)) => (n as i128) % (d as i128) == 0,
            (Signed(n), Unsigned(d)) => (n as i128) % (d as i128) == 0,
            (n, d) => {
                let (n, d) = (n.as_f64(), d.as_f64());
                d != 0.0 && (n / d).fract() == 0.0
            }
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Unsigned(n) => n as f64,
            Signed(n) => n as f64,
            Float(n) => n,
        }
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Unsigned(lhs), Unsigned(rhs)) => lhs.cmp(&rhs),
            (Signed(lhs), Signed(rhs)) => lhs.cmp(&rhs),
            (Unsigned(lhs), Signed(rhs)) => (lhs as i128).cmp(&(rhs as i128)),
            (Signed(lhs), Unsigned(rhs)) => (lhs as i128).cmp(&(rhs as i128)),
            (lhs, rhs) => f64_cmp(lhs.as_f64(), rhs.as_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Number {}

// NaN can't be produced by a parsed JSON document, but we order it
// below every other value rather than panic.
fn f64_cmp(lhs: f64, rhs: f64) -> Ordering {
    lhs.partial_cmp(&rhs).unwrap_or_else(|| match (lhs.is_nan(), rhs.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        _ => Ordering::Greater,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn num(v: serde_json::Value) -> Number {
        Number::of(&v).unwrap()
    }

    #[test]
    fn test_number_conversion() {
        assert!(matches!(num(json!(1234)), Unsigned(1234)));
        assert!(matches!(num(json!(-1234)), Signed(-1234)));
        assert!(matches!(num(json!(12.5)), Float(f) if f == 12.5));
        assert!(Number::of(&json!("12")).is_none());
    }

    #[test]
    fn test_cross_representation_ordering() {
        assert_eq!(num(json!(5)), num(json!(5.0)));
        assert_eq!(num(json!(-5)), num(json!(-5.0)));
        assert!(num(json!(-1)) < num(json!(0)));
        assert!(num(json!(-1)) < num(json!(u64::MAX)));
        assert!(num(json!(2.5)) > num(json!(2)));
        assert!(num(json!(-2.5)) < num(json!(-2)));
    }

    #[test]
    fn test_multiple_of() {
        assert!(num(json!(10)).is_multiple_of(&num(json!(5))));
        assert!(num(json!(-10)).is_multiple_of(&num(json!(5))));
        assert!(num(json!(1.5)).is_multiple_of(&num(json!(0.5))));
        assert!(!num(json!(10)).is_multiple_of(&num(json!(3))));
        assert!(!num(json!(10)).is_multiple_of(&num(json!(0))));
    }
}
