use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single raw input figure as delivered by the fetch layer.
///
/// Scraped figures arrive as numbers, numeric strings ("1,234.5", "12%"),
/// nulls, or garbage. Parsing never fails: anything that cannot be read as a
/// finite number is kept as `Invalid` so scorers can report "N/A" for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Metric {
    #[default]
    Missing,
    Value(f64),
    Invalid(String),
}

impl Metric {
    /// Parsed value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Parsed value, or `default` when missing or unparseable
    pub fn or(&self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }

    /// Like [`Metric::or`] but an explicit zero also falls back to `default`.
    /// Scrapers write 0 for "not found" on some ratios.
    pub fn or_if_zero(&self, default: f64) -> f64 {
        match self.value() {
            Some(v) if v != 0.0 => v,
            _ => default,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Metric::Invalid(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Metric::Missing)
    }

    /// Multiply a present value, leaving missing/invalid untouched
    pub fn scaled(&self, factor: f64) -> Metric {
        match self {
            Metric::Value(v) => Metric::Value(v * factor),
            other => other.clone(),
        }
    }

    pub fn from_json(value: &Value) -> Metric {
        match value {
            Value::Null => Metric::Missing,
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Metric::Value(v),
                _ => Metric::Invalid(n.to_string()),
            },
            Value::String(s) => Metric::parse(s),
            other => Metric::Invalid(other.to_string()),
        }
    }

    /// Lenient string parse: strips thousands separators, currency and
    /// percent markers, and a trailing crore suffix.
    pub fn parse(raw: &str) -> Metric {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Metric::Missing;
        }

        let mut cleaned: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ',' | '%' | '₹' | ' '))
            .collect();
        for suffix in ["Cr.", "Cr"] {
            if let Some(stripped) = cleaned.strip_suffix(suffix) {
                cleaned = stripped.to_string();
                break;
            }
        }
        if let Some(stripped) = cleaned.strip_prefix("Rs.") {
            cleaned = stripped.to_string();
        }

        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => Metric::Value(v),
            _ => Metric::Invalid(trimmed.to_string()),
        }
    }
}

impl From<f64> for Metric {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Metric::Value(v)
        } else {
            Metric::Invalid(v.to_string())
        }
    }
}

impl From<Option<f64>> for Metric {
    fn from(v: Option<f64>) -> Self {
        v.map(Metric::from).unwrap_or_default()
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Missing => serializer.serialize_none(),
            Metric::Value(v) => serializer.serialize_f64(*v),
            Metric::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Metric::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_and_decorated_numbers() {
        assert_eq!(Metric::parse("12.5"), Metric::Value(12.5));
        assert_eq!(Metric::parse(" 1,23,456 "), Metric::Value(123456.0));
        assert_eq!(Metric::parse("18.2%"), Metric::Value(18.2));
        assert_eq!(Metric::parse("₹ 2,450.10"), Metric::Value(2450.10));
        assert_eq!(Metric::parse("45,000 Cr."), Metric::Value(45000.0));
        assert_eq!(Metric::parse("-3.4"), Metric::Value(-3.4));
    }

    #[test]
    fn test_parse_garbage_is_invalid() {
        assert_eq!(Metric::parse("--"), Metric::Invalid("--".to_string()));
        assert!(Metric::parse("n/a").is_invalid());
        assert!(Metric::parse("").is_missing());
    }

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(Metric::from_json(&json!(null)), Metric::Missing);
        assert_eq!(Metric::from_json(&json!(7)), Metric::Value(7.0));
        assert_eq!(Metric::from_json(&json!("7.5")), Metric::Value(7.5));
        assert!(Metric::from_json(&json!(true)).is_invalid());
        assert!(Metric::from_json(&json!({"a": 1})).is_invalid());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Metric::Missing.or(2.0), 2.0);
        assert_eq!(Metric::Invalid("x".into()).or(1.0), 1.0);
        assert_eq!(Metric::Value(0.0).or(1.0), 0.0);
        assert_eq!(Metric::Value(0.0).or_if_zero(1.0), 1.0);
        assert_eq!(Metric::Value(0.4).or_if_zero(1.0), 0.4);
    }

    #[test]
    fn test_scaled_keeps_missing() {
        assert_eq!(Metric::Value(10.0).scaled(1.5), Metric::Value(15.0));
        assert_eq!(Metric::Missing.scaled(1.5), Metric::Missing);
    }
}
