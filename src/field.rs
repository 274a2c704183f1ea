//! Field names and dynamically-typed field values.

use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// One of the three shared configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BackendUrl,
    TimeSpanMinutes,
    ShowOrigins,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::BackendUrl, Field::TimeSpanMinutes, Field::ShowOrigins];

    /// camelCase name used in logs and console output.
    pub fn name(self) -> &'static str {
        match self {
            Field::BackendUrl => "backendUrl",
            Field::TimeSpanMinutes => "timeSpanMinutes",
            Field::ShowOrigins => "showOrigins",
        }
    }

    /// Type of value the field holds.
    pub fn kind(self) -> ValueKind {
        match self {
            Field::BackendUrl => ValueKind::Text,
            Field::TimeSpanMinutes => ValueKind::Integer,
            Field::ShowOrigins => ValueKind::Flag,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts camelCase, snake_case and kebab-case spellings, case-insensitively.
impl FromStr for Field {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "backendurl" => Ok(Field::BackendUrl),
            "timespanminutes" | "timespanmin" | "timespan" => Ok(Field::TimeSpanMinutes),
            "showorigins" => Ok(Field::ShowOrigins),
            _ => Err(ConfigError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Flag,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Flag => "boolean",
        })
    }
}

/// A field value whose type is only known at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl FieldValue {
    /// Type of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Integer(_) => ValueKind::Integer,
            FieldValue::Flag(_) => ValueKind::Flag,
        }
    }

    /// Reads console text as a value for `field`.
    ///
    /// Text is taken verbatim, including the empty string. No range or
    /// format checks are made beyond what the type requires.
    pub fn parse_for(field: Field, input: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            input: input.to_string(),
            kind: field.kind(),
        };
        match field.kind() {
            ValueKind::Text => Ok(FieldValue::Text(input.to_string())),
            ValueKind::Integer => input
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| invalid()),
            ValueKind::Flag => match input.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(FieldValue::Flag(true)),
                "false" | "no" | "off" | "0" => Ok(FieldValue::Flag(false)),
                _ => Err(invalid()),
            },
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{text:?}"),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_spellings() {
        for input in ["backendUrl", "backend_url", "backend-url", "BACKENDURL"] {
            assert_eq!(input.parse::<Field>(), Ok(Field::BackendUrl));
        }
        assert_eq!("timeSpanMin".parse::<Field>(), Ok(Field::TimeSpanMinutes));
        assert_eq!("show_origins".parse::<Field>(), Ok(Field::ShowOrigins));
        assert_eq!(
            "origins".parse::<Field>(),
            Err(ConfigError::UnknownField("origins".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for field in Field::ALL {
            assert_eq!(field.to_string().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn test_parse_accepts_anything_of_the_right_type() {
        assert_eq!(
            FieldValue::parse_for(Field::BackendUrl, "not a url"),
            Ok(FieldValue::Text("not a url".to_string()))
        );
        assert_eq!(
            FieldValue::parse_for(Field::BackendUrl, ""),
            Ok(FieldValue::Text(String::new()))
        );
        assert_eq!(
            FieldValue::parse_for(Field::TimeSpanMinutes, "-15"),
            Ok(FieldValue::Integer(-15))
        );
        assert_eq!(
            FieldValue::parse_for(Field::TimeSpanMinutes, "0"),
            Ok(FieldValue::Integer(0))
        );
        assert_eq!(
            FieldValue::parse_for(Field::ShowOrigins, "Off"),
            Ok(FieldValue::Flag(false))
        );
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert_eq!(
            FieldValue::parse_for(Field::TimeSpanMinutes, "an hour"),
            Err(ConfigError::InvalidValue {
                input: "an hour".to_string(),
                kind: ValueKind::Integer,
            })
        );
        assert!(FieldValue::parse_for(Field::ShowOrigins, "maybe").is_err());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(FieldValue::from("http://a").to_string(), "\"http://a\"");
        assert_eq!(FieldValue::from(60).to_string(), "60");
        assert_eq!(FieldValue::from(true).to_string(), "true");
    }
}
