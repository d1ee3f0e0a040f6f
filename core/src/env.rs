// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Utilities to read configuration from environment variables.

use std::env;
use std::time::Duration;

/// Result type for this module, where errors are human-readable descriptions.
type Result<T> = std::result::Result<T, String>;

/// Raw value of an environment variable, pending conversion to its final type.
pub struct Value(String);

impl TryFrom<Value> for String {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        Ok(value.0)
    }
}

impl TryFrom<Value> for bool {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value.0.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(format!("Invalid bool: '{}' is not one of true/false/yes/no/1/0", value.0)),
        }
    }
}

impl TryFrom<Value> for Duration {
    type Error = String;

    /// Parses durations of the form `<n>ms`, `<n>s` or `<n>m`.
    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        let raw = value.0.trim();
        let (number, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
            Some(pos) => raw.split_at(pos),
            None => return Err(format!("Invalid Duration: '{}' is missing a unit", raw)),
        };
        let number = number
            .parse::<u64>()
            .map_err(|e| format!("Invalid Duration: bad quantity in '{}': {}", raw, e))?;
        match unit {
            "ms" => Ok(Duration::from_millis(number)),
            "s" => Ok(Duration::from_secs(number)),
            "m" => match number.checked_mul(60) {
                Some(secs) => Ok(Duration::from_secs(secs)),
                None => Err(format!("Invalid Duration: quantity too large in '{}'", raw)),
            },
            unit => Err(format!("Invalid Duration: unknown unit '{}' in '{}'", unit, raw)),
        }
    }
}

/// Implements the conversion from a `Value` to a type `$t` that implements `FromStr`.
macro_rules! tryfrom_value_for_fromstr [
    ( $t:ty ) => {
        impl TryFrom<Value> for $t {
            type Error = String;

            fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
                value.0.parse::<$t>().map_err(|e| format!("Invalid {}: {}", stringify!($t), e))
            }
        }
    }
];

tryfrom_value_for_fromstr!(i32);
tryfrom_value_for_fromstr!(i64);
tryfrom_value_for_fromstr!(u16);
tryfrom_value_for_fromstr!(u32);
tryfrom_value_for_fromstr!(u64);
tryfrom_value_for_fromstr!(usize);

/// Gets the value of the environment variable `<prefix>_<suffix>` and converts it to type `T`, or
/// returns `None` if the variable is not set.
pub fn get_optional_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<Option<T>> {
    let name = format!("{}_{}", prefix, suffix);
    match env::var(&name) {
        Ok(value) => match Value(value).try_into() {
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(format!("Invalid type in environment variable {}: {}", name, e)),
        },
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(format!("Invalid value in environment variable {}", name))
        }
    }
}

/// Gets the value of the environment variable `<prefix>_<suffix>` and converts it to type `T`,
/// failing if the variable is not set.
pub fn get_required_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<T> {
    match get_optional_var(prefix, suffix)? {
        Some(value) => Ok(value),
        None => Err(format!("Required environment variable {}_{} not present", prefix, suffix)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_string() {
        assert_eq!("foo bar", &TryInto::<String>::try_into(Value("foo bar".to_owned())).unwrap());
    }

    #[test]
    fn test_value_to_fromstr() {
        assert_eq!(1234u16, TryInto::<u16>::try_into(Value("1234".to_owned())).unwrap());

        let err = TryInto::<u16>::try_into(Value("-1".to_owned())).unwrap_err();
        assert!(err.starts_with("Invalid u16:"));
    }

    #[test]
    fn test_value_to_bool() {
        for raw in ["1", "true", "TRUE", "yes"] {
            assert!(TryInto::<bool>::try_into(Value(raw.to_owned())).unwrap());
        }
        for raw in ["0", "false", "No"] {
            assert!(!TryInto::<bool>::try_into(Value(raw.to_owned())).unwrap());
        }
        let err = TryInto::<bool>::try_into(Value("maybe".to_owned())).unwrap_err();
        assert!(err.starts_with("Invalid bool:"));
    }

    #[test]
    fn test_value_to_duration_ok() {
        let parse = |s: &str| TryInto::<Duration>::try_into(Value(s.to_owned())).unwrap();
        assert_eq!(Duration::from_millis(250), parse("250ms"));
        assert_eq!(Duration::from_secs(10), parse("10s"));
        assert_eq!(Duration::from_secs(120), parse("2m"));
    }

    #[test]
    fn test_value_to_duration_errors() {
        let parse = |s: &str| TryInto::<Duration>::try_into(Value(s.to_owned())).unwrap_err();
        assert!(parse("10").contains("missing a unit"));
        assert!(parse("s").contains("bad quantity"));
        assert!(parse("3h").contains("unknown unit 'h'"));
        assert!(parse(&format!("{}m", u64::MAX)).contains("quantity too large"));
    }

    #[test]
    fn test_get_optional_var_ok() {
        temp_env::with_var("PREFIX_OPTIONAL", Some("5s"), || {
            assert_eq!(
                Some(Duration::from_secs(5)),
                get_optional_var::<Duration>("PREFIX", "OPTIONAL").unwrap()
            );
        });
    }

    #[test]
    fn test_get_optional_var_missing() {
        temp_env::with_var_unset("PREFIX_ABSENT", || {
            assert_eq!(None, get_optional_var::<u32>("PREFIX", "ABSENT").unwrap());
        });
    }

    #[test]
    fn test_get_required_var_ok() {
        temp_env::with_var("PREFIX_PRESENT", Some("1234"), || {
            assert_eq!("1234", &get_required_var::<String>("PREFIX", "PRESENT").unwrap());
        });
    }

    #[test]
    fn test_get_required_var_missing() {
        temp_env::with_var_unset("PREFIX_MISSING", || {
            assert_eq!(
                "Required environment variable PREFIX_MISSING not present",
                &get_required_var::<String>("PREFIX", "MISSING").unwrap_err()
            );
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_get_required_var_not_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        temp_env::with_var("PREFIX_INVALID", Some(OsStr::from_bytes(b"\xc3\x28")), || {
            assert_eq!(
                "Invalid value in environment variable PREFIX_INVALID",
                &get_required_var::<String>("PREFIX", "INVALID").unwrap_err()
            );
        });
    }

    #[test]
    fn test_get_required_var_bad_type() {
        temp_env::with_var("PREFIX_BAD", Some("b4d"), || {
            let err = get_required_var::<u16>("PREFIX", "BAD").unwrap_err();
            assert!(err.starts_with("Invalid type in environment variable PREFIX_BAD: Invalid u16"));
        });
    }
}
