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

//! Generic types shared by the domain models of any service.

/// Validation errors raised when constructing model types from untrusted data.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Validates that the untrusted `value` for the `field` is at most `max_length` characters long.
pub fn check_max_length(field: &str, value: &str, max_length: usize) -> ModelResult<()> {
    if value.chars().count() > max_length {
        return Err(ModelError(format!("{} cannot be longer than {} characters", field, max_length)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_max_length_ok() {
        check_max_length("city", "", 3).unwrap();
        check_max_length("city", "abc", 3).unwrap();
        check_max_length("city", "éçñ", 3).unwrap();
    }

    #[test]
    fn test_check_max_length_too_long() {
        assert_eq!(
            ModelError("city cannot be longer than 3 characters".to_owned()),
            check_max_length("city", "abcd", 3).unwrap_err()
        );
        assert!(check_max_length("city", "éçñü", 3).is_err());
    }
}
