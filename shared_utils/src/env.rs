use std::str::FromStr;

use thiserror::Error;

/// Errors raised while reading settings from the process environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The variable is set but its value cannot be parsed into the expected type.
    #[error("Invalid value for environment variable {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// Reads an optional environment variable.
///
/// Unset variables and variables holding only whitespace both map to `None`,
/// so an empty `FOO=` line in a `.env` file does not override a default.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses an optional environment variable.
pub fn parse_optional_env_var<T: FromStr>(name: &str) -> Result<Option<T>, EnvError> {
    match get_optional_env_var(name) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| EnvError::InvalidValue {
                name: name.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn blank_optional_variable_is_none() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_BLANK", "   ") };
        assert_eq!(get_optional_env_var("SHARED_UTILS_TEST_BLANK"), None);
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_BLANK") };
    }

    #[test]
    #[serial]
    fn parse_optional_reports_bad_values() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_NUM", "12") };
        assert_eq!(parse_optional_env_var::<u32>("SHARED_UTILS_TEST_NUM").unwrap(), Some(12));

        unsafe { std::env::set_var("SHARED_UTILS_TEST_NUM", "twelve") };
        assert!(matches!(
            parse_optional_env_var::<u32>("SHARED_UTILS_TEST_NUM"),
            Err(EnvError::InvalidValue { .. })
        ));
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_NUM") };
    }
}
