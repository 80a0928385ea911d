use std::env::VarError;

pub fn get_env_var(key: &str) -> Result<String, VarError> {
    std::env::var(key)
}

/// Returns `None` when the variable is unset, and an error only when it holds invalid unicode.
pub fn get_env_var_optional(key: &str) -> Result<Option<String>, VarError> {
    match get_env_var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_env_var_distinguishes_unset_from_set() {
        std::env::set_var("CUBE_UTILS_TEST_PRESENT", "value");
        std::env::remove_var("CUBE_UTILS_TEST_ABSENT");

        assert_eq!(get_env_var_optional("CUBE_UTILS_TEST_PRESENT").unwrap().as_deref(), Some("value"));
        assert_eq!(get_env_var_optional("CUBE_UTILS_TEST_ABSENT").unwrap(), None);
    }
}
