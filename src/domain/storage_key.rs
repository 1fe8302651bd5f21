// src/domain/storage_key.rs
use crate::domain::DomainError;

pub const MAX_KEY_LEN: usize = 1024;

/// Reject keys the object store would refuse or misinterpret as paths
pub fn validate_storage_key(key: &str) -> Result<(), DomainError> {
    let reason = if key.is_empty() {
        Some("empty key")
    } else if key.len() > MAX_KEY_LEN {
        Some("key too long")
    } else if key.starts_with('/') {
        Some("leading slash")
    } else if key.split('/').any(|segment| segment == "..") {
        Some("parent directory segment")
    } else if key.chars().any(char::is_control) {
        Some("control character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidStorageKey(format!("{key:?}: {reason}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("img1.png")]
    #[case("photos/cat 1.jpg")]
    #[case("a..b.png")]
    fn given_valid_key_when_validating_then_accepts(#[case] key: &str) {
        assert!(validate_storage_key(key).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("/etc/passwd")]
    #[case("../secret.png")]
    #[case("a/../b.png")]
    #[case("line\nbreak.png")]
    fn given_invalid_key_when_validating_then_rejects(#[case] key: &str) {
        assert!(matches!(
            validate_storage_key(key),
            Err(DomainError::InvalidStorageKey(_))
        ));
    }

    #[test]
    fn given_oversized_key_when_validating_then_rejects() {
        let key = "a".repeat(MAX_KEY_LEN + 1);

        assert!(validate_storage_key(&key).is_err());
    }
}
