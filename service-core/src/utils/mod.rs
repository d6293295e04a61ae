use subtle::ConstantTimeEq;

/// Compare a presented secret with the expected one in constant time.
///
/// Length mismatch returns early; only the length leaks.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();

    if presented.len() != expected.len() {
        return false;
    }

    presented.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_secrets_match() {
        assert!(secrets_match("s3cret-token", "s3cret-token"));
    }

    #[test]
    fn different_secrets_do_not_match() {
        assert!(!secrets_match("s3cret-tokem", "s3cret-token"));
        assert!(!secrets_match("s3cret", "s3cret-token"));
        assert!(!secrets_match("", "s3cret-token"));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!secrets_match("S3CRET-TOKEN", "s3cret-token"));
    }
}
