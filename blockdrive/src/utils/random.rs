use uuid::Uuid;

/// Returns `length` random lowercase hex characters, taken from a fresh v4 UUID.
///
/// At most 32 characters are available; longer requests are capped.
pub fn random_suffix(length: usize) -> String {
    let mut s = Uuid::new_v4().simple().to_string();
    s.truncate(length);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffix() {
        let s = random_suffix(4);
        assert_eq!(s.len(), 4);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(random_suffix(100).len(), 32);
    }
}
