use sha2::{Digest, Sha256};

/// Phone numbers never reach the logs in clear text.
///
/// Each number is replaced by the first 12 hex characters of its SHA-256
/// digest, which is stable across events so a single caller can still be
/// followed through the log stream.
pub fn number_fingerprint(number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(number.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("#{}", &digest[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_and_opaque() {
        let a = number_fingerprint("4155550101");
        let b = number_fingerprint("4155550101");
        assert_eq!(a, b);
        assert_eq!(a.len(), 13);
        assert!(!a.contains("4155550101"));
    }

    #[test]
    fn test_fingerprint_differs_per_number() {
        assert_ne!(
            number_fingerprint("4155550101"),
            number_fingerprint("4155550102")
        );
    }
}
