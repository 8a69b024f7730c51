use chrono::Utc;
use rand::Rng;

/// Prefix shared by every generated app key.
pub const KEY_PREFIX: &str = "apk";

/// Length of the random base36 suffix.
const SUFFIX_LEN: usize = 12;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh tracking key of the form `apk_<ms-epoch>_<random>`.
///
/// The millisecond timestamp plus a 12-character base36 suffix makes a
/// collision practically impossible; uniqueness is not checked against
/// existing keys before insert (the unique column constraint is the
/// backstop).
pub fn generate_app_key() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}_{}_{}", KEY_PREFIX, Utc::now().timestamp_millis(), suffix)
}

/// Check whether a string matches the generated key format
/// (`apk_<digits>_<base36>`).
pub fn is_valid_app_key(key: &str) -> bool {
    let mut parts = key.splitn(3, '_');
    let (Some(prefix), Some(millis), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == KEY_PREFIX
        && !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && !suffix.is_empty()
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_match_the_documented_format() {
        for _ in 0..100 {
            let key = generate_app_key();
            assert!(is_valid_app_key(&key), "bad key: {key}");
            let suffix = key.rsplit('_').next().unwrap();
            assert_eq!(suffix.len(), SUFFIX_LEN);
        }
    }

    #[test]
    fn generated_keys_are_distinct() {
        let a = generate_app_key();
        let b = generate_app_key();
        assert_ne!(a, b);
    }

    #[test]
    fn validation_accepts_short_suffixes() {
        // Older clients generated 9-character suffixes.
        assert!(is_valid_app_key("apk_1700000000000_a1b2c3d4e"));
        assert!(is_valid_app_key("apk_1_abc"));
    }

    #[test]
    fn validation_rejects_malformed_keys() {
        assert!(!is_valid_app_key(""));
        assert!(!is_valid_app_key("apk"));
        assert!(!is_valid_app_key("apk_abc_123"));
        assert!(!is_valid_app_key("key_1700000000000_a1b2c3"));
        assert!(!is_valid_app_key("apk_1700000000000_"));
        assert!(!is_valid_app_key("apk_1700000000000_ABCDEF"));
    }
}
