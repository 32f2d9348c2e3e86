//! Mock password generation. Not suitable for real credentials.

use rand::seq::index;

/// Sampling alphabet. The doubled `d` is intentional, it keeps the pool at 27
/// symbols so repeated letters can still appear in a sample.
pub const ALPHABET: &[u8] = b"abcdedfghijklmnopqrstuvwxyz";

/// Length of every generated password.
pub const PASSWORD_LENGTH: usize = 10;

/// Generate a password by sampling [`PASSWORD_LENGTH`] positions of
/// [`ALPHABET`] without replacement.
pub fn random_password() -> String {
    let mut rng = rand::rng();

    index::sample(&mut rng, ALPHABET.len(), PASSWORD_LENGTH)
        .iter()
        .map(|idx| ALPHABET[idx] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_password_is_ten_lowercase_letters() {
        for _ in 0..100 {
            let password = random_password();
            assert_eq!(password.len(), PASSWORD_LENGTH);
            assert!(password.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn only_d_can_repeat() {
        for _ in 0..100 {
            let password = random_password();
            for c in password.chars().filter(|c| *c != 'd') {
                assert_eq!(password.matches(c).count(), 1, "{password}");
            }
        }
    }
}
