use rand::Rng;

/// Generates an alphanumeric secret of the given length. Used for
/// `Store` API secrets and appointment confirmation tokens.
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_secret_of_given_length() {
        for len in [0, 1, 16, 30].iter() {
            assert_eq!(create_random_secret(*len).len(), *len);
        }
    }

    #[test]
    fn it_creates_distinct_secrets() {
        assert_ne!(create_random_secret(30), create_random_secret(30));
    }
}
