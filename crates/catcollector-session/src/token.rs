use rand::RngExt;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a session token in characters.
pub const SESSION_TOKEN_LEN: usize = 48;

/// Generate an opaque alphanumeric session token.
pub fn generate_session_token() -> String {
    let mut rng = rand::rng();
    (0..SESSION_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Whether `value` has the shape of a token produced by [`generate_session_token`].
pub fn is_well_formed(value: &str) -> bool {
    value.len() == SESSION_TOKEN_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric())
}
