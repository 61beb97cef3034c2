use rand::RngCore;
use secrecy::Secret;

pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

const REFRESH_TOKEN_BYTES: usize = 40;
const RESET_TOKEN_BYTES: usize = 32;

/// Opaque refresh token: random bytes, hex encoded. Stored server-side
/// against the user, one active token per account.
pub fn generate_refresh_token() -> Secret<String> {
    Secret::from(random_hex(REFRESH_TOKEN_BYTES))
}

/// Password-reset token handed out by the reset-link flow.
pub fn generate_reset_token() -> String {
    random_hex(RESET_TOKEN_BYTES)
}

fn random_hex(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
