use rand::Rng;

/// 32 cryptographically random bytes, hex encoded. Used for project API
/// keys, invitation tokens, session ids and password reset tokens.
/// Collisions are not retried; 256 bits makes them astronomically unlikely.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
