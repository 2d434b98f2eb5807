//! Masking of API keys for log output.

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of length <= 11 become "***" so no part of them leaks.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}
