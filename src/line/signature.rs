use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Header carrying the webhook body signature
pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(channel_secret: &str, body: &[u8]) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(mac)
}

/// Computes the base64 HMAC-SHA256 signature of `body`
pub fn compute_signature(channel_secret: &str, body: &[u8]) -> Option<String> {
    let mac = keyed_mac(channel_secret, body)?;
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verify a LINE webhook signature (`X-Line-Signature`).
/// Returns true if the signature is valid, false otherwise.
/// See: <https://developers.line.biz/en/docs/messaging-api/receiving-messages/#verify-signature>
pub fn verify_signature(channel_secret: &str, body: &[u8], signature_header: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature_header.trim()) else {
        return false;
    };

    let Some(mac) = keyed_mac(channel_secret, body) else {
        return false;
    };

    // Constant-time comparison
    mac.verify_slice(&expected).is_ok()
}
