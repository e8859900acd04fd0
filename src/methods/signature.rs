/// Signature the checkout gateway attaches to a successful payment: a keyed
/// blake3 hash of `"{order_id}|{payment_id}"`, hex encoded.
pub fn sign_payment(secret: &[u8; 32], order_id: &str, payment_id: &str) -> String {
    let payload = format!("{}|{}", order_id, payment_id);
    blake3::keyed_hash(secret, payload.as_bytes()).to_hex().to_string()
}

pub fn verify_payment_signature(secret: &[u8; 32], order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(raw) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(raw) = <[u8; 32]>::try_from(raw.as_slice()) else {
        return false;
    };
    let payload = format!("{}|{}", order_id, payment_id);
    // blake3::Hash equality is constant time.
    blake3::keyed_hash(secret, payload.as_bytes()) == blake3::Hash::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn signed_payment_verifies() {
        let sig = sign_payment(&SECRET, "order_1", "pay_1");
        assert_eq!(sig.len(), 64);
        assert!(verify_payment_signature(&SECRET, "order_1", "pay_1", &sig));
    }

    #[test]
    fn tampered_payment_fails() {
        let sig = sign_payment(&SECRET, "order_1", "pay_1");
        assert!(!verify_payment_signature(&SECRET, "order_1", "pay_2", &sig));
        assert!(!verify_payment_signature(&[8u8; 32], "order_1", "pay_1", &sig));
        assert!(!verify_payment_signature(&SECRET, "order_1", "pay_1", "not-hex"));
        assert!(!verify_payment_signature(&SECRET, "order_1", "pay_1", "abcd"));
    }
}
