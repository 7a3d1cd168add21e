//! Globally unique identifiers in the compressed 22-character form.

use uuid::Uuid;

const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Fresh random identifier.
pub fn new_guid() -> String {
    compress(Uuid::new_v4())
}

/// Encode 128 bits as 22 base-64 digits; the first digit carries 2 bits.
pub fn compress(id: Uuid) -> String {
    let n = id.as_u128();
    (0..22)
        .map(|i| {
            let shift = 6 * (21 - i);
            ALPHABET[((n >> shift) & 0x3f) as usize] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_form_is_22_chars() {
        let g = new_guid();
        assert_eq!(g.len(), 22);
        assert!(g.bytes().all(|b| ALPHABET.contains(&b)));
        assert!(matches!(g.as_bytes()[0], b'0'..=b'3'));
    }

    #[test]
    fn known_values() {
        assert_eq!(compress(Uuid::nil()), "0".repeat(22));
        assert_eq!(compress(Uuid::from_u128(u128::MAX)), format!("3{}", "$".repeat(21)));
    }

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(new_guid(), new_guid());
    }
}
