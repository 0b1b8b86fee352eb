//! Primary key generation.

use rand::RngExt;

/// URL-safe alphabet (64 symbols), so every character carries 6 bits.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of identifiers produced by [`new_id`] (~126 bits of entropy).
pub const ID_LEN: usize = 21;

/// Generate a short, URL-safe, collision-resistant identifier.
///
/// Used as the primary key of every row inserted without a caller-supplied key.
pub fn new_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
