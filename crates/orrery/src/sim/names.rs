//! Catalogue-style display names: three letters, a dash, four digits.

use rand::Rng;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draw a name like `KXB-4821`.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut name = String::with_capacity(8);
    for _ in 0..3 {
        name.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
    }
    name.push('-');
    name.push_str(&format!("{:04}", rng.gen_range(0..10_000)));
    name
}
