use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FRAGMENT_LEN: usize = 13;

fn fragment(rng: &mut impl Rng) -> String {
    (0..FRAGMENT_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates an opaque transaction id: two independent random base-36
/// fragments. Collision-improbable, no stronger uniqueness guarantee.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let mut id = fragment(&mut rng);
    id.push_str(&fragment(&mut rng));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_length_and_charset() {
        let id = generate();
        assert_eq!(id.len(), FRAGMENT_LEN * 2);
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_no_collisions_in_small_batch() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
