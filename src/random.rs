//! Random values for stubs and synthesized identifiers.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HEX: &[u8] = b"0123456789abcdef";
const LOWER_ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const UPPER_ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DIGITS: &[u8] = b"0123456789";

/// Character sets used by identifier patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Hex,
    LowerAlnum,
    UpperAlnum,
    Alnum,
    Digits,
}

/// Owns the RNG for one run. Seeded sources replay the same sequence.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self {
                rng: StdRng::from_os_rng(),
            },
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn string(&mut self, charset: Charset, len: usize) -> String {
        let table = match charset {
            Charset::Hex => HEX,
            Charset::LowerAlnum => LOWER_ALNUM,
            Charset::UpperAlnum => UPPER_ALNUM,
            Charset::Digits => DIGITS,
            Charset::Alnum => return self.alphanumeric(len),
        };
        (0..len)
            .map(|_| char::from(table[self.rng.random_range(0..table.len())]))
            .collect()
    }

    pub fn alphanumeric(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    pub fn hex(&mut self, len: usize) -> String {
        self.string(Charset::Hex, len)
    }

    pub fn digits(&mut self, len: usize) -> String {
        self.string(Charset::Digits, len)
    }

    pub fn number(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }

    /// Random (version 4) UUID in its hyphenated lowercase form.
    pub fn uuid(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        hex = { Charset::Hex, "0123456789abcdef" },
        lower = { Charset::LowerAlnum, "abcdefghijklmnopqrstuvwxyz0123456789" },
        upper = { Charset::UpperAlnum, "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789" },
        digits = { Charset::Digits, "0123456789" },
    )]
    fn test_string_respects_charset(charset: Charset, allowed: &str) {
        let mut random = RandomSource::seeded(1);
        let value = random.string(charset, 64);
        assert_eq!(value.len(), 64);
        assert!(value.chars().all(|c| allowed.contains(c)), "{value}");
    }

    #[test]
    fn test_alphanumeric() {
        let mut random = RandomSource::seeded(2);
        let value = random.alphanumeric(20);
        assert_eq!(value.len(), 20);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_uuid_shape() {
        let mut random = RandomSource::seeded(3);
        let uuid = random.uuid();
        let groups: Vec<&str> = uuid.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(groups[2].starts_with('4'));
        assert!(matches!(&groups[3][..1], "8" | "9" | "a" | "b"));
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomSource::seeded(99);
        let mut b = RandomSource::seeded(99);
        assert_eq!(a.uuid(), b.uuid());
        assert_eq!(a.alphanumeric(12), b.alphanumeric(12));
        assert_eq!(a.number(1, 1000), b.number(1, 1000));
    }

    #[test]
    fn test_number_in_range() {
        let mut random = RandomSource::new(None);
        for _ in 0..100 {
            let n = random.number(5, 7);
            assert!((5..=7).contains(&n));
        }
    }
}
