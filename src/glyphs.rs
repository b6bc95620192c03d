// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

/// The fixed rain alphabet: ASCII letters, a handful of accented letters,
/// digits, and punctuation. Hangul, katakana and other wide scripts are
/// left out; they render double-width and leave cruft behind the trails.
pub fn build_alphabet() -> Vec<char> {
    let mut out: Vec<char> = Vec::new();

    push_range(&mut out, 0x61, 0x7A); // a-z
    push_range(&mut out, 0x41, 0x5A); // A-Z
    out.extend("æäøöåÆÄØÖÅ".chars());
    push_range(&mut out, 0x30, 0x39); // 0-9
    out.extend("~©£€#$§%^&-+=()[]{}<>|;:,.?!`@*_'\\/\"".chars());

    out
}

/// Endless supply of display characters, each an independent uniform draw
/// from the fixed alphabet.
pub struct GlyphSource {
    chars: Vec<char>,
    dist: Uniform<usize>,
    rng: StdRng,
}

impl GlyphSource {
    pub fn new(rng: StdRng) -> Self {
        let chars = build_alphabet();
        let dist = Uniform::new_inclusive(0, chars.len() - 1).expect("valid range");
        Self { chars, dist, rng }
    }

    pub fn pick(&mut self) -> char {
        self.chars[self.dist.sample(&mut self.rng)]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;

    use super::*;

    #[test]
    fn alphabet_is_the_fixed_set() {
        let chars = build_alphabet();
        assert_eq!(chars.len(), 108);

        let unique: HashSet<char> = chars.iter().copied().collect();
        assert_eq!(unique.len(), chars.len());

        assert!(chars.contains(&'a'));
        assert!(chars.contains(&'Z'));
        assert!(chars.contains(&'ø'));
        assert!(chars.contains(&'0'));
        assert!(chars.contains(&'€'));
        assert!(!chars.contains(&' '));
    }

    #[test]
    fn picks_stay_inside_the_alphabet() {
        let alphabet: HashSet<char> = build_alphabet().into_iter().collect();
        let mut source = GlyphSource::new(StdRng::seed_from_u64(7));
        for _ in 0..500 {
            assert!(alphabet.contains(&source.pick()));
        }
    }

    #[test]
    fn same_seed_yields_the_same_sequence() {
        let mut a = GlyphSource::new(StdRng::seed_from_u64(42));
        let mut b = GlyphSource::new(StdRng::seed_from_u64(42));
        for _ in 0..100 {
            assert_eq!(a.pick(), b.pick());
        }
    }
}
