//! Random selection helpers.
//!
//! Every function takes the random source as a parameter so callers (and
//! tests) decide whether it is `thread_rng`, a seeded `StdRng` or a fixed
//! `StepRng` sequence.

use rand::Rng;

const MAX_SCRAMBLE_ATTEMPTS: usize = 16;

/// Fisher-Yates shuffle into a new vector; `items` is left untouched
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Uniformly random element, `None` for an empty slice
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.gen_range(0..items.len())])
    }
}

/// Uniformly random element among those satisfying `pred`
pub fn pick_where<'a, T, R, F>(items: &'a [T], pred: F, rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> bool,
{
    let matching: Vec<&T> = items.iter().filter(|item| pred(item)).collect();
    pick(&matching, rng).copied()
}

/// Permutes the characters of `word` so the result differs from the input.
///
/// Words shorter than two characters, or made of a single repeated
/// character, cannot differ and are returned as is.
pub fn scramble_letters<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 || chars.iter().all(|&c| c == chars[0]) {
        return word.to_string();
    }

    for _ in 0..MAX_SCRAMBLE_ATTEMPTS {
        let candidate: String = shuffle(&chars, rng).into_iter().collect();
        if candidate != word {
            return candidate;
        }
    }

    // a one-step rotation only equals the input when every char is the same
    let mut rotated = chars;
    rotated.rotate_left(1);
    rotated.into_iter().collect()
}
