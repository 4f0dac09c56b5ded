//! Porter stemmer
//!
//! Implements the Porter suffix-stripping algorithm with the NLTK extensions
//! enabled, which is what the training vocabulary was produced with:
//!
//! - a pool of irregular forms (`dying` -> `die`, `skies` -> `sky`, ...)
//! - words of one or two letters are returned unchanged
//! - `ies`/`ied` special cases for four-letter words in step 1
//! - a two-letter vowel-consonant word counts as `*o` (CVC) in step 1b
//! - `alli` is reduced recursively and `fulli`/`logi` are added to step 2
//!
//! The stemmer works on ASCII bytes. Callers pass tokens that have already
//! been reduced to letters; anything else is rejected with an error.

use rustc_hash::FxHashMap;

use crate::core::error::{Result, SentimentError};

/// Irregular forms mapped to their stems
const IRREGULAR_FORMS: &[(&str, &[&str])] = &[
    ("sky", &["sky", "skies"]),
    ("die", &["dying"]),
    ("lie", &["lying"]),
    ("tie", &["tying"]),
    ("news", &["news"]),
    ("inning", &["innings", "inning"]),
    ("outing", &["outings", "outing"]),
    ("canning", &["cannings", "canning"]),
    ("howe", &["howe"]),
    ("proceed", &["proceed"]),
    ("exceed", &["exceed"]),
    ("succeed", &["succeed"]),
];

type Condition = fn(&str) -> bool;

/// `(suffix, replacement, condition on the remaining stem)`
type Rule = (&'static str, &'static str, Option<Condition>);

const STEP1A_RULES: &[Rule] = &[
    ("sses", "ss", None),
    ("ies", "i", None),
    ("ss", "ss", None),
    ("s", "", None),
];

const STEP1C_RULES: &[Rule] = &[("y", "i", Some(ends_with_consonant))];

const STEP2_RULES: &[Rule] = &[
    ("ational", "ate", Some(has_positive_measure)),
    ("tional", "tion", Some(has_positive_measure)),
    ("enci", "ence", Some(has_positive_measure)),
    ("anci", "ance", Some(has_positive_measure)),
    ("izer", "ize", Some(has_positive_measure)),
    ("bli", "ble", Some(has_positive_measure)),
    ("alli", "al", Some(has_positive_measure)),
    ("entli", "ent", Some(has_positive_measure)),
    ("eli", "e", Some(has_positive_measure)),
    ("ousli", "ous", Some(has_positive_measure)),
    ("ization", "ize", Some(has_positive_measure)),
    ("ation", "ate", Some(has_positive_measure)),
    ("ator", "ate", Some(has_positive_measure)),
    ("alism", "al", Some(has_positive_measure)),
    ("iveness", "ive", Some(has_positive_measure)),
    ("fulness", "ful", Some(has_positive_measure)),
    ("ousness", "ous", Some(has_positive_measure)),
    ("aliti", "al", Some(has_positive_measure)),
    ("iviti", "ive", Some(has_positive_measure)),
    ("biliti", "ble", Some(has_positive_measure)),
    ("fulli", "ful", Some(has_positive_measure)),
    // the 'l' of 'logi' stays with the stem so short stems like 'geo' qualify
    ("logi", "log", Some(has_positive_measure_with_l)),
];

const STEP3_RULES: &[Rule] = &[
    ("icate", "ic", Some(has_positive_measure)),
    ("ative", "", Some(has_positive_measure)),
    ("alize", "al", Some(has_positive_measure)),
    ("iciti", "ic", Some(has_positive_measure)),
    ("ical", "ic", Some(has_positive_measure)),
    ("ful", "", Some(has_positive_measure)),
    ("ness", "", Some(has_positive_measure)),
];

const STEP4_RULES: &[Rule] = &[
    ("al", "", Some(measure_gt_1)),
    ("ance", "", Some(measure_gt_1)),
    ("ence", "", Some(measure_gt_1)),
    ("er", "", Some(measure_gt_1)),
    ("ic", "", Some(measure_gt_1)),
    ("able", "", Some(measure_gt_1)),
    ("ible", "", Some(measure_gt_1)),
    ("ant", "", Some(measure_gt_1)),
    ("ement", "", Some(measure_gt_1)),
    ("ment", "", Some(measure_gt_1)),
    ("ent", "", Some(measure_gt_1)),
    ("ion", "", Some(ion_condition)),
    ("ou", "", Some(measure_gt_1)),
    ("ism", "", Some(measure_gt_1)),
    ("ate", "", Some(measure_gt_1)),
    ("iti", "", Some(measure_gt_1)),
    ("ous", "", Some(measure_gt_1)),
    ("ive", "", Some(measure_gt_1)),
    ("ize", "", Some(measure_gt_1)),
];

const STEP5B_RULES: &[Rule] = &[("ll", "l", Some(measure_gt_1_with_l))];

/// Porter stemmer in NLTK-extensions mode
#[derive(Debug, Clone)]
pub struct PorterStemmer {
    pool: FxHashMap<&'static str, &'static str>,
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl PorterStemmer {
    pub fn new() -> Self {
        let pool = IRREGULAR_FORMS
            .iter()
            .flat_map(|(stem, forms)| forms.iter().map(move |form| (*form, *stem)))
            .collect();
        Self { pool }
    }

    /// Stem a single token
    ///
    /// The token is lowercased first. Tokens containing anything other than
    /// ASCII letters are rejected.
    pub fn stem(&self, word: &str) -> Result<String> {
        if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(SentimentError::Text {
                message: "only ASCII letters can be stemmed".to_string(),
                word: word.to_string(),
            });
        }

        let word = word.to_ascii_lowercase();

        if let Some(stem) = self.pool.get(word.as_str()) {
            return Ok((*stem).to_string());
        }

        if word.len() <= 2 {
            return Ok(word);
        }

        let word = step1a(&word);
        let word = step1b(&word);
        let word = apply_rules(&word, STEP1C_RULES);
        let word = step2(&word);
        let word = apply_rules(&word, STEP3_RULES);
        let word = apply_rules(&word, STEP4_RULES);
        let word = step5a(&word);
        let word = apply_rules(&word, STEP5B_RULES);

        Ok(word)
    }
}

/// Apply the first rule whose suffix matches.
///
/// A matching suffix ends the search even when its condition fails.
fn apply_rules(word: &str, rules: &[Rule]) -> String {
    for (suffix, replacement, condition) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            return match condition {
                Some(check) if !check(stem) => word.to_string(),
                _ => format!("{}{}", stem, replacement),
            };
        }
    }
    word.to_string()
}

fn step1a(word: &str) -> String {
    if word.len() == 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{}ie", stem);
        }
    }
    apply_rules(word, STEP1A_RULES)
}

fn step1b(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ied") {
        let replacement = if word.len() == 4 { "ie" } else { "i" };
        return format!("{}{}", stem, replacement);
    }

    if let Some(stem) = word.strip_suffix("eed") {
        return if measure(stem) > 0 {
            format!("{}ee", stem)
        } else {
            word.to_string()
        };
    }

    let Some(stem) = ["ed", "ing"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix).filter(|stem| contains_vowel(stem)))
    else {
        return word.to_string();
    };

    for (suffix, replacement) in [("at", "ate"), ("bl", "ble"), ("iz", "ize")] {
        if let Some(base) = stem.strip_suffix(suffix) {
            return format!("{}{}", base, replacement);
        }
    }

    if ends_double_consonant(stem) {
        let last = stem.as_bytes()[stem.len() - 1];
        return if matches!(last, b'l' | b's' | b'z') {
            stem.to_string()
        } else {
            stem[..stem.len() - 1].to_string()
        };
    }

    if measure(stem) == 1 && ends_cvc(stem) {
        return format!("{}e", stem);
    }

    stem.to_string()
}

fn step2(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("alli") {
        if has_positive_measure(stem) {
            return step2(&format!("{}al", stem));
        }
    }
    apply_rules(word, STEP2_RULES)
}

fn step5a(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('e') {
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_string();
        }
    }
    word.to_string()
}

fn is_consonant(word: &[u8], i: usize) -> bool {
    match word[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// Number of vowel-to-consonant transitions, the `m` of `[C](VC)^m[V]`
fn measure(stem: &str) -> usize {
    let bytes = stem.as_bytes();
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..bytes.len() {
        let consonant = is_consonant(bytes, i);
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn contains_vowel(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    (0..bytes.len()).any(|i| !is_consonant(bytes, i))
}

fn ends_double_consonant(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && is_consonant(bytes, n - 1)
}

/// `*o`: consonant-vowel-consonant ending where the last is not w, x or y
fn ends_cvc(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    (n >= 3
        && is_consonant(bytes, n - 3)
        && !is_consonant(bytes, n - 2)
        && is_consonant(bytes, n - 1)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y'))
        || (n == 2 && !is_consonant(bytes, 0) && is_consonant(bytes, 1))
}

fn has_positive_measure(stem: &str) -> bool {
    measure(stem) > 0
}

fn has_positive_measure_with_l(stem: &str) -> bool {
    measure(&format!("{}l", stem)) > 0
}

fn measure_gt_1(stem: &str) -> bool {
    measure(stem) > 1
}

fn measure_gt_1_with_l(stem: &str) -> bool {
    measure(&format!("{}l", stem)) > 1
}

fn ends_with_consonant(stem: &str) -> bool {
    stem.len() > 1 && is_consonant(stem.as_bytes(), stem.len() - 1)
}

fn ion_condition(stem: &str) -> bool {
    measure(stem) > 1 && matches!(stem.as_bytes().last(), Some(b's' | b't'))
}
