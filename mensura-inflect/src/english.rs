//! English noun pluralization for unit names
//!
//! # Rules, in order
//! - Invariant words stay as they are (hertz, lux, horsepower)
//! - Irregular words use their table form (foot → feet)
//! - s, x, z, ch, sh endings take "es" (inch → inches)
//! - consonant + y becomes "ies" (century → centuries)
//! - everything else takes "s"
//!
//! Phrases inflect their head word: the last word before " per ", " of " or
//! " to the ", skipping postpositive modifiers such as "Celsius".

use crate::Inflector;
use std::collections::HashMap;
use std::sync::LazyLock;

// =============================================================================
// Word Tables
// =============================================================================

/// Words whose plural equals the singular
const INVARIANT: &[&str] = &[
    "hertz", "lux", "siemens", "horsepower", "celsius", "fahrenheit", "rankine",
    "sheep", "fish", "deer", "series", "species", "aircraft", "equipment",
];

/// Endings that make any word invariant (kilohertz, millilux)
const INVARIANT_SUFFIXES: &[&str] = &["hertz", "lux", "siemens", "horsepower"];

/// Modifiers that follow their noun: "degree Celsius", "pound-force"
const POSTPOSITIVE: &[&str] = &["celsius", "fahrenheit", "rankine", "réaumur", "force"];

/// Connectors that end the head of a phrase
const CONNECTORS: &[&str] = &[" per ", " of ", " to the "];

static IRREGULAR: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("foot", "feet"),
        ("tooth", "teeth"),
        ("goose", "geese"),
        ("man", "men"),
        ("woman", "women"),
        ("child", "children"),
        ("person", "people"),
        ("mouse", "mice"),
        ("louse", "lice"),
        ("ox", "oxen"),
        ("datum", "data"),
        ("quantum", "quanta"),
        ("maximum", "maxima"),
        ("minimum", "minima"),
        ("radius", "radii"),
        ("focus", "foci"),
        ("index", "indices"),
        ("matrix", "matrices"),
        ("axis", "axes"),
        ("basis", "bases"),
        ("crisis", "crises"),
        ("analysis", "analyses"),
        ("calf", "calves"),
        ("half", "halves"),
        ("knife", "knives"),
        ("leaf", "leaves"),
        ("life", "lives"),
        ("loaf", "loaves"),
        ("shelf", "shelves"),
        ("wife", "wives"),
        ("wolf", "wolves"),
    ]
    .into_iter()
    .collect()
});

// =============================================================================
// Inflector
// =============================================================================

/// English inflector for unit names
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Inflector for English {
    fn plural(&self, noun: &str) -> String {
        // "per second" has no head noun to inflect
        if noun.starts_with("per ") {
            return noun.to_string();
        }

        let head_end = CONNECTORS
            .iter()
            .filter_map(|c| noun.find(c))
            .min()
            .unwrap_or(noun.len());

        let (head, tail) = noun.split_at(head_end);
        format!("{}{}", pluralize_head(head), tail)
    }
}

/// Pluralize the last noun of a modifier + noun group ("square foot", "degree Celsius")
fn pluralize_head(group: &str) -> String {
    let words: Vec<&str> = group.split(' ').collect();

    // Walk back over postpositive modifiers to the noun itself
    let mut index = words.len();
    while index > 0 {
        index -= 1;
        if !is_postpositive(words[index]) || index == 0 {
            break;
        }
    }

    let Some(word) = words.get(index) else {
        return group.to_string();
    };

    let mut out: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    out[index] = pluralize_compound(word);
    out.join(" ")
}

/// "pound-force" → "pounds-force"; plain words go straight to `pluralize_word`
fn pluralize_compound(word: &str) -> String {
    match word.rsplit_once('-') {
        Some((noun, modifier)) if is_postpositive(modifier) && !noun.is_empty() => {
            format!("{}-{}", pluralize_word(noun), modifier)
        }
        _ => pluralize_word(word),
    }
}

fn is_postpositive(word: &str) -> bool {
    let lower = word.to_lowercase();
    POSTPOSITIVE.contains(&lower.as_str())
}

/// Pluralize a single word, keeping a leading capital
pub(crate) fn pluralize_word(word: &str) -> String {
    if word.is_empty() || !word.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'') {
        return word.to_string();
    }

    let lower = word.to_lowercase();

    if INVARIANT.contains(&lower.as_str()) || INVARIANT_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return word.to_string();
    }

    if let Some(plural) = IRREGULAR.get(lower.as_str()) {
        return match_capital(word, plural);
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{}es", word);
    }

    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{}ies", stem);
        }
    }

    format!("{}s", word)
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Copy the capitalisation of `original`'s first letter onto `replacement`
fn match_capital(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut chars = replacement.chars();
            match chars.next() {
                Some(head) => head.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => replacement.to_string(),
    }
}
