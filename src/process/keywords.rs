// src/process/keywords.rs

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,]|\n\n|\n").unwrap());
static INLINE_PERIOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w\.\w").unwrap());
static MAC_MC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([Mm]c|MC)(\w.+)").unwrap());

/// Words kept lowercase unless they open or close the phrase.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "of", "on", "or", "the",
    "to", "v", "v.", "via", "vs", "vs.",
];

/// Turn an FM export keyword cell into the OER form: one `|`-separated list
/// of title-cased keywords.
///
/// Keywords may be separated by commas, semicolons, or single/double
/// newlines, in any mix. Empty entries are dropped and keywords written
/// entirely in capitals (acronyms like `U.S.A`) are kept verbatim.
///
/// ```
/// use ocw_oer_export::process::normalize_keywords;
/// assert_eq!(
///     normalize_keywords("novel, short story,, the city in literature"),
///     "Novel|Short Story|The City in Literature"
/// );
/// ```
pub fn normalize_keywords(raw: &str) -> String {
    let delimited = SEPARATORS.replace_all(raw, "|");
    delimited
        .trim()
        .split('|')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| {
            if is_all_caps(keyword) {
                keyword.to_string()
            } else {
                titlecase(keyword)
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn is_all_caps(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Title-case a phrase word by word, keeping small words lowercase in the
/// middle of the phrase and leaving words with interior capitals alone.
/// A small word that opens the phrase, closes it, or follows sentence
/// punctuation (`The Art of War: A Study`) is capitalized.
pub fn titlecase(phrase: &str) -> String {
    let words: Vec<&str> = phrase.split(' ').collect();
    let last = words.len().saturating_sub(1);
    let mut after_stop = false;
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let cased = titlecase_word(word);
            let starts_subphrase = i == 0 || after_stop;
            after_stop = word.ends_with([':', '.', ';', '?', '!']);
            if (starts_subphrase || i == last) && is_small_word(word) {
                capitalize_first(&cased)
            } else {
                cased
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn titlecase_word(word: &str) -> String {
    if word.is_empty() || INLINE_PERIOD.is_match(word) || has_interior_capital(word) {
        return word.to_string();
    }
    if is_small_word(word) {
        return word.to_lowercase();
    }
    if let Some(cased) = capitalize_apostrophe_prefix(word) {
        return cased;
    }
    if let Some(caps) = MAC_MC.captures(word) {
        return format!("Mc{}", capitalize_first(&titlecase_word(&caps[2])));
    }
    for sep in ['/', '-'] {
        if word.contains(sep) {
            return word
                .split(sep)
                .map(titlecase_word_part)
                .collect::<Vec<_>>()
                .join(&sep.to_string());
        }
    }
    capitalize_first(word)
}

/// Compound parts are capitalized even when they are small words.
fn titlecase_word_part(part: &str) -> String {
    if has_interior_capital(part) {
        part.to_string()
    } else {
        capitalize_first(part)
    }
}

fn is_small_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    SMALL_WORDS.contains(&lower.trim_matches(|c: char| c == ',' || c == ':'))
}

/// True for words like `TCP's`, `UDPs` or `iPhone`: a leading run of letters
/// with a capital somewhere after its first letter.
fn has_interior_capital(word: &str) -> bool {
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .take_while(|c| c.is_alphabetic())
        .skip(1)
        .any(char::is_uppercase)
}

/// `o'neil` -> `O'Neil`, `d'alembert` -> `D'Alembert`.
fn capitalize_apostrophe_prefix(word: &str) -> Option<String> {
    let mut chars = word.chars();
    let first = chars.next()?;
    let apostrophe = chars.next()?;
    let rest: String = chars.collect();
    if !matches!(first.to_ascii_lowercase(), 'd' | 'o' | 'l')
        || !matches!(apostrophe, '\'' | '\u{2019}')
        || !rest.starts_with(|c: char| c.is_alphabetic())
    {
        return None;
    }
    Some(format!(
        "{}{}{}",
        first.to_uppercase(),
        apostrophe,
        capitalize_first(&rest)
    ))
}

/// Uppercase the first alphanumeric character, leaving everything else as is.
fn capitalize_first(word: &str) -> String {
    match word.char_indices().find(|(_, c)| c.is_alphanumeric()) {
        Some((idx, c)) => {
            let mut out = String::with_capacity(word.len());
            out.push_str(&word[..idx]);
            out.extend(c.to_uppercase());
            out.push_str(&word[idx + c.len_utf8()..]);
            out
        }
        None => word.to_string(),
    }
}
