use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::SearchCandidate;

/// A parenthesized annotation plus the whitespace around it, e.g. ` (Remastered 2011) `
static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\s*\(.*?\)\s*").unwrap());

const STRIPPED_PUNCTUATION: &[char] = &[
    '\'', '\u{2018}', '\u{2019}', '`', '"', '\u{201C}', '\u{201D}', '.', ',', '!', '?', '-',
];

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduce a display string to the form used for title comparison.
///
/// Parenthesized annotations and the usual punctuation become word breaks,
/// combining diacritics are dropped, whitespace is collapsed and the result
/// is lowercased. The output is only ever compared, never shown.
pub fn normalize(s: &str) -> String {
    let s = PARENTHESIZED.replace_all(s, " ");
    let s: String = s.nfd().filter(|&c| !is_combining_diacritic(c)).collect();
    let s: String = s
        .chars()
        .map(|c| if STRIPPED_PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();
    // Some case mappings introduce combining marks (`İ` -> `i\u{307}`)
    collapse_whitespace(&s)
        .to_lowercase()
        .chars()
        .filter(|&c| !is_combining_diacritic(c))
        .collect()
}

/// Clean a name or artist for use in an outbound search query.
///
/// Case and accents are kept since the search service handles them itself.
pub fn clean_for_query(s: &str) -> String {
    let s = PARENTHESIZED.replace_all(s, " ");
    let s: String = s.chars().filter(|c| !STRIPPED_PUNCTUATION.contains(c)).collect();
    collapse_whitespace(&s)
}

/// Levenshtein edit distance over chars, using two rolling rows.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (current[j] + 1)
                .min(previous[j + 1] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[derive(Debug, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// Normalized title equals the normalized target name
    Exact {
        candidate: &'a SearchCandidate,
        normalized_title: String,
    },
    /// Best-effort pick with the lowest score; no threshold is applied
    Closest {
        candidate: &'a SearchCandidate,
        normalized_title: String,
        score: usize,
    },
    NoMatch,
}

impl MatchResult<'_> {
    pub fn track_id(&self) -> Option<&str> {
        match self {
            Self::Exact { candidate, .. } | Self::Closest { candidate, .. } => {
                Some(&candidate.id)
            }
            Self::NoMatch => None,
        }
    }

    pub fn matched_title(&self) -> Option<&str> {
        match self {
            Self::Exact {
                normalized_title, ..
            }
            | Self::Closest {
                normalized_title, ..
            } => Some(normalized_title),
            Self::NoMatch => None,
        }
    }
}

/// Pick the candidate that best corresponds to `target_name`.
///
/// The first candidate whose normalized title equals the normalized target
/// wins outright. Otherwise every candidate is scored as twice the edit
/// distance between titles and the earliest lowest score is returned.
///
/// `_target_artist` is accepted but does not currently contribute to the score.
pub fn select<'a>(
    candidates: &'a [SearchCandidate],
    target_name: &str,
    _target_artist: &str,
) -> MatchResult<'a> {
    let target = normalize(target_name);

    let mut best: Option<(&SearchCandidate, String, usize)> = None;
    for candidate in candidates {
        let title = normalize(&candidate.title);
        if title == target {
            return MatchResult::Exact {
                candidate,
                normalized_title: title,
            };
        }

        let score = distance(&target, &title) * 2;
        if best.as_ref().is_none_or(|(_, _, best_score)| score < *best_score) {
            best = Some((candidate, title, score));
        }
    }

    match best {
        Some((candidate, normalized_title, score)) => MatchResult::Closest {
            candidate,
            normalized_title,
            score,
        },
        None => MatchResult::NoMatch,
    }
}
