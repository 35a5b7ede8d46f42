//! Token-set similarity scoring.
//!
//! Scores a free-text query against a candidate string on a 0-100 scale.
//! Word order and repeated words do not matter: both sides are reduced to
//! token sets, and a query whose tokens are a subset of the candidate's
//! tokens (or the other way round) scores 100.
//!
//! The numbers match the classic "token set ratio": the pairwise ratio is
//! the insertion/deletion similarity `2 * LCS / (len_a + len_b)` over
//! characters, scaled to 100 and rounded half-to-even.

use rapidfuzz::distance::indel;
use std::collections::BTreeSet;

/// Highest possible score
pub const PERFECT_SCORE: u8 = 100;

/// Normalize text before tokenizing.
///
/// Characters in U+0080..=U+00FF (Latin-1 supplement) are dropped,
/// anything that is not a Unicode letter, digit or `_` becomes a space, and
/// the result is lowercased and trimmed. `"PR-401"` becomes `"pr 401"`,
/// `"Режим печати"` keeps its letters.
pub fn full_process(text: &str) -> String {
    let replaced: String = text
        .chars()
        .filter(|c| !is_latin1_supplement(*c))
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    replaced.to_lowercase().trim().to_string()
}

fn is_latin1_supplement(c: char) -> bool {
    ('\u{80}'..='\u{ff}').contains(&c)
}

/// Pairwise similarity of two already-processed strings (0-100).
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return PERFECT_SCORE;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // indel distance = total - 2 * LCS
    let total = a.chars().count() + b.chars().count();
    let distance = indel::distance(a.chars(), b.chars());
    let similarity = (total - distance) as f64 / total as f64;
    (100.0 * similarity).round_ties_even() as u8
}

/// Token-set similarity between a query and a candidate (0-100).
pub fn token_set_ratio(query: &str, candidate: &str) -> u8 {
    let left = full_process(query);
    let right = full_process(candidate);
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let left_tokens: BTreeSet<&str> = left.split_whitespace().collect();
    let right_tokens: BTreeSet<&str> = right.split_whitespace().collect();

    // BTreeSet iteration is already sorted
    let sect = join(left_tokens.intersection(&right_tokens));
    let left_only = join(left_tokens.difference(&right_tokens));
    let right_only = join(right_tokens.difference(&left_tokens));

    let combined_left = format!("{} {}", sect, left_only).trim().to_string();
    let combined_right = format!("{} {}", sect, right_only).trim().to_string();

    ratio(&sect, &combined_left)
        .max(ratio(&sect, &combined_right))
        .max(ratio(&combined_left, &combined_right))
}

fn join<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_process() {
        assert_eq!(full_process("PR-401"), "pr 401");
        assert_eq!(full_process("  Print Quality Mode "), "print quality mode");
        assert_eq!(full_process("snake_case"), "snake_case");
        assert_eq!(full_process("café"), "caf");
        assert_eq!(full_process("---"), "");
    }

    #[test]
    fn test_full_process_keeps_other_scripts() {
        assert_eq!(full_process("Режим печати"), "режим печати");
        assert_eq!(full_process("ΑΒΓ-1"), "αβγ 1");
        assert_eq!(full_process("印刷モード"), "印刷モード");
        assert_eq!(full_process("印刷、モード"), "印刷 モード");
    }

    #[test]
    fn test_ratio_edges() {
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("abc", ""), 0);
        assert_eq!(ratio("abc", "abc"), 100);
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn test_ratio_rounds_half_to_even() {
        // 2 * 5 / 16 = 62.5
        assert_eq!(ratio("colour", "color mode"), 62);
    }

    #[test]
    fn test_exact_code() {
        assert_eq!(token_set_ratio("PR-401", "PR-401"), 100);
        assert_eq!(token_set_ratio("pr-401", "PR-401"), 100);
    }

    #[test]
    fn test_subset_scores_perfect() {
        assert_eq!(token_set_ratio("print quality", "Print Quality Mode"), 100);
        assert_eq!(token_set_ratio("mode quality print", "Print Quality Mode"), 100);
        assert_eq!(token_set_ratio("print print quality", "Print Quality Mode"), 100);
    }

    #[test]
    fn test_non_latin_exact_and_subset() {
        assert_eq!(token_set_ratio("Режим печати", "Режим печати"), 100);
        assert_eq!(token_set_ratio("РЕЖИМ", "режим"), 100);
        assert_eq!(token_set_ratio("печати", "Режим печати"), 100);
        assert_eq!(token_set_ratio("αβγ", "αβγ"), 100);
        assert_eq!(token_set_ratio("印刷モード", "印刷モード"), 100);
    }

    #[test]
    fn test_ratio_counts_characters() {
        // One of three characters differs: 2 * 2 / 6
        assert_eq!(ratio("αβγ", "αβδ"), 67);
        assert_eq!(token_set_ratio("印刷", "印刷モード"), 57);
    }

    #[test]
    fn test_near_miss() {
        assert_eq!(token_set_ratio("color mod", "Color Mode"), 95);
        assert_eq!(token_set_ratio("color mod", "Color Mods"), 95);
    }

    #[test]
    fn test_unrelated() {
        assert_eq!(token_set_ratio("zzzzzzzzzz", "PR-401"), 0);
        assert_eq!(token_set_ratio("zzzzzzzzzz", "Print Quality Mode"), 0);
    }

    #[test]
    fn test_empty_after_processing() {
        assert_eq!(token_set_ratio("", "PR-401"), 0);
        assert_eq!(token_set_ratio("???", "PR-401"), 0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("color mod", "Color Mode"),
            ("duplex print", "Duplex Printing Mode"),
            ("PR-401", "PR-402"),
        ];
        for (a, b) in pairs {
            assert_eq!(token_set_ratio(a, b), token_set_ratio(b, a));
        }
    }
}
