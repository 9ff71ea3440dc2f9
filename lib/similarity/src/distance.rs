//! String similarity functions used for contact matching
//!
//! The composite score averages three independent metrics:
//! Levenshtein edit distance, longest common substring coverage and
//! Jaro-Winkler. Every `*_score` function returns a similarity in
//! [0.0, 1.0] where 1.0 means identical, compares case-folded copies of its
//! inputs and is defined for empty strings.
//!
//! Lengths are counted in `char`s, never bytes.

use crate::config::ScoreWeights;

/// Scaling factor applied per shared prefix character in the Winkler boost
pub const WINKLER_PREFIX_SCALE: f32 = 0.1;

/// Longest prefix that earns the Winkler boost
pub const WINKLER_MAX_PREFIX: usize = 4;

/// Locale-independent case folding
#[inline]
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

fn folded_chars(s: &str) -> Vec<char> {
    fold_case(s).chars().collect()
}

/// Composite similarity with equal weights
///
/// `a` is the query: the substring term measures how much of `a` appears in
/// `b`, so the result is not symmetric.
pub fn similarity(a: &str, b: &str) -> f32 {
    weighted_similarity(a, b, &ScoreWeights::default())
}

/// Composite similarity as the weighted mean of the three sub-scores
pub fn weighted_similarity(a: &str, b: &str, weights: &ScoreWeights) -> f32 {
    let a = folded_chars(a);
    let b = folded_chars(b);

    if a == b {
        return 1.0;
    }

    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }

    let score = weights.edit_distance * edit_similarity(&a, &b)
        + weights.substring * substring_similarity(&a, &b)
        + weights.jaro_winkler * jaro_winkler_similarity(&a, &b);

    (score / total).clamp(0.0, 1.0)
}

/// `1 - levenshtein / max(|a|, |b|)`, 1.0 when both strings are empty
pub fn distance_score(a: &str, b: &str) -> f32 {
    edit_similarity(&folded_chars(a), &folded_chars(b))
}

/// Share of the query `a` covered by its longest run shared with `b`.
/// An empty query covers nothing and scores 0.0.
pub fn substring_score(a: &str, b: &str) -> f32 {
    substring_similarity(&folded_chars(a), &folded_chars(b))
}

/// Jaro similarity with the Winkler common-prefix boost
pub fn jaro_winkler_score(a: &str, b: &str) -> f32 {
    jaro_winkler_similarity(&folded_chars(a), &folded_chars(b))
}

/// Levenshtein edit distance (case-sensitive)
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein(&a, &b)
}

/// Length of the longest contiguous run shared by both strings (case-sensitive)
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    longest_common_run(&a, &b)
}

/// Plain Jaro similarity (case-sensitive)
pub fn jaro(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    jaro_similarity(&a, &b)
}

fn edit_similarity(a: &[char], b: &[char]) -> f32 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f32 / longest as f32
}

fn substring_similarity(a: &[char], b: &[char]) -> f32 {
    if a.is_empty() {
        return 0.0;
    }
    longest_common_run(a, b) as f32 / a.len() as f32
}

fn jaro_winkler_similarity(a: &[char], b: &[char]) -> f32 {
    if a == b {
        return 1.0;
    }

    let jaro = jaro_similarity(a, b);
    let prefix = a
        .iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .count()
        .min(WINKLER_MAX_PREFIX);

    (jaro + prefix as f32 * WINKLER_PREFIX_SCALE * (1.0 - jaro)).clamp(0.0, 1.0)
}

/// Two-row dynamic programme over the (|a|+1) x (|b|+1) edit table
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn longest_common_run(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut longest = 0;

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            longest = longest.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    longest
}

fn jaro_similarity(a: &[char], b: &[char]) -> f32 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(b.len());
        for j in start..end {
            if !b_matched[j] && b[j] == *ca {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched characters of `a` and `b` taken in order; every out-of-place
    // pair counts as half a transposition.
    let mut out_of_order = 0usize;
    let mut k = 0usize;
    for (i, ca) in a.iter().enumerate() {
        if !a_matched[i] {
            continue;
        }
        while !b_matched[k] {
            k += 1;
        }
        if *ca != b[k] {
            out_of_order += 1;
        }
        k += 1;
    }

    let m = matches as f32;
    let transpositions = out_of_order as f32 / 2.0;
    (m / a.len() as f32 + m / b.len() as f32 + (m - transpositions) / m) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_levenshtein_known_values() {
        assert_eq!(levenshtein_distance("cat", "cats"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("zoë", "zoe"), 1);
        assert_eq!(longest_common_substring("björk", "bjork"), 2);
    }

    #[test]
    fn test_distance_score() {
        assert_eq!(distance_score("", ""), 1.0);
        assert_eq!(distance_score("abc", ""), 0.0);
        assert!((distance_score("cat", "cats") - 0.75).abs() < EPS);
        assert_eq!(distance_score("JON", "jon"), 1.0);
    }

    #[test]
    fn test_longest_common_substring() {
        assert_eq!(longest_common_substring("jon", "jon snow"), 3);
        assert_eq!(longest_common_substring("xyz123", "+1 555 1234"), 3);
        assert_eq!(longest_common_substring("abc", "xyz"), 0);
    }

    #[test]
    fn test_substring_score_is_normalized_by_query() {
        assert_eq!(substring_score("jon", "jon snow"), 1.0);
        assert!((substring_score("jon snow", "jon") - 3.0 / 8.0).abs() < EPS);
        assert_eq!(substring_score("", "anything nonempty"), 0.0);
        assert_eq!(substring_score("", ""), 0.0);
    }

    #[test]
    fn test_jaro_known_values() {
        assert!((jaro("MARTHA", "MARHTA") - 0.9444).abs() < EPS);
        assert!((jaro("DIXON", "DICKSONX") - 0.7667).abs() < EPS);
        assert_eq!(jaro("abc", "xyz"), 0.0);
        assert_eq!(jaro("", "abc"), 0.0);
    }

    #[test]
    fn test_jaro_winkler_known_values() {
        assert!((jaro_winkler_score("MARTHA", "MARHTA") - 0.9611).abs() < EPS);
        assert!((jaro_winkler_score("DIXON", "DICKSONX") - 0.8133).abs() < EPS);
        assert_eq!(jaro_winkler_score("jon snow", "jon snow"), 1.0);
        assert_eq!(jaro_winkler_score("", ""), 1.0);
    }

    #[test]
    fn test_jaro_winkler_prefix_is_capped() {
        // Five shared leading characters earn the same boost as four.
        let jaro = super::jaro("abcdex", "abcdey");
        let boosted = jaro_winkler_score("abcdex", "abcdey");
        let expected = jaro + 4.0 * WINKLER_PREFIX_SCALE * (1.0 - jaro);
        assert!((boosted - expected).abs() < EPS);
    }

    #[test]
    fn test_similarity_degenerate_cases() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("Jon Snow", "jon snow"), 1.0);
        assert_eq!(similarity("", "jon snow"), 0.0);
    }

    #[test]
    fn test_similarity_composite() {
        // edit 1 - 5/8, substring 3/3, jaro-winkler 0.8542
        let expected = (0.375 + 1.0 + 0.854_166_7) / 3.0;
        assert!((similarity("jon", "jon snow") - expected).abs() < EPS);
    }

    #[test]
    fn test_similarity_is_asymmetric() {
        let forward = similarity("jon", "jon snow");
        let backward = similarity("jon snow", "jon");
        assert!(forward > backward);
        assert!((forward - backward - (1.0 - 3.0 / 8.0) / 3.0).abs() < EPS);
    }

    #[test]
    fn test_weighted_similarity() {
        let substring_only = ScoreWeights {
            edit_distance: 0.0,
            substring: 1.0,
            jaro_winkler: 0.0,
        };
        assert_eq!(weighted_similarity("jon", "jon snow", &substring_only), 1.0);

        let nothing = ScoreWeights {
            edit_distance: 0.0,
            substring: 0.0,
            jaro_winkler: 0.0,
        };
        assert_eq!(weighted_similarity("jon", "jon snow", &nothing), 0.0);
    }

    proptest! {
        #[test]
        fn prop_similarity_is_reflexive(s in "\\PC{0,16}") {
            prop_assert_eq!(similarity(&s, &s), 1.0);
        }

        #[test]
        fn prop_scores_are_bounded(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            for score in [
                similarity(&a, &b),
                distance_score(&a, &b),
                substring_score(&a, &b),
                jaro_winkler_score(&a, &b),
            ] {
                prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
            }
        }

        #[test]
        fn prop_jaro_winkler_identical_is_one(s in "\\PC{1,16}") {
            prop_assert_eq!(jaro_winkler_score(&s, &s), 1.0);
        }

        #[test]
        fn prop_levenshtein_triangle_inequality(
            a in "[a-d]{0,8}",
            b in "[a-d]{0,8}",
            c in "[a-d]{0,8}",
        ) {
            let ac = levenshtein_distance(&a, &c);
            let ab = levenshtein_distance(&a, &b);
            let bc = levenshtein_distance(&b, &c);
            prop_assert!(ac <= ab + bc);
        }

        #[test]
        fn prop_levenshtein_suffix_insertion(base in "[a-z]{0,10}", tail in "[a-z]{0,6}") {
            let extended = format!("{}{}", base, tail);
            prop_assert_eq!(levenshtein_distance(&base, &extended), tail.chars().count());
        }
    }
}
