//! Diversity selector: picks the next question category away from recent history.

use rand::seq::SliceRandom;
use rand::Rng;

/// Every category a question can be generated for.
pub const DSA_CATEGORIES: [&str; 17] = [
    "arrays",
    "strings",
    "linked lists",
    "stacks",
    "queues",
    "trees",
    "graphs",
    "dynamic programming",
    "greedy",
    "binary search",
    "sorting",
    "recursion",
    "backtracking",
    "hashing",
    "two pointers",
    "sliding window",
    "bit manipulation",
];

/// How many trailing history entries are excluded outright.
pub const AVOID_WINDOW: usize = 5;
/// How many categories the persisted history retains.
pub const CATEGORY_HISTORY_LEN: usize = 10;

/// The categories eligible for the next pick, in list order.
///
/// 1. everything not among the last `AVOID_WINDOW` served categories;
/// 2. if that is empty, everything except the most recent category;
/// 3. if that is still empty (a one-element list), the whole list.
pub fn candidate_categories<'a>(categories: &[&'a str], history: &[String]) -> Vec<&'a str> {
    let window = &history[history.len().saturating_sub(AVOID_WINDOW)..];

    let fresh: Vec<&str> = categories
        .iter()
        .copied()
        .filter(|c| !window.iter().any(|h| h == c))
        .collect();
    if !fresh.is_empty() {
        return fresh;
    }

    let not_last: Vec<&str> = match history.last() {
        Some(last) => categories.iter().copied().filter(|c| c != last).collect(),
        None => categories.to_vec(),
    };
    if !not_last.is_empty() {
        return not_last;
    }

    categories.to_vec()
}

/// Uniform random pick from `candidate_categories`. `None` only for an empty list.
pub fn select_category<'a, R: Rng + ?Sized>(
    categories: &[&'a str],
    history: &[String],
    rng: &mut R,
) -> Option<&'a str> {
    candidate_categories(categories, history)
        .choose(rng)
        .copied()
}

/// Appends `category` and keeps only the last `CATEGORY_HISTORY_LEN` entries.
pub fn push_category(history: &mut Vec<String>, category: &str) {
    history.push(category.to_string());
    if history.len() > CATEGORY_HISTORY_LEN {
        let excess = history.len() - CATEGORY_HISTORY_LEN;
        history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn owned(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_excludes_last_five() {
        let history = owned(&["arrays", "strings", "trees", "graphs", "greedy", "sorting"]);
        let candidates = candidate_categories(&DSA_CATEGORIES, &history);
        for recent in &history[1..] {
            assert!(!candidates.contains(&recent.as_str()), "{recent} should be excluded");
        }
        // Outside the window again.
        assert!(candidates.contains(&"arrays"));
        assert_eq!(candidates.len(), DSA_CATEGORIES.len() - 5);
    }

    #[test]
    fn test_exhausted_list_only_avoids_most_recent() {
        let categories = ["a", "b", "c"];
        let history = owned(&["a", "b", "c"]);
        assert_eq!(candidate_categories(&categories, &history), vec!["a", "b"]);
    }

    #[test]
    fn test_single_category_list_still_yields_a_pick() {
        let categories = ["only"];
        let history = owned(&["only"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_category(&categories, &history, &mut rng), Some("only"));
    }

    #[test]
    fn test_empty_list_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_category(&[], &[], &mut rng), None);
    }

    #[test]
    fn test_never_repeats_previous_category() {
        let mut rng = StdRng::seed_from_u64(42);
        for categories in [&["x", "y"][..], &["x", "y", "z"][..], &DSA_CATEGORIES[..]] {
            let mut history: Vec<String> = Vec::new();
            for _ in 0..200 {
                let pick = select_category(categories, &history, &mut rng).unwrap();
                if let Some(last) = history.last() {
                    assert_ne!(last, pick);
                }
                push_category(&mut history, pick);
            }
        }
    }

    #[test]
    fn test_push_category_truncates_to_ten() {
        let mut history = Vec::new();
        for i in 0..15 {
            push_category(&mut history, &format!("c{i}"));
        }
        assert_eq!(history.len(), CATEGORY_HISTORY_LEN);
        assert_eq!(history.first().map(String::as_str), Some("c5"));
        assert_eq!(history.last().map(String::as_str), Some("c14"));
    }
}
