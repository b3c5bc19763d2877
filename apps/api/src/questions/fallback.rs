//! Canned questions served when the generation service is unreachable.

use crate::questions::models::{question_id, Difficulty, Example, FunctionSignatures, Question};

fn description_for(category: &str) -> &'static str {
    match category {
        "arrays" => "Given an array of integers, find the subarray with the maximum sum.",
        "strings" => "Given a string, find the longest substring without repeating characters.",
        "linked lists" => "Reverse a linked list in-place and return the new head.",
        "stacks" => "Implement a stack that supports push, pop, top, and retrieving the minimum element in constant time.",
        "queues" => "Implement a circular queue with basic operations.",
        "trees" => "Find the maximum depth of a binary tree.",
        "graphs" => "Determine if there is a path between two nodes in an undirected graph.",
        "dynamic programming" => "Calculate the maximum sum path in a triangle grid.",
        "greedy" => "Find the minimum number of coins needed to make a specific amount.",
        "binary search" => "Find the position of a target value in a sorted array.",
        "sorting" => "Implement the merge sort algorithm for an array of integers.",
        "recursion" => "Generate all possible combinations of k numbers from 1 to n.",
        "backtracking" => "Solve the N-Queens problem for a given board size.",
        "hashing" => "Find the most frequent element in an array.",
        "two pointers" => "Find all pairs in an array that sum to a given target.",
        "sliding window" => "Find the smallest subarray with a sum greater than or equal to a given value.",
        "bit manipulation" => "Count the number of bits that need to be flipped to convert one number to another.",
        _ => "Solve the given data structures problem.",
    }
}

fn examples_for(category: &str) -> Vec<Example> {
    match category {
        "arrays" => vec![Example {
            input: "[-2, 1, -3, 4, -1, 2, 1, -5, 4]".to_string(),
            output: "6".to_string(),
            explanation: Some("The subarray [4, -1, 2, 1] has the maximum sum of 6.".to_string()),
        }],
        "strings" => vec![Example {
            input: "\"abcabcbb\"".to_string(),
            output: "3".to_string(),
            explanation: Some(
                "The longest substring without repeating characters is \"abc\".".to_string(),
            ),
        }],
        other => vec![Example {
            input: format!("[Sample input for {other}]"),
            output: "[Expected output]".to_string(),
            explanation: Some("Explanation of the result.".to_string()),
        }],
    }
}

fn signatures_for(category: &str) -> FunctionSignatures {
    let (java, cpp, python) = match category {
        "arrays" => (
            "public int maxSubArray(int[] nums) {\n    // Add your solution here\n}".to_string(),
            "int maxSubArray(vector<int>& nums) {\n    // Add your solution here\n}".to_string(),
            "def max_sub_array(nums):\n    # Add your solution here\n    pass".to_string(),
        ),
        "strings" => (
            "public int lengthOfLongestSubstring(String s) {\n    // Add your solution here\n}"
                .to_string(),
            "int lengthOfLongestSubstring(string s) {\n    // Add your solution here\n}".to_string(),
            "def length_of_longest_substring(s):\n    # Add your solution here\n    pass".to_string(),
        ),
        other => {
            let camel: String = other.split_whitespace().map(capitalize).collect();
            let snake = other.split_whitespace().collect::<Vec<_>>().join("_");
            (
                format!("public Object solve{camel}Problem(Object input) {{\n    // Add your solution here\n}}"),
                format!("auto solve{camel}Problem(auto input) {{\n    // Add your solution here\n}}"),
                format!("def solve_{snake}_problem(input):\n    # Add your solution here\n    pass"),
            )
        }
    };
    FunctionSignatures::from([
        ("java".to_string(), java),
        ("cpp".to_string(), cpp),
        ("python".to_string(), python),
    ])
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(category: &str) -> String {
    category
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A complete, well-formed question for `category` that needs no upstream call.
pub fn fallback_question(category: &str, difficulty: Difficulty) -> Question {
    let description = description_for(category).to_string();
    Question {
        id: question_id(&description),
        title: format!("{} Problem", title_case(category)),
        difficulty,
        category: category.to_string(),
        description,
        examples: examples_for(category),
        constraints: vec![
            "1 ≤ array length ≤ 100".to_string(),
            "-1000 ≤ array[i] ≤ 1000".to_string(),
        ],
        function_signature: signatures_for(category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::diversity::DSA_CATEGORIES;

    #[test]
    fn test_every_category_has_a_complete_fallback() {
        for category in DSA_CATEGORIES {
            let q = fallback_question(category, Difficulty::Medium);
            assert!(!q.title.is_empty());
            assert!(!q.description.is_empty());
            assert!(!q.examples.is_empty());
            assert_eq!(q.function_signature.len(), 3);
            assert_eq!(q.id, question_id(&q.description));
            assert_eq!(q.difficulty, Difficulty::Medium);
        }
    }

    #[test]
    fn test_generic_signatures_are_named_after_category() {
        let q = fallback_question("binary search", Difficulty::Easy);
        assert_eq!(q.title, "Binary Search Problem");
        assert!(q.function_signature["java"].contains("solveBinarySearchProblem"));
        assert!(q.function_signature["python"].contains("solve_binary_search_problem"));
    }
}
