use matchtrace::prelude::*;

/// Every window where the pattern literally occurs, by direct scan.
fn brute_force_spans(text: &str, pattern: &str) -> Vec<MatchSpan> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 || m > n {
        return Vec::new();
    }
    (0..=n - m)
        .filter(|&i| text[i..i + m] == pattern[..])
        .map(|i| MatchSpan {
            start: i,
            end: i + m - 1,
        })
        .collect()
}

fn naive_spans(text: &str, pattern: &str) -> Vec<MatchSpan> {
    generate_naive_steps(text, pattern)
        .last()
        .map(|s| s.matches.clone())
        .unwrap_or_default()
}

fn kmp_spans(text: &str, pattern: &str) -> Vec<MatchSpan> {
    generate_kmp_steps(text, pattern)
        .last()
        .map(|s| s.matches.clone())
        .unwrap_or_default()
}

fn rk_spans(text: &str, pattern: &str) -> Vec<MatchSpan> {
    generate_rk_steps(text, pattern)
        .last()
        .map(|s| s.matches.clone())
        .unwrap_or_default()
}

fn ac_matches(text: &str, patterns: &str) -> Vec<(String, usize, usize)> {
    generate_ac_steps(text, patterns)
        .last()
        .map(|s| {
            s.matches
                .iter()
                .map(|m| (m.pattern.clone(), m.start, m.end))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_all_single_pattern_algorithms_agree() {
    let cases = [
        ("ababcabcacbab", "abcac"),
        ("aaaaaa", "aa"),
        ("abcdefgh", "xyz"),
        ("mississippi", "issi"),
        ("aabaabaaa", "aabaaa"),
    ];
    for (text, pattern) in cases {
        let expected = brute_force_spans(text, pattern);
        assert_eq!(naive_spans(text, pattern), expected, "naive on {text}/{pattern}");
        assert_eq!(kmp_spans(text, pattern), expected, "kmp on {text}/{pattern}");
        assert_eq!(rk_spans(text, pattern), expected, "rk on {text}/{pattern}");
        assert_eq!(
            ac_matches(text, pattern),
            expected
                .iter()
                .map(|s| (pattern.to_string(), s.start, s.end))
                .collect::<Vec<_>>(),
            "ac on {text}/{pattern}"
        );
    }
}

#[test]
fn test_default_fixture_match() {
    // The classic demo inputs: one occurrence of "abcac" at [5, 9].
    assert_eq!(
        naive_spans("ababcabcacbab", "abcac"),
        vec![MatchSpan { start: 5, end: 9 }]
    );
}

#[test]
fn test_ac_worked_example_offsets() {
    let found = ac_matches("arrows flew under the sun in a row", "arrows, row, sun, under");
    assert_eq!(
        found,
        vec![
            // "row" hides inside "arrows": the node for "arrow" fails
            // into the terminal for "row" and inherits its output.
            ("row".to_string(), 2, 4),
            ("arrows".to_string(), 0, 5),
            ("under".to_string(), 12, 16),
            ("sun".to_string(), 22, 24),
            ("row".to_string(), 31, 33),
        ]
    );
}

#[test]
fn test_ac_overlapping_patterns_all_reported() {
    // "she" ends at 2 and carries "he" in its output set.
    let found = ac_matches("she", "he, she");
    assert_eq!(
        found,
        vec![("she".to_string(), 0, 2), ("he".to_string(), 1, 2)]
    );
}

#[test]
fn test_ac_output_propagation_through_shared_trie() {
    let patterns: Vec<String> = ["he", "she", "his", "hers"]
        .iter()
        .map(|p| p.to_string())
        .collect();
    let (trie, _) = build_automaton(&patterns);

    let she_node = trie
        .iter()
        .find(|(_, node)| node.outputs.first().map(String::as_str) == Some("she"))
        .map(|(id, _)| id)
        .expect("a node must terminate \"she\"");
    assert_eq!(
        trie.node(she_node).outputs,
        vec!["she".to_string(), "he".to_string()]
    );
}

#[test]
fn test_kmp_comparison_count_is_linear() {
    // Each comparison either advances the text pointer or shrinks the
    // matched prefix, so the total is bounded by 2n.
    let cases = [("aaaaaaaaaa", "ab"), ("ababababab", "abab"), ("aabaabaaa", "aab")];
    for (text, pattern) in cases {
        let n = text.chars().count();
        let compares = generate_kmp_steps(text, pattern)
            .iter()
            .filter(|s| matches!(s.kind, KmpStepKind::Compare { .. }))
            .count();
        assert!(
            compares <= 2 * n,
            "{compares} comparisons for n = {n} on {text}/{pattern}"
        );
    }
}

#[test]
fn test_generators_are_idempotent() {
    let text = "ababcabcacbab";
    assert_eq!(generate_naive_steps(text, "abcac"), generate_naive_steps(text, "abcac"));
    assert_eq!(generate_kmp_steps(text, "abcac"), generate_kmp_steps(text, "abcac"));
    assert_eq!(generate_rk_steps(text, "abcac"), generate_rk_steps(text, "abcac"));
    assert_eq!(
        generate_ac_steps("she sells", "he, she, sells"),
        generate_ac_steps("she sells", "he, she, sells")
    );
}

#[test]
fn test_empty_pattern_policies() {
    assert!(generate_naive_steps("text", "").is_empty());
    assert!(generate_kmp_steps("text", "").is_empty());
    assert!(generate_rk_steps("text", "").is_empty());
    assert!(generate_ac_steps("text", " ,  , ").is_empty());
}

#[test]
fn test_empty_text_policies() {
    assert!(generate_naive_steps("", "a").is_empty());

    let kmp = generate_kmp_steps("", "a");
    assert_eq!(kmp.len(), 1);
    assert!(matches!(kmp[0].kind, KmpStepKind::Init));

    let rk = generate_rk_steps("", "a");
    assert_eq!(rk.len(), 1);
    assert!(matches!(rk[0].kind, RkStepKind::Init));

    // AC still builds the automaton; the search contributes only the
    // init step.
    let ac = generate_ac_steps("", "a");
    assert_eq!(
        ac.iter().filter(|s| s.phase == AcPhase::Search).count(),
        1
    );
}

#[test]
fn test_steps_are_randomly_addressable() {
    // Rendering any step must need nothing but the step itself: the
    // cumulative state at step k equals the cumulative state computed
    // by replaying 0..=k.
    let steps = generate_naive_steps("abab", "ab");
    let mut replayed = 0usize;
    for step in &steps {
        if matches!(step.kind, NaiveStepKind::Compare { .. }) {
            replayed += 1;
        }
        assert_eq!(step.comparisons, replayed);
        assert_eq!(step.comparison_history.len(), replayed);
    }

    // Jumping straight to the last step sees the full result.
    let last = steps.last().unwrap();
    assert_eq!(last.matches.len(), 2);
}

#[test]
fn test_ac_trie_snapshots_are_frozen_per_step() {
    let steps = generate_ac_steps("ab", "ab, b");
    // The first step's snapshot holds only the root, no matter how far
    // construction proceeded afterwards.
    assert_eq!(steps[0].trie.node_count(), 1);
    // The final snapshot holds the whole automaton.
    assert_eq!(steps.last().unwrap().trie.node_count(), 4);
}

#[test]
fn test_ac_match_history_is_chronological() {
    let steps = generate_ac_steps("ababa", "aba, ba");
    let last = steps.last().unwrap();
    let ends: Vec<usize> = last.match_history.iter().map(|m| m.end).collect();
    let mut sorted = ends.clone();
    sorted.sort_unstable();
    assert_eq!(ends, sorted);
    // "aba" at [0,2] and [2,4], "ba" at [1,2] and [3,4].
    assert_eq!(last.match_history.len(), 4);
}
