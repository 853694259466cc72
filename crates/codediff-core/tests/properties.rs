use codediff_core::{parse, ChangeKind, DiffAlgorithm, DiffEngine, DiffResult, Hunk};
use pretty_assertions::assert_eq;

const CASES: &[(&str, &str)] = &[
    ("", ""),
    ("a", "a\nb"),
    ("a\nb", "a"),
    ("", "x\ny\n"),
    ("x\ny\n", ""),
    ("a\nb\nc\n", "a\nb\nc\n"),
    ("a\nb", "a\nb\n"),
    ("\n\n\n", "\n\nx\n\n"),
    (
        "function hello() {\n  return true;\n}",
        "function hi() {\n  return false;\n}",
    ),
    (
        "use std::io;\n\nfn main() {\n    println!(\"hi\");\n}\n",
        "use std::fs;\nuse std::io;\n\nfn main() {\n    let x = 1;\n    println!(\"{x}\");\n}\n",
    ),
];

fn line_count(text: &str) -> usize {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.len()
}

fn engines() -> Vec<DiffEngine> {
    vec![
        DiffEngine::new(),
        DiffEngine::new().with_algorithm(DiffAlgorithm::Patience),
        DiffEngine::new().with_algorithm(DiffAlgorithm::Lcs),
    ]
}

fn assert_header_arithmetic(hunk: &Hunk) {
    let old: Vec<usize> = hunk.lines.iter().filter_map(|l| l.old_line_number).collect();
    let new: Vec<usize> = hunk.lines.iter().filter_map(|l| l.new_line_number).collect();

    assert_eq!(hunk.old_line_count, old.len());
    assert_eq!(hunk.new_line_count, new.len());
    assert_eq!(hunk.old_start, old.first().copied().unwrap_or(1));
    assert_eq!(hunk.new_start, new.first().copied().unwrap_or(1));
    assert!(old.windows(2).all(|w| w[1] == w[0] + 1));
    assert!(new.windows(2).all(|w| w[1] == w[0] + 1));

    for line in &hunk.lines {
        assert_eq!(line.old_line_number.is_some(), line.kind != ChangeKind::Added);
        assert_eq!(line.new_line_number.is_some(), line.kind != ChangeKind::Removed);
    }
}

fn changes(result: &DiffResult) -> Vec<(ChangeKind, String)> {
    result
        .hunks
        .iter()
        .flat_map(|h| &h.lines)
        .filter(|l| l.kind.is_change())
        .map(|l| (l.kind, l.content.clone()))
        .collect()
}

#[test]
fn header_arithmetic_holds() {
    for engine in engines() {
        for &(old, new) in CASES {
            let result = engine.compute_structured(Some(old), Some(new), "f.txt");
            result.hunks.iter().for_each(assert_header_arithmetic);
        }
    }
}

#[test]
fn line_counts_reconcile() {
    for engine in engines() {
        for &(old, new) in CASES {
            let result = engine.compute_structured(Some(old), Some(new), "f.txt");
            let unchanged = result.count(ChangeKind::Unchanged);

            assert_eq!(result.insertions(), line_count(new) - unchanged, "{old:?} -> {new:?}");
            assert_eq!(result.deletions(), line_count(old) - unchanged, "{old:?} -> {new:?}");
        }
    }
}

#[test]
fn structured_and_plain_text_agree() {
    for engine in engines() {
        for &(old, new) in CASES {
            let structured = engine.compute_structured(Some(old), Some(new), "f.txt");
            let plain = engine.compute_plain_text(Some(old), Some(new), "f.txt");
            let reparsed = parse(&plain).expect("plain text parses");

            assert_eq!(reparsed.hunks, structured.hunks);
            let reparsed = DiffResult {
                hunks: reparsed.hunks,
                ..structured.clone()
            };
            assert_eq!(changes(&reparsed), changes(&structured));
        }
    }
}

#[test]
fn identical_inputs_are_deterministic() {
    let engine = DiffEngine::new();
    for &(text, _) in CASES {
        let first = engine.compute_plain_text(Some(text), Some(text), "same.txt");
        let second = engine.compute_plain_text(Some(text), Some(text), "same.txt");
        assert_eq!(first, second);

        let result = engine.compute_structured(Some(text), Some(text), "same.txt");
        assert!(!result.has_changes());
        assert_eq!(result.hunks.len(), usize::from(line_count(text) > 0));
    }
}

#[test]
fn empty_inputs() {
    assert_eq!(
        DiffEngine::new().compute_plain_text(Some(""), Some(""), "file.txt"),
        "--- a/file.txt\n+++ b/file.txt\n"
    );
}

#[test]
fn pure_addition() {
    let result = DiffEngine::new().compute_structured(Some("a"), Some("a\nb"), "file.txt");
    assert_eq!(result.hunks.len(), 1);
    let hunk = &result.hunks[0];
    assert_eq!(
        (hunk.old_start, hunk.old_line_count, hunk.new_start, hunk.new_line_count),
        (1, 1, 1, 2)
    );
    assert_eq!(hunk.lines[0].kind, ChangeKind::Unchanged);
    assert_eq!(hunk.lines[0].content, "a");
    assert_eq!(hunk.lines[1].kind, ChangeKind::Added);
    assert_eq!(hunk.lines[1].content, "b");
    assert_eq!(hunk.lines[1].new_line_number, Some(2));
}

#[test]
fn pure_deletion() {
    let result = DiffEngine::new().compute_structured(Some("a\nb"), Some("a"), "file.txt");
    let hunk = &result.hunks[0];
    assert_eq!(
        (hunk.old_start, hunk.old_line_count, hunk.new_start, hunk.new_line_count),
        (1, 2, 1, 1)
    );
    assert_eq!(hunk.lines[1].kind, ChangeKind::Removed);
    assert_eq!(hunk.lines[1].content, "b");
    assert_eq!(hunk.lines[1].old_line_number, Some(2));
}

#[test]
fn full_replacement() {
    let old = "function hello() {\n  return true;\n}";
    let new = "function hi() {\n  return false;\n}";
    let result = DiffEngine::new().compute_structured(Some(old), Some(new), "hello.js");

    assert_eq!(result.hunks.len(), 1);
    let unchanged = result.count(ChangeKind::Unchanged);
    assert!(unchanged <= 1);
    assert_eq!(result.deletions(), 3 - unchanged);
    assert_eq!(result.insertions(), 3 - unchanged);

    let plain = result.to_unified();
    assert!(plain.contains("-function hello() {\n"));
    assert!(plain.contains("+function hi() {\n"));
}
