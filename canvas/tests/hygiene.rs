//! Hygiene: source-level checks run as tests.
//!
//! Scans `src/` (test modules excluded) for patterns that crash the editor
//! in the browser or swallow errors. Every budget is zero; a new hit means
//! fixing the code, not raising the number.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

/// Pattern and the number of lines allowed to contain it.
const BUDGETS: &[(&str, usize)] = &[
    // Panics abort the wasm instance.
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    // Silent loss.
    ("let _ =", 0),
    (".ok()", 0),
    // Structure.
    ("#[allow(dead_code)]", 0),
];

struct SourceFile {
    path: String,
    content: String,
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[test]
fn source_tree_is_not_empty() {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")));
}

#[test]
fn pattern_budgets() {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);

    let mut failures = Vec::new();
    for &(pattern, max) in BUDGETS {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > max {
            let detail: Vec<String> = found.iter().map(|(p, n)| format!("  {p}: {n}")).collect();
            failures.push(format!("`{pattern}`: found {count}, max {max}\n{}", detail.join("\n")));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
