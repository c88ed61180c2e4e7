//! Hygiene: source-level rules checked at test time.
//!
//! Each rule scans the production files under `src/` (test files excluded)
//! and has a budget, zero unless stated. Budgets only go down.

use std::fs;
use std::path::Path;

/// Modules allowed to touch the browser. Everything else must run natively.
const DOM_MODULES: [&str; 2] = ["dom.rs", "host.rs"];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
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

/// Matching lines per file, for files with at least one.
fn hits<'a>(files: impl IntoIterator<Item = &'a SourceFile>, pattern: &str) -> Vec<(String, usize)> {
    files
        .into_iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn assert_budget(pattern: &str, max: usize) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    let found = hits(&files, pattern);
    let count: usize = found.iter().map(|(_, c)| c).sum();
    let listing = found.iter().map(|(path, c)| format!("  {path}: {c}")).collect::<Vec<_>>().join("\n");
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}.\n{listing}");
}

// =============================================================
// Panics
// =============================================================

#[test]
fn unwrap_budget() {
    assert_budget(".unwrap()", 0);
}

#[test]
fn expect_budget() {
    assert_budget(".expect(", 0);
}

#[test]
fn panic_budget() {
    assert_budget("panic!(", 0);
}

#[test]
fn unreachable_budget() {
    assert_budget("unreachable!(", 0);
}

#[test]
fn todo_budget() {
    assert_budget("todo!(", 0);
}

#[test]
fn unimplemented_budget() {
    assert_budget("unimplemented!(", 0);
}

// =============================================================
// Silent loss
// =============================================================

#[test]
fn silent_discard_budget() {
    assert_budget("let _ =", 0);
}

#[test]
fn dot_ok_budget() {
    assert_budget(".ok()", 0);
}

#[test]
fn allow_dead_code_budget() {
    assert_budget("#[allow(dead_code)]", 0);
}

// =============================================================
// Layering
// =============================================================

#[test]
fn browser_apis_stay_in_dom_modules() {
    let files = source_files();
    let core = files.iter().filter(|file| !DOM_MODULES.iter().any(|name| file.path.ends_with(name)));
    let mut found = hits(core.clone(), "web_sys");
    found.extend(hits(core, "wasm_bindgen"));
    assert!(found.is_empty(), "browser bindings outside {DOM_MODULES:?}:\n{found:?}");
}
