//! Keeps CACT vocabulary behind the `cact_core::lang` registries.
//!
//! Keywords, scalar type names and runtime builtin names are resolved through ids. A production line
//! that compares against one of their spellings (`kind == "int"`, `"get_int" => ...`) bypasses the
//! registries and drifts from them when a spelling changes.

use std::fs;
use std::path::{Path, PathBuf};

use cact_core::lang::{builtins, keywords, types};

/// Markers of a comparison or dispatch on a string.
const COMPARISONS: [&str; 4] = ["==", "!=", "=>", "matches!"];

fn spellings() -> Vec<&'static str> {
    let mut words: Vec<&'static str> = keywords::KEYWORDS
        .iter()
        .map(|k| k.canonical)
        .chain(types::SCALAR_TYPES.iter().map(|t| t.canonical))
        .chain(builtins::BUILTIN_FUNCTIONS.iter().map(|b| b.canonical))
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

/// Rust files under `dir`, found without recursion.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut pending = vec![dir.to_path_buf()];
    let mut files = Vec::new();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else { continue };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|e| e == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

/// The part of a source file that is compiled outside tests.
fn production_part(source: &str) -> &str {
    source.split("#[cfg(test)]").next().unwrap_or(source)
}

fn compares_a_spelling(line: &str, words: &[&'static str]) -> Option<&'static str> {
    let code = line.trim_start();
    if code.starts_with("//") || !COMPARISONS.iter().any(|c| code.contains(c)) {
        return None;
    }
    words.iter().copied().find(|w| code.contains(&format!("\"{}\"", w)))
}

#[test]
fn vocabulary_covers_every_registry() {
    let words = spellings();
    assert!(words.contains(&"while"));
    assert!(words.contains(&"double"));
    assert!(words.contains(&"print_int"));
    assert_eq!(compares_a_spelling("if name == \"get_int\" {", &words), Some("get_int"));
    assert_eq!(compares_a_spelling("obj.insert(\"else\".into(), branch);", &words), None);
}

#[test]
fn front_end_dispatches_on_ids_not_spellings() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let registries = root.join("crates/cact_core/src/lang");
    let words = spellings();

    let mut offenders = Vec::new();
    for dir in [root.join("src"), root.join("crates/cact_core/src")] {
        for path in rust_files(&dir) {
            if path.starts_with(&registries) || path.ends_with("parser/tests.rs") {
                continue;
            }
            let Ok(source) = fs::read_to_string(&path) else { continue };
            for (idx, line) in production_part(&source).lines().enumerate() {
                if let Some(word) = compares_a_spelling(line, &words) {
                    let rel = path.strip_prefix(root).unwrap_or(&path);
                    offenders.push(format!("{}:{} compares against \"{}\"", rel.display(), idx + 1, word));
                }
            }
        }
    }

    assert!(
        offenders.is_empty(),
        "resolve these through cact_core::lang instead:\n{}",
        offenders.join("\n")
    );
}
