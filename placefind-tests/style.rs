//! Style Enforcement Tests
//!
//! Scans the production sources of every workspace crate for patterns that
//! clippy does not reject on its own:
//!
//! - `#[allow(dead_code)]`: unused code should be removed, not silenced
//! - `.unwrap()` / `.expect(`: production paths propagate or report errors
//!
//! Items gated by `#[cfg(test)]` are test code and are exempt.

use std::fs;
use std::path::{Path, PathBuf};

const PRODUCTION_SOURCE_DIRS: &[&str] = &[
    "../placefind-core/src",
    "../placefind-search/src",
    "../placefind-cli/src",
];

/// A banned pattern found in production code
#[derive(Debug)]
struct StyleViolation {
    file_path: String,
    line_number: usize,
    rule: &'static str,
    context: String,
}

fn find_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            find_rust_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    Ok(())
}

/// Where the scanner is relative to a `#[cfg(test)]` item.
enum TestItem {
    Outside,
    /// Saw the attribute, the item starts on a later line
    Pending,
    /// Inside the gated item; `opened` once its first `{` was seen
    Inside { depth: i64, opened: bool },
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |delta, c| match c {
        '{' => delta + 1,
        '}' => delta - 1,
        _ => delta,
    })
}

/// Advances through one line of a test-gated item, returning the new state.
fn enter_item(line: &str, depth: i64, opened: bool) -> TestItem {
    let depth = depth + brace_delta(line);
    let opened = opened || line.contains('{');
    let finished = if opened { depth <= 0 } else { line.ends_with(';') };

    if finished {
        TestItem::Outside
    } else {
        TestItem::Inside { depth, opened }
    }
}

/// Checks the production part of one file's contents.
///
/// Items gated by `#[cfg(test)]` are skipped, whether they are inline
/// `mod tests { .. }` blocks or `mod mock;` declarations; code before and
/// after them is still checked.
fn check_source(file_path: &str, contents: &str) -> Vec<StyleViolation> {
    let mut violations = Vec::new();
    let mut state = TestItem::Outside;

    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();

        match state {
            TestItem::Inside { depth, opened } => {
                state = enter_item(trimmed, depth, opened);
                continue;
            }
            TestItem::Pending => {
                if !trimmed.is_empty() && !trimmed.starts_with("#[") && !trimmed.starts_with("//") {
                    state = enter_item(trimmed, 0, false);
                }
                continue;
            }
            TestItem::Outside => {}
        }

        if let Some(rest) = trimmed.strip_prefix("#[cfg(test)]") {
            let rest = rest.trim();
            state = if rest.is_empty() {
                TestItem::Pending
            } else {
                enter_item(rest, 0, false)
            };
            continue;
        }
        if trimmed.starts_with("//") {
            continue;
        }

        let rule = if trimmed.contains("#[allow(") && trimmed.contains("dead_code") {
            Some("no #[allow(dead_code)] in production code")
        } else if trimmed.contains(".unwrap()") || trimmed.contains(".expect(") {
            Some("no unwrap/expect in production code")
        } else {
            None
        };

        if let Some(rule) = rule {
            violations.push(StyleViolation {
                file_path: file_path.to_string(),
                line_number: index + 1,
                rule,
                context: trimmed.to_string(),
            });
        }
    }

    violations
}

#[test]
fn test_check_source_detection() {
    let source = r#"
fn load() -> String {
    std::fs::read_to_string("a").unwrap()
}

#[allow(clippy::too_many_lines, dead_code)]
fn unused() {}

// .unwrap() in a comment is fine
fn fallback() -> u32 {
    "1".parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #[test]
    fn t() {
        Some(1).unwrap();
    }
}
"#;

    let violations = check_source("sample.rs", source);

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].line_number, 3);
    assert_eq!(violations[1].line_number, 6);
    assert!(violations[1].rule.contains("dead_code"));
}

#[test]
fn test_test_module_declaration_does_not_hide_production_code() {
    let source = r#"
#[cfg(test)]
pub mod mock;
#[cfg(test)] pub use mock::MockProvider;

pub fn first_char(keyword: &str) -> char {
    keyword.chars().next().unwrap()
}

#[cfg(test)]
mod tests {
    #[test]
    fn t() {
        if true {
            Some(1).unwrap();
        }
    }
}

pub fn after_tests(value: Option<u32>) -> u32 {
    value.expect("value")
}
"#;

    let violations = check_source("providers/mod.rs", source);

    let lines: Vec<usize> = violations.iter().map(|v| v.line_number).collect();
    assert_eq!(lines, vec![7, 21]);
}

#[test]
fn production_code_style() {
    let mut files = Vec::new();
    for dir in PRODUCTION_SOURCE_DIRS {
        find_rust_files(Path::new(dir), &mut files).unwrap();
    }
    assert!(!files.is_empty(), "no sources found; run from the placefind-tests directory");

    let mut violations = Vec::new();
    for file in &files {
        let contents = fs::read_to_string(file).unwrap();
        violations.extend(check_source(&file.to_string_lossy(), &contents));
    }

    for violation in &violations {
        println!(
            "{}:{} [{}]\n  {}",
            violation.file_path, violation.line_number, violation.rule, violation.context
        );
    }
    assert!(
        violations.is_empty(),
        "{} style violation(s) in {} file(s)",
        violations.len(),
        files.len()
    );
}
