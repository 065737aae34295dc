//! Architecture tests for file size limits.
//!
//! - Files >400 LOC get a warning; they probably hold more than one concern.
//! - Files >600 LOC fail the build unless listed in `EXCLUDED_FILES`.
//!
//! Walks every .rs file under crates/ and counts non-blank, non-comment lines.

use std::fs;
use std::path::{Path, PathBuf};

const WARNING_THRESHOLD: usize = 400;
const FAILURE_THRESHOLD: usize = 600;

/// Files excluded from size checks, as (path_suffix, justification).
const EXCLUDED_FILES: &[(&str, &str)] = &[];

#[test]
fn file_size_limits() {
    let workspace_root = find_workspace_root();
    let crates_dir = workspace_root.join("crates");
    assert!(crates_dir.exists(), "crates/ directory not found at {:?}", crates_dir);

    let rust_files = find_rust_files(&crates_dir);
    let mut failures = Vec::new();

    for file_path in &rust_files {
        let loc = count_loc(file_path);
        let relative = file_path.strip_prefix(&workspace_root).unwrap_or(file_path);
        let relative = relative.to_string_lossy();
        let excluded = EXCLUDED_FILES.iter().any(|(suffix, _)| relative.ends_with(suffix));

        if loc > FAILURE_THRESHOLD && !excluded {
            failures.push((relative.to_string(), loc));
        } else if loc > WARNING_THRESHOLD {
            eprintln!("[architecture] {}: {} LOC (warning threshold {})", relative, loc, WARNING_THRESHOLD);
        }
    }

    if !failures.is_empty() {
        let mut message = format!("\nFiles exceeding {} LOC:\n", FAILURE_THRESHOLD);
        for (path, loc) in &failures {
            message.push_str(&format!("  - {}: {} lines\n", path, loc));
        }
        message.push_str("\nSplit these files or add them to EXCLUDED_FILES with a justification.\n");
        panic!("{}", message);
    }

    eprintln!("[architecture] Checked {} Rust files for size limits.", rust_files.len());
}

/// Count lines of code, skipping blank lines, `//` comments, and block comment bodies.
fn count_loc(path: &Path) -> usize {
    let content = fs::read_to_string(path).expect("Failed to read file");
    let mut count = 0;
    let mut in_block_comment = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("/*") {
            in_block_comment = true;
        }
        if in_block_comment {
            if trimmed.ends_with("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if trimmed.starts_with("//") {
            continue;
        }
        count += 1;
    }

    count
}

/// Recursively find .rs files, skipping build output and this crate.
fn find_rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            name != "target" && name != "architecture-tests"
        })
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Find the workspace root by looking for Cargo.toml with [workspace].
fn find_workspace_root() -> PathBuf {
    let current_dir = std::env::current_dir().expect("Failed to get current directory");

    let mut dir = current_dir.as_path();
    loop {
        let cargo_toml = dir.join("Cargo.toml");
        if let Ok(content) = fs::read_to_string(&cargo_toml)
            && content.contains("[workspace]")
        {
            return dir.to_path_buf();
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return current_dir,
        }
    }
}

#[test]
fn test_count_loc_skips_comments_and_blanks() {
    let temp_dir = tempfile::tempdir().unwrap();
    let test_file = temp_dir.path().join("sample.rs");

    fs::write(
        &test_file,
        r#"//! Module documentation

/// Function documentation
fn main() {
    let x = 5; // inline comment
    /* block
       comment */
    println!("{x}");
}
"#,
    )
    .unwrap();

    // fn main() {, let x = 5;, println!(...);, }
    assert_eq!(count_loc(&test_file), 4);
}
