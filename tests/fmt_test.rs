//! Style gate: every source file must match rustfmt's canonical formatting.

use std::path::{Path, PathBuf};
use std::process::Command;

fn list_rs_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            list_rs_files(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

#[test]
fn sources_match_rustfmt() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut files = Vec::new();
    list_rs_files(&root.join("src"), &mut files);
    list_rs_files(&root.join("tests"), &mut files);
    assert!(!files.is_empty(), "no source files found under {root:?}");

    let mut badly_formatted = Vec::new();
    for file in &files {
        let status = Command::new("rustfmt")
            .args(["--edition", "2021", "--check", "--quiet"])
            .arg(file)
            .status()
            .expect("rustfmt not found; install it with `rustup component add rustfmt`");
        if !status.success() {
            badly_formatted.push(file);
        }
    }

    if !badly_formatted.is_empty() {
        let fixes: String = badly_formatted
            .iter()
            .map(|f| format!("  rustfmt --edition 2021 {}\n", f.display()))
            .collect();
        panic!(
            "{} file(s) need to be formatted, run:\n{fixes}",
            badly_formatted.len()
        );
    }
}
