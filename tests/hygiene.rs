//! Hygiene: source-level rules checked at test time.
//!
//! Scans `src/` (excluding `*_test.rs`) for patterns that crash the tab,
//! swallow errors, or bypass the storage and logging seams. Each pattern has
//! a budget. Budgets only shrink: to add an occurrence, remove another first.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics abort the whole tab" },
    Budget { pattern: ".expect(", max: 0, why: "panics abort the whole tab" },
    Budget { pattern: "panic!(", max: 0, why: "panics abort the whole tab" },
    Budget { pattern: "unreachable!(", max: 0, why: "panics abort the whole tab" },
    Budget { pattern: "todo!(", max: 0, why: "stubs must not ship" },
    Budget { pattern: "unimplemented!(", max: 0, why: "stubs must not ship" },
    Budget { pattern: "let _ =", max: 0, why: "discards a result without inspecting it" },
    // Env vars and `localStorage` lookups, where absence is the normal case.
    Budget { pattern: ".ok()", max: 5, why: "drops the error value" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code instead" },
    Budget { pattern: "println!(", max: 0, why: "log through tracing" },
    Budget { pattern: "eprintln!(", max: 0, why: "log through tracing" },
];

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
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().replace('\\', "/");
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn describe(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn source_tree_is_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("src/lib.rs")), "run from the crate root");
}

#[test]
fn pattern_budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            failures.push(format!(
                "`{}` budget exceeded: found {count}, max {} ({})\n{}",
                budget.pattern,
                budget.max,
                budget.why,
                describe(&found)
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn local_storage_is_only_touched_by_the_storage_module() {
    let files = source_files();
    let offenders: Vec<_> = hits(&files, "local_storage()")
        .into_iter()
        .filter(|(path, _)| !path.ends_with("util/storage.rs"))
        .collect();
    assert!(offenders.is_empty(), "use util::storage instead:\n{}", describe(&offenders));
}

#[test]
fn session_key_is_owned_by_the_session_store() {
    let files = source_files();
    let offenders: Vec<_> = hits(&files, "\"auth-session\"")
        .into_iter()
        .filter(|(path, _)| !path.ends_with("services/session.rs"))
        .collect();
    assert!(offenders.is_empty(), "use SESSION_STORAGE_KEY:\n{}", describe(&offenders));
}
