//! Assertions over console state.

use crate::console::{AutomationConsole, LogKind};
use crate::core::StageStatus;

/// Asserts that the log ends with `expected`, compared by text.
///
/// # Panics
///
/// Panics if the tail differs.
pub fn assert_log_tail(console: &AutomationConsole, expected: &[&str]) {
    let log = console.log();
    let start = log.len().saturating_sub(expected.len());
    let tail: Vec<&str> = log[start..].iter().map(|e| e.text.as_str()).collect();
    assert_eq!(tail, expected, "unexpected log tail");
}

/// Asserts that some log entry of `kind` contains `needle`.
///
/// # Panics
///
/// Panics if no entry matches.
pub fn assert_log_contains(console: &AutomationConsole, kind: LogKind, needle: &str) {
    assert!(
        console
            .log()
            .iter()
            .any(|e| e.kind == kind && e.text.contains(needle)),
        "no {kind} entry containing {needle:?}"
    );
}

/// Asserts that every stage has `status`.
///
/// # Panics
///
/// Panics if any stage differs.
pub fn assert_all_stages(console: &AutomationConsole, status: StageStatus) {
    for stage in console.stages() {
        assert_eq!(stage.status, status, "stage {} has unexpected status", stage.id);
    }
}

/// Asserts the status of one stage.
///
/// # Panics
///
/// Panics if the stage is missing or differs.
pub fn assert_stage(console: &AutomationConsole, id: &str, status: StageStatus) {
    let stage = console
        .stages()
        .into_iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| panic!("no stage {id}"));
    assert_eq!(stage.status, status, "stage {id} has unexpected status");
}
