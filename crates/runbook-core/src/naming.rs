//! Artifact name allocation.
//!
//! Every runbook gets a unique, filesystem-safe name within one conversion
//! run. The default candidate is `{base}_{alert}`; on collision the group name
//! is appended, then a counter starting at 2.
//!
//! Collisions are checked case-insensitively since generated files may land
//! on a case-folding filesystem. Names are pure ASCII.

use std::collections::HashSet;

/// Replaces everything that is not safe in a file name with `_`.
///
/// ASCII alphanumerics, `-`, `_` and `.` are kept; whitespace, non-ASCII
/// letters and every other character become `_`. A leading `.` is replaced
/// as well so the result is never hidden, `.` or `..`.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if out.starts_with('.') {
        out.replace_range(..1, "_");
    }
    out
}

/// Allocates a unique name for the runbook of `alert` in `group`.
///
/// The returned name is recorded in `used`, so the next call sees it.
pub fn allocate(base: &str, group: &str, alert: &str, used: &mut HashSet<String>) -> String {
    let candidate = format!("{}_{}", sanitize(base), sanitize(alert));
    if used.insert(fold(&candidate)) {
        return candidate;
    }

    let grouped = format!("{candidate}_{}", sanitize(group));
    if used.insert(fold(&grouped)) {
        return grouped;
    }

    let mut counter = 2_usize;
    loop {
        let numbered = format!("{grouped}_{counter}");
        if used.insert(fold(&numbered)) {
            return numbered;
        }
        counter += 1;
    }
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Owns the set of names handed out during one conversion run.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    base: String,
    used: HashSet<String>,
}

impl NameAllocator {
    /// Creates an allocator for artifacts derived from `base`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            used: HashSet::new(),
        }
    }

    /// Allocates the next name. See [`allocate`].
    pub fn allocate(&mut self, group: &str, alert: &str) -> String {
        allocate(&self.base, group, alert, &mut self.used)
    }
}
