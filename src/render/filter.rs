//! Branch allow-list for push notifications.

use std::fmt;

/// Comma separated list of branch or tag names a push must touch to be
/// announced. An empty filter lets everything through.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BranchFilter {
    names: Vec<String>,
}

impl BranchFilter {
    /// Parse the configured list. Entries are trimmed and empty entries are
    /// dropped, so `""` and `" , "` both mean "every branch".
    pub fn parse(list: &str) -> Self {
        let names = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a full ref such as `refs/heads/master` passes.
    pub fn allows(&self, git_ref: &str) -> bool {
        self.is_empty() || self.names.iter().any(|name| name == short_ref(git_ref))
    }
}

impl fmt::Debug for BranchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.names).finish()
    }
}

/// Strip `refs/heads/` or `refs/tags/` from a ref.
pub fn short_ref(git_ref: &str) -> &str {
    git_ref
        .strip_prefix("refs/heads/")
        .or_else(|| git_ref.strip_prefix("refs/tags/"))
        .unwrap_or(git_ref)
}
