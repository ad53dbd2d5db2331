//! In-memory snapshot of a repository's ownership label rules.

use std::collections::{BTreeMap, BTreeSet};

use crate::LabelResolver;

/// A repository's label rules at one ref, keyed by directory.
///
/// The key is the repo-relative directory that declared the labels, with
/// `""` standing for the repository root. Lookups union the labels of every
/// directory governing the path, so a root rule applies to every file and a
/// `docs/` rule applies to everything under `docs/`.
#[derive(Debug, Clone, Default)]
pub struct RepoOwners {
    labels_by_dir: BTreeMap<String, BTreeSet<String>>,
}

impl RepoOwners {
    /// Record the labels declared by `dir`'s ownership rules.
    ///
    /// Declaring a directory twice merges the label sets.
    pub fn insert_dir(&mut self, dir: impl Into<String>, labels: BTreeSet<String>) {
        self.labels_by_dir.entry(dir.into()).or_default().extend(labels);
    }

    /// Number of directories with label rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.labels_by_dir.len()
    }

    /// True when no directory declares any labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels_by_dir.is_empty()
    }
}

impl LabelResolver for RepoOwners {
    fn find_labels_for_file(&self, path: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();

        if let Some(labels) = self.labels_by_dir.get("") {
            out.extend(labels.iter().cloned());
        }

        // Walk the ancestor directories: "a/b/c.rs" consults "a" and "a/b".
        if let Some((dirs, _file)) = path.rsplit_once('/') {
            let mut prefix = String::new();
            for segment in dirs.split('/') {
                if !prefix.is_empty() {
                    prefix.push('/');
                }
                prefix.push_str(segment);
                if let Some(labels) = self.labels_by_dir.get(&prefix) {
                    out.extend(labels.iter().cloned());
                }
            }
        }

        out
    }
}
