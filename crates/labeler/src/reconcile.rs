//! The label reconciliation pipeline.
//!
//! One pass per triggering event: resolve the labels the changed files
//! require, diff against the pull request's current labels, and add what is
//! missing and known to the repository. Labels are never removed and never
//! created; a label the repository does not declare is reported and skipped.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use github::{Label, PullRequestChange};
use owners::LabelResolver;

use crate::models::PullRequestRef;
use crate::tracker::TrackerClient;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Labels successfully added in this pass.
    pub applied: BTreeSet<String>,
    /// Required labels skipped because the repository does not declare them.
    pub skipped: BTreeSet<String>,
}

/// The labels the ownership rules require for this set of changes.
#[must_use]
pub fn required_labels(
    changes: &[PullRequestChange],
    resolver: &dyn LabelResolver,
) -> BTreeSet<String> {
    let mut required = BTreeSet::new();
    for change in changes {
        required.extend(resolver.find_labels_for_file(&change.filename));
    }
    required
}

/// Required labels partitioned by what can actually be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDelta {
    /// Missing from the PR and declared by the repository: add these.
    pub to_add: BTreeSet<String>,
    /// Missing from the PR but unknown to the repository: report only.
    pub nonexistent: BTreeSet<String>,
}

/// Diff `required` against the PR's current labels and the repository
/// vocabulary. Labels already on the PR need nothing; the rest split into
/// addable and unknown.
#[must_use]
pub fn partition_missing(
    required: &BTreeSet<String>,
    current: &BTreeSet<String>,
    valid: &BTreeSet<String>,
) -> LabelDelta {
    let mut to_add = BTreeSet::new();
    let mut nonexistent = BTreeSet::new();

    for label in required.difference(current) {
        if valid.contains(label) {
            to_add.insert(label.clone());
        } else {
            nonexistent.insert(label.clone());
        }
    }

    LabelDelta { to_add, nonexistent }
}

/// Run one reconciliation pass for a pull request.
///
/// Read failures (changed files, vocabulary, current labels) abort the pass.
/// Individual add failures are logged and skipped; the pass continues and
/// still reports success, so `applied` holds only the labels whose add call
/// succeeded.
pub async fn reconcile(
    tracker: &dyn TrackerClient,
    resolver: &dyn LabelResolver,
    pr: &PullRequestRef,
) -> Result<ReconcileOutcome> {
    let changes = tracker
        .pull_request_changes(&pr.org, &pr.repo, pr.number)
        .await
        .context("failed to read changed files")?;

    let required = required_labels(&changes, resolver);
    if required.is_empty() {
        // Nothing to add, so skip the remaining API reads.
        debug!(
            org = %pr.org,
            repo = %pr.repo,
            pr = pr.number,
            "No ownership labels requested for changed files"
        );
        return Ok(ReconcileOutcome::default());
    }

    let valid = label_names(
        tracker
            .repo_labels(&pr.org, &pr.repo)
            .await
            .context("failed to read repository label vocabulary")?,
    );
    let current = label_names(
        tracker
            .issue_labels(&pr.org, &pr.repo, pr.number)
            .await
            .context("failed to read currently applied labels")?,
    );

    let delta = partition_missing(&required, &current, &valid);

    let mut applied = BTreeSet::new();
    for label in &delta.to_add {
        match tracker.add_label(&pr.org, &pr.repo, pr.number, label).await {
            Ok(()) => {
                applied.insert(label.clone());
            }
            Err(e) => {
                error!(
                    pr = pr.number,
                    label = %label,
                    error = %e,
                    "Tracker failed to add label"
                );
            }
        }
    }

    if !delta.nonexistent.is_empty() {
        warn!(
            pr = pr.number,
            labels = ?delta.nonexistent,
            "Unable to add labels the repository does not declare"
        );
    }

    info!(
        org = %pr.org,
        repo = %pr.repo,
        pr = pr.number,
        applied = applied.len(),
        skipped = delta.nonexistent.len(),
        "Label reconciliation finished"
    );

    Ok(ReconcileOutcome {
        applied,
        skipped: delta.nonexistent,
    })
}

fn label_names(labels: Vec<Label>) -> BTreeSet<String> {
    labels.into_iter().map(|label| label.name).collect()
}
