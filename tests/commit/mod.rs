mod commit_skips_changes_that_no_longer_apply;
mod commit_without_staged_changes_fails;
