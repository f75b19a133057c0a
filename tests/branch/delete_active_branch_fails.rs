use crate::common::command::{metadata_dir, run_mygit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn delete_active_branch_fails(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mygit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();

    let ledger = metadata_dir(repository_dir.path()).join("BRANCH");
    let mapper_before = std::fs::read_to_string(ledger.join("MAPPER.json"))?;
    let active_before = std::fs::read_to_string(ledger.join("ACTIVE"))?;

    run_mygit_command(repository_dir.path(), &["branch", "delete", "stem"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot delete the active branch 'stem'",
        ));

    assert_eq!(std::fs::read_to_string(ledger.join("MAPPER.json"))?, mapper_before);
    assert_eq!(std::fs::read_to_string(ledger.join("ACTIVE"))?, active_before);
    assert!(ledger.join(active_before.trim()).join("ACTIVITY").is_file());

    Ok(())
}
