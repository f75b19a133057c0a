use crate::common::command::{branch_activity, commit_all, head_revision, run_mygit_command};
use crate::common::file::{FileSpec, delete_path, read_file, snapshot_tree, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_restores_its_tip(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let stem_tree = snapshot_tree(repository_dir.path());

    run_mygit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();
    run_mygit_command(repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Switched to branch 'feature'"));

    write_file(FileSpec::new(
        repository_dir.path().join("a").join("c").join("4.txt"),
        "four".to_string(),
    ));
    delete_path(&repository_dir.path().join("1.txt"));
    commit_all(repository_dir.path(), "Feature work");
    let feature_tree = snapshot_tree(repository_dir.path());

    run_mygit_command(repository_dir.path(), &["checkout", "stem"])
        .assert()
        .success();
    assert_eq!(snapshot_tree(repository_dir.path()), stem_tree);
    assert!(!repository_dir.path().join("a").join("c").exists());
    assert_eq!(
        head_revision(repository_dir.path()),
        branch_activity(repository_dir.path(), "stem").first().cloned()
    );

    run_mygit_command(repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    assert_eq!(snapshot_tree(repository_dir.path()), feature_tree);
    assert_eq!(
        read_file(&repository_dir.path().join("a").join("c").join("4.txt")),
        "four"
    );

    run_mygit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("On branch feature\nnothing to commit, working tree clean\n");

    Ok(())
}
