use crate::common::command::{branch_activity, commit_all, head_revision, run_mygit_command};
use crate::common::file::{FileSpec, read_file, snapshot_tree, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn fast_forward_merge(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let a = branch_activity(repository_dir.path(), "stem");
    assert_eq!(a.len(), 1);

    run_mygit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();
    run_mygit_command(repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one\nmore\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("new.txt"),
        "new\n".to_string(),
    ));
    commit_all(repository_dir.path(), "Advance feature");
    let feature_activity = branch_activity(repository_dir.path(), "feature");
    let feature_tree = snapshot_tree(repository_dir.path());
    assert_eq!(feature_activity.len(), 2);
    assert_eq!(feature_activity[1], a[0]);

    run_mygit_command(repository_dir.path(), &["checkout", "stem"])
        .assert()
        .success();

    run_mygit_command(repository_dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Updating {}..{}\nFast-forward\n",
            a[0], feature_activity[0]
        )))
        .stdout(predicate::str::contains(" 1.txt: ++-\n"))
        .stdout(predicate::str::contains(" new.txt: +\n"));

    assert_eq!(branch_activity(repository_dir.path(), "stem"), feature_activity);
    assert_eq!(
        head_revision(repository_dir.path()),
        Some(feature_activity[0].clone())
    );
    assert_eq!(snapshot_tree(repository_dir.path()), feature_tree);
    assert_eq!(
        read_file(&repository_dir.path().join("1.txt")),
        "one\nmore\n"
    );

    Ok(())
}
