use crate::common::command::{commit_all, run_mygit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn show_diff_between_branches(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
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
    commit_all(repository_dir.path(), "Grow one");

    run_mygit_command(repository_dir.path(), &["diff", "stem", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "--- a/1.txt\n+++ b/1.txt\n@@ -1,1 +1,2 @@\n",
        ))
        .stdout(predicate::str::contains("+more\n"))
        .stdout(predicate::str::contains("2.txt").not());

    // a branch against a working file compares that file only
    run_mygit_command(repository_dir.path(), &["diff", "stem", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("diff --mygit a/1.txt b/1.txt\n"));

    Ok(())
}
