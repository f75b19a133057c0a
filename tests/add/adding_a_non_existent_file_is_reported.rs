use crate::common::command::{run_mygit_command, staged_entries};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_non_existent_file_is_reported(
    #[from(crate::common::command::init_repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        repository_dir.path().join("4.txt"),
        "four".to_string(),
    ));

    run_mygit_command(repository_dir.path(), &["add", "4.txt", "missing.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staged '4.txt'"))
        .stderr(predicate::str::contains(
            "pathspec 'missing.txt' did not match any files",
        ));

    assert_eq!(staged_entries(repository_dir.path()), vec!["U:4.txt"]);

    Ok(())
}
