use crate::common::command::run_mygit_command;
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn print_untracked_files_before_first_commit(
    #[from(crate::common::command::repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("b.txt"),
        "b".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("a.txt"),
        "a".to_string(),
    ));

    run_mygit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "On branch stem\n\
            \n\
            Untracked files:\n  \
            (use 'mygit add <files>...' to include them in the next commit)\n    \
            NEW: a/a.txt\n    \
            NEW: b.txt\n",
        );

    Ok(())
}
