use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_mygit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    mygit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_mygit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("mygit").expect("Failed to find mygit binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("MYGIT_MERGE_PREFER");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn mygit_commit(dir: &Path, message: &str) -> Command {
    run_mygit_command(dir, &["commit", "-m", message])
}

/// Stage everything and commit it.
pub fn commit_all(dir: &Path, message: &str) {
    run_mygit_command(dir, &["add", "."]).assert().success();
    mygit_commit(dir, message).assert().success();
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run mygit");
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

pub fn metadata_dir(dir: &Path) -> PathBuf {
    dir.join(".mygit")
}

/// Lines of the staging file.
pub fn staged_entries(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(metadata_dir(dir).join("STAGING"))
        .expect("Failed to read STAGING")
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn branch_token(dir: &Path, name: &str) -> Option<String> {
    let raw = std::fs::read_to_string(metadata_dir(dir).join("BRANCH").join("MAPPER.json"))
        .expect("Failed to read MAPPER.json");
    let pairs: Vec<(String, String)> =
        serde_json::from_str(&raw).expect("MAPPER.json is not an array of pairs");

    pairs
        .into_iter()
        .find(|(_, branch)| branch == name)
        .map(|(token, _)| token)
}

/// Activity list of a branch, tip first.
pub fn branch_activity(dir: &Path, name: &str) -> Vec<String> {
    let token = branch_token(dir, name).unwrap_or_else(|| panic!("no branch named {}", name));
    std::fs::read_to_string(
        metadata_dir(dir)
            .join("BRANCH")
            .join(token)
            .join("ACTIVITY"),
    )
    .expect("Failed to read ACTIVITY")
    .lines()
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}

/// Snapshot component of HEAD, `None` before the first commit.
pub fn head_revision(dir: &Path) -> Option<String> {
    let raw =
        std::fs::read_to_string(metadata_dir(dir).join("HEAD")).expect("Failed to read HEAD");
    let (_, revision) = raw.trim().split_once('@').expect("HEAD without '@'");

    (!revision.is_empty()).then(|| revision.to_string())
}

/// Store directory of a revision, ignoring any merge lineage suffix.
pub fn snapshot_store(dir: &Path, revision: &str) -> PathBuf {
    let id = revision.split('&').next().unwrap_or(revision);
    metadata_dir(dir).join("REPO").join(id).join("store")
}

pub fn snapshot_count(dir: &Path) -> usize {
    std::fs::read_dir(metadata_dir(dir).join("REPO"))
        .expect("Failed to read REPO")
        .count()
}
