use crate::common::command::{
    branch_activity, commit_all, head_revision, run_mygit_command, snapshot_store,
    staged_entries, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

const BASE: &str = "1\n2\n3\n4\n5\n6\n7\n";

#[rstest]
fn clean_three_way_merge_records_merge_revision(
    #[from(crate::common::command::repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_mygit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("f.txt"), BASE.to_string()));
    write_file(FileSpec::new(dir.join("gone.txt"), "bye\n".to_string()));
    commit_all(dir, "Base");
    let base = branch_activity(dir, "stem")[0].clone();

    run_mygit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(
        dir.join("f.txt"),
        BASE.replace("1\n", "one\n"),
    ));
    write_file(FileSpec::new(dir.join("ours.txt"), "ours\n".to_string()));
    commit_all(dir, "Ours");
    let tip1 = branch_activity(dir, "stem")[0].clone();

    run_mygit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.join("f.txt"),
        BASE.replace("7\n", "seven\n"),
    ));
    write_file(FileSpec::new(dir.join("theirs.txt"), "theirs\n".to_string()));
    std::fs::remove_file(dir.join("gone.txt"))?;
    commit_all(dir, "Theirs");
    let tip2 = branch_activity(dir, "feature")[0].clone();

    run_mygit_command(dir, &["checkout", "stem"])
        .assert()
        .success();

    run_mygit_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Merge made by the 'three-way' strategy.",
        ));

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "one\n2\n3\n4\n5\n6\nseven\n"
    );
    assert_eq!(read_file(&dir.join("ours.txt")), "ours\n");
    assert_eq!(read_file(&dir.join("theirs.txt")), "theirs\n");
    assert!(!dir.join("gone.txt").exists());

    let activity = branch_activity(dir, "stem");
    assert_eq!(activity.len(), 3);
    let parts = activity[0].split('&').collect::<Vec<_>>();
    assert_eq!(parts.len(), 4);
    assert_eq!(&parts[1..], &[tip1.as_str(), tip2.as_str(), base.as_str()]);
    assert_eq!(head_revision(dir), Some(activity[0].clone()));
    assert!(staged_entries(dir).is_empty());

    let store = snapshot_store(dir, &activity[0]);
    assert!(store.join("theirs.txt").is_file());
    assert!(!store.join("gone.txt").exists());

    let log = stdout_of(&mut run_mygit_command(dir, &["log"]));
    assert!(log.contains(&format!("Merge: {} {}\n", tip1, tip2)));
    assert!(log.contains("    Merge branch 'feature' into 'stem'\n"));

    // the recorded merge is not repeated
    run_mygit_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("Already up to date.\n");

    Ok(())
}
