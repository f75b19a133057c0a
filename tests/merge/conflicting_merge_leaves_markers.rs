use crate::common::command::{branch_activity, head_revision, run_mygit_command, snapshot_count};
use crate::common::file::read_file;
use crate::merge::diverge_on_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn conflicting_merge_leaves_markers(
    #[from(crate::common::command::repository_dir)] repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    diverge_on_file(dir, "X\n", "Y\n", "Z\n");

    let activity = branch_activity(dir, "stem");
    let head = head_revision(dir);
    let snapshots = snapshot_count(dir);

    run_mygit_command(dir, &["merge", "feature"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "CONFLICT (content): Merge conflict in f.txt",
        ))
        .stderr(predicate::str::contains("Automatic merge failed"));

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< stem\nY\n=======\nZ\n>>>>>>> feature\n"
    );

    // the provisional snapshot is discarded and the branch does not move
    assert_eq!(branch_activity(dir, "stem"), activity);
    assert_eq!(head_revision(dir), head);
    assert_eq!(snapshot_count(dir), snapshots);

    Ok(())
}
