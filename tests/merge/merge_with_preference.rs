use crate::common::command::{branch_activity, run_mygit_command};
use crate::common::file::read_file;
use crate::merge::diverge_on_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(&["merge", "feature", "--prefer", "theirs"], None, "Z\n")]
#[case(&["merge", "feature", "--prefer", "ours"], None, "Y\n")]
#[case(&["merge", "feature"], Some("theirs"), "Z\n")]
fn merge_with_preference(
    #[from(crate::common::command::repository_dir)] repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] env_preference: Option<&str>,
    #[case] expected: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    diverge_on_file(dir, "X\n", "Y\n", "Z\n");

    let mut cmd = run_mygit_command(dir, args);
    if let Some(preference) = env_preference {
        cmd.env("MYGIT_MERGE_PREFER", preference);
    }
    cmd.assert().success();

    assert_eq!(read_file(&dir.join("f.txt")), expected);
    assert_eq!(branch_activity(dir, "stem").len(), 3);
    assert!(branch_activity(dir, "stem")[0].contains('&'));

    Ok(())
}
