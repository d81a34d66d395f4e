use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;
use vcs::Repository;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with one file on disk and nothing staged
#[fixture]
pub fn repository(repository_dir: TempDir) -> (TempDir, Repository) {
    let repository = Repository::new(repository_dir.path()).expect("Failed to open repository");
    repository.init().expect("Failed to initialize repository");

    write_file(FileSpec::new(repository.path().join("a.txt"), "A".to_string()));

    (repository_dir, repository)
}

/// `a.txt` committed as `m1` on master
#[fixture]
pub fn committed_repository(repository: (TempDir, Repository)) -> (TempDir, Repository) {
    let (dir, repository) = repository;

    repository.add("a.txt").expect("Failed to stage a.txt");
    repository.commit("m1").expect("Failed to commit m1");

    (dir, repository)
}

pub fn run_vcs_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("vcs").expect("Failed to find vcs binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("VCS_REPOSITORY");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn vcs_commit(dir: &Path, message: &str) -> Command {
    run_vcs_command(dir, &["commit", "-m", message])
}
