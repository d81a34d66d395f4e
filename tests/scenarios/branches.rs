use crate::common::command::{committed_repository, repository};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use vcs::{Repository, VcsError};

#[rstest]
fn new_branch_starts_at_head_and_becomes_current(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let head = repository.log()?[0].oid.clone();

    let name = repository.new_branch("feature/x")?;

    assert_eq!(name.as_ref(), "feature/x");
    assert_eq!(repository.branch()?, name);
    assert_eq!(repository.log()?[0].oid, head);
    assert_eq!(
        repository
            .branches()?
            .iter()
            .map(|branch| branch.as_ref().to_string())
            .collect::<Vec<_>>(),
        vec!["feature/x", "master"]
    );

    let on_feature = repository.commit("m2")?;
    assert_eq!(repository.database().load(&on_feature)?.branch(), &name);

    Ok(())
}

#[rstest]
fn new_branch_keeps_the_working_tree_and_staged_files(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    write_file(FileSpec::new(repository.path().join("b.txt"), "B".to_string()));
    repository.add("b.txt")?;
    let before = repository.status()?;

    repository.new_branch("test")?;

    assert_eq!(repository.status()?, before);

    Ok(())
}

#[rstest]
fn branch_can_be_created_before_the_first_commit(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = repository;

    repository.new_branch("early")?;
    repository.add("a.txt")?;
    let oid = repository.commit("m1")?;

    assert_eq!(repository.database().load(&oid)?.branch().as_ref(), "early");
    assert!(matches!(repository.checkout("master"), Err(VcsError::NotFound(_))));

    Ok(())
}

#[rstest]
fn creating_an_existing_branch_fails(committed_repository: (TempDir, Repository)) {
    let (_dir, repository) = committed_repository;

    assert!(matches!(
        repository.new_branch("master"),
        Err(VcsError::AlreadyExists(_))
    ));
}

#[rstest]
#[case("HEAD")]
#[case("")]
#[case("bad..name")]
#[case("with space")]
#[case("ends.lock")]
fn invalid_branch_names_are_rejected(
    committed_repository: (TempDir, Repository),
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;

    assert!(matches!(
        repository.new_branch(name),
        Err(VcsError::InvalidOperation(_))
    ));
    assert_eq!(repository.branches()?.len(), 1);

    Ok(())
}

#[rstest]
fn removing_a_branch_forgets_it(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    repository.new_branch("test")?;
    repository.checkout("master")?;

    repository.remove_branch("test")?;

    assert_eq!(repository.branches()?.len(), 1);
    assert!(matches!(repository.checkout("test"), Err(VcsError::NotFound(_))));

    Ok(())
}

#[rstest]
fn current_branch_cannot_be_removed(committed_repository: (TempDir, Repository)) {
    let (_dir, repository) = committed_repository;

    assert!(matches!(
        repository.remove_branch("master"),
        Err(VcsError::InvalidOperation(_))
    ));
}

#[rstest]
fn removing_an_unknown_branch_fails(committed_repository: (TempDir, Repository)) {
    let (_dir, repository) = committed_repository;

    assert!(matches!(
        repository.remove_branch("ghost"),
        Err(VcsError::NotFound(_))
    ));
}
