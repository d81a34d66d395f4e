use crate::common::command::{committed_repository, repository};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;
use vcs::{Repository, VcsError};

#[rstest]
fn checkout_rebuilds_every_past_state(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let a = repository.path().join("a.txt");
    let b = repository.path().join("dir").join("b.txt");
    let m1 = repository.log()?[0].oid.clone();

    write_file(FileSpec::new(a.clone(), "A2".to_string()));
    write_file(FileSpec::new(b.clone(), "B".to_string()));
    repository.add(&b)?;
    let m2 = repository.commit("m2")?;

    repository.checkout(&m1.to_string())?;
    assert_eq!(read_file(&a), "A");
    assert!(!b.exists());
    assert!(!repository.path().join("dir").exists());
    assert!(repository.status()?.is_clean());

    repository.checkout(&m2.to_string())?;
    assert_eq!(read_file(&a), "A2");
    assert_eq!(read_file(&b), "B");
    assert!(repository.status()?.is_clean());

    Ok(())
}

#[rstest]
fn checkout_commit_restores_committed_bytes(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = repository;
    let a = repository.path().join("a.txt");
    write_file(FileSpec::new(a.clone(), String::new()));
    repository.add("a.txt")?;
    let m1 = repository.commit("m1")?;
    assert!(repository.added()?.is_empty());

    write_file(FileSpec::new(a.clone(), "hello".to_string()));
    assert_eq!(repository.changed()?, BTreeSet::from([a.clone()]));
    repository.commit("m2")?;

    repository.checkout_commit(&m1)?;

    assert_eq!(std::fs::read(&a)?, Vec::<u8>::new());
    assert_eq!(repository.log()?[0].oid, m1);

    Ok(())
}

#[rstest]
fn checkout_of_a_branch_switches_to_it(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let a = repository.path().join("a.txt");
    repository.new_branch("test")?;
    write_file(FileSpec::new(a.clone(), "on test".to_string()));
    let on_test = repository.commit("m2")?;

    let master = repository.checkout("master")?;
    assert_eq!(repository.branch()?.as_ref(), "master");
    assert_eq!(read_file(&a), "A");
    assert_eq!(repository.log()?[0].oid, master);

    let test = repository.checkout("test")?;
    assert_eq!(test, on_test);
    assert_eq!(repository.branch()?.as_ref(), "test");
    assert_eq!(read_file(&a), "on test");

    Ok(())
}

#[rstest]
fn checkout_discards_files_outside_the_snapshot(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let scratch = repository.path().join("scratch").join("notes.txt");
    write_file(FileSpec::new(scratch.clone(), "notes".to_string()));

    repository.checkout("HEAD")?;

    assert!(!scratch.exists());
    assert!(repository.path().join("a.txt").is_file());
    assert!(repository.storage_path().join("info").is_file());

    Ok(())
}

#[rstest]
fn checkout_of_an_old_commit_moves_its_branch(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let m1 = repository.log()?[0].oid.clone();
    repository.commit("m2")?;

    repository.checkout("HEAD^")?;
    let m3 = repository.commit("m3")?;

    let log = repository.log()?;
    assert_eq!(
        log.iter().map(|entry| entry.oid.clone()).collect::<Vec<_>>(),
        vec![m3, m1]
    );

    Ok(())
}

#[rstest]
#[case("nope")]
#[case("HEAD~5")]
#[case("deadbeef")]
#[case("bad..name")]
fn checkout_of_an_unknown_revision_fails(
    committed_repository: (TempDir, Repository),
    #[case] revision: &str,
) {
    let (_dir, repository) = committed_repository;

    let result = repository.checkout(revision);

    assert!(matches!(result, Err(VcsError::NotFound(_))));
    assert!(repository.path().join("a.txt").is_file());
}

#[rstest]
fn checkout_without_commits_fails(repository: (TempDir, Repository)) {
    let (_dir, repository) = repository;

    assert!(matches!(
        repository.checkout("master"),
        Err(VcsError::NotFound(_))
    ));
}
