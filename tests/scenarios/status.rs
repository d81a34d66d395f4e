use crate::common::command::{committed_repository, repository};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;
use vcs::Repository;

#[rstest]
fn fresh_repository_reports_added_and_untracked(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = repository;
    let a = repository.path().join("a.txt");
    let b = repository.path().join("nested").join("b.txt");
    write_file(FileSpec::new(b.clone(), "B".to_string()));

    repository.add("a.txt")?;
    let status = repository.status()?;

    assert_eq!(status.added, BTreeSet::from([a]));
    assert_eq!(status.untracked, BTreeSet::from([b]));
    assert!(status.changed.is_empty());
    assert!(status.deleted.is_empty());
    assert_eq!(repository.added()?, status.added);
    assert_eq!(repository.untracked()?, status.untracked);

    Ok(())
}

#[rstest]
fn status_after_commit_is_clean(committed_repository: (TempDir, Repository)) {
    let (_dir, repository) = committed_repository;

    let status = repository.status().unwrap();

    assert!(status.is_clean(), "unexpected changes: {:?}", status);
}

#[rstest]
fn edits_and_deletions_since_head_are_reported(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let a = repository.path().join("a.txt");
    let b = repository.path().join("b.txt");
    write_file(FileSpec::new(b.clone(), "B".to_string()));
    repository.add("b.txt")?;
    repository.commit("m2")?;

    write_file(FileSpec::new(a.clone(), "A2".to_string()));
    std::fs::remove_file(&b)?;

    assert_eq!(repository.changed()?, BTreeSet::from([a]));
    assert_eq!(repository.deleted()?, BTreeSet::from([b]));
    assert!(repository.added()?.is_empty());

    Ok(())
}

#[rstest]
fn staged_files_new_to_head_are_added(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let c = repository.path().join("c.txt");
    write_file(FileSpec::new(c.clone(), "C".to_string()));

    assert_eq!(repository.untracked()?, BTreeSet::from([c.clone()]));

    repository.add("c.txt")?;

    assert_eq!(repository.added()?, BTreeSet::from([c]));
    assert!(repository.untracked()?.is_empty());

    Ok(())
}

#[rstest]
fn storage_directory_is_never_reported(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;

    let status = repository.status()?;

    assert!(
        status
            .changes()
            .all(|(_, path)| !path.starts_with(repository.storage_path()))
    );

    Ok(())
}
