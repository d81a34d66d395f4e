use crate::common::command::{committed_repository, repository, repository_dir};
use crate::common::file::{FileSpec, read_file, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;
use vcs::{Repository, VcsError};

#[rstest]
fn first_commit_records_every_staged_file(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = repository;
    let files = write_generated_files(&repository.path().join("nested"), 3);
    repository.add("a.txt")?;
    for file in &files {
        repository.add(&file.path)?;
    }

    let oid = repository.commit("m1")?;
    let commit = repository.database().load(&oid)?;

    let mut expected = files.iter().map(|file| file.path.clone()).collect::<BTreeSet<_>>();
    expected.insert(repository.path().join("a.txt"));
    assert_eq!(commit.snapshot(), &expected);
    assert_eq!(commit.blobs().len(), expected.len());
    assert!(commit.is_root());
    assert_eq!(commit.branch().as_ref(), "master");
    assert!(repository.status()?.is_clean());

    Ok(())
}

#[rstest]
fn only_modified_files_carry_content(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let a = repository.path().join("a.txt");
    let b = repository.path().join("b.txt");
    write_file(FileSpec::new(b.clone(), "B".to_string()));
    repository.add("b.txt")?;
    let m2 = repository.commit("m2")?;

    write_file(FileSpec::new(a.clone(), "A2".to_string()));
    let m3 = repository.commit("m3")?;

    let m2 = repository.database().load(&m2)?;
    let m3 = repository.database().load(&m3)?;
    assert_eq!(m2.changed_paths().collect::<Vec<_>>(), vec![b.as_path()]);
    assert_eq!(m3.changed_paths().collect::<Vec<_>>(), vec![a.as_path()]);
    assert_eq!(m3.blob(&a).map(|data| data.to_vec()), Some(b"A2".to_vec()));
    assert_eq!(m3.snapshot(), &BTreeSet::from([a, b]));
    assert_eq!(m3.generation(), 3);

    Ok(())
}

#[rstest]
fn deleted_files_leave_the_snapshot(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let b = repository.path().join("b.txt");
    write_file(FileSpec::new(b.clone(), "B".to_string()));
    repository.add("b.txt")?;
    let m2 = repository.commit("m2")?;

    std::fs::remove_file(&b)?;
    let m3 = repository.commit("m3")?;

    let m3 = repository.database().load(&m3)?;
    assert_eq!(m3.snapshot(), &BTreeSet::from([repository.path().join("a.txt")]));
    assert!(m3.blobs().is_empty());

    repository.checkout(&m2.to_string())?;
    assert_eq!(read_file(&b), "B");

    repository.checkout(&m3.oid().to_string())?;
    assert!(!b.exists());

    Ok(())
}

#[rstest]
fn deletion_and_no_change_on_the_same_parent_get_distinct_ids(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let a = repository.path().join("a.txt");
    let b = repository.path().join("b.txt");
    write_file(FileSpec::new(b.clone(), "B".to_string()));
    repository.add("b.txt")?;
    let base = repository.commit("m2")?;

    std::fs::remove_file(&b)?;
    let without_b = repository.commit("x")?;

    repository.checkout_commit(&base)?;
    let with_b = repository.commit("x")?;

    assert_ne!(without_b, with_b);
    assert!(repository.added()?.is_empty());
    assert_eq!(
        repository.database().load(&with_b)?.snapshot(),
        &BTreeSet::from([a.clone(), b.clone()])
    );
    assert_eq!(
        repository.database().load(&without_b)?.snapshot(),
        &BTreeSet::from([a])
    );

    repository.checkout_commit(&without_b)?;
    assert!(!b.exists());

    repository.checkout_commit(&with_b)?;
    assert_eq!(read_file(&b), "B");

    Ok(())
}

#[rstest]
#[case("")]
#[case("   \n\t")]
fn blank_messages_are_rejected(
    committed_repository: (TempDir, Repository),
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;

    let result = repository.commit(message);

    assert!(matches!(result, Err(VcsError::InvalidOperation(_))));
    assert_eq!(repository.log()?.len(), 1);

    Ok(())
}

#[rstest]
fn identical_trees_on_different_parents_get_distinct_ids(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;

    let m2 = repository.commit("same")?;
    let m3 = repository.commit("same")?;

    assert_ne!(m2, m3);
    assert_eq!(
        repository.database().load(&m3)?.parent(),
        Some(&m2),
        "every commit links to the previous head"
    );

    Ok(())
}

#[rstest]
fn staged_file_missing_from_disk_fails_the_first_commit(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = repository;
    repository.add("ghost.txt")?;

    let result = repository.commit("m1");

    assert!(matches!(result, Err(VcsError::Io { .. })));
    assert!(repository.log()?.is_empty());

    Ok(())
}

#[rstest]
fn commands_fail_before_init(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository = Repository::new(repository_dir.path())?;

    assert!(!repository.is_initialized());
    assert!(matches!(repository.commit("m1"), Err(VcsError::Store { .. })));
    assert!(matches!(repository.status(), Err(VcsError::Store { .. })));

    repository.init()?;
    assert!(repository.is_initialized());
    assert!(matches!(repository.init(), Err(VcsError::AlreadyExists(_))));

    Ok(())
}

#[rstest]
fn log_lists_history_newest_first(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = committed_repository;
    let m2 = repository.commit("  m2\n\nwith a body  ")?;

    let log = repository.log()?;

    assert_eq!(
        log.iter().map(|entry| entry.message.as_str()).collect::<Vec<_>>(),
        vec!["m2\n\nwith a body", "m1"]
    );
    assert_eq!(log[0].oid, m2);
    assert!(log[0].timestamp >= log[1].timestamp);

    Ok(())
}

#[rstest]
fn commit_records_survive_reopening(
    committed_repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, repository) = committed_repository;
    let head = repository.log()?[0].oid.clone();
    drop(repository);

    let reopened = Repository::new(dir.path())?;
    let commit = reopened.database().load(&head)?;

    assert_eq!(commit.message(), "m1");
    assert_eq!(
        commit.snapshot().iter().collect::<Vec<_>>(),
        vec![&reopened.path().join("a.txt")]
    );

    Ok(())
}
