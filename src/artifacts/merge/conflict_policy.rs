use std::path::Path;

/// Decides whether a locally present file that differs from the incoming
/// version survives a merge
///
/// Called once per conflicting path, before the merge commit is created.
/// Returning `true` keeps the local file, `false` overwrites it with the
/// incoming content.
pub trait ConflictPolicy {
    fn keep_local(&mut self, path: &Path) -> bool;
}

impl<F> ConflictPolicy for F
where
    F: FnMut(&Path) -> bool,
{
    fn keep_local(&mut self, path: &Path) -> bool {
        self(path)
    }
}

/// Always keep the local file
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepLocal;

impl ConflictPolicy for KeepLocal {
    fn keep_local(&mut self, _path: &Path) -> bool {
        true
    }
}

/// Always take the incoming file
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeIncoming;

impl ConflictPolicy for TakeIncoming {
    fn keep_local(&mut self, _path: &Path) -> bool {
        false
    }
}
