use std::path::Path;

use git2::Repository;

use crate::domain::ActionError;
use crate::ports::RepositoryCloner;

/// Clones repositories in-process with libgit2.
#[derive(Debug, Clone, Default)]
pub struct Git2Cloner;

impl Git2Cloner {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryCloner for Git2Cloner {
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<(), ActionError> {
        let clone_failed =
            |details: String| ActionError::CloneFailed { url: url.to_string(), details };

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| clone_failed(e.to_string()))?;
        }

        tracing::info!(url, dest = %dest.display(), "cloning repository");
        Repository::clone(url, dest).map(|_| ()).map_err(|e| clone_failed(e.message().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;

    fn seed_repository(path: &Path) {
        let repo = Repository::init(path).unwrap();
        std::fs::write(path.join("tpm"), "#!/bin/sh\n").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("tpm")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = Signature::now("Test User", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[]).unwrap();
    }

    #[test]
    fn clones_local_repository() {
        let temp = tempfile::tempdir().unwrap();
        let upstream = temp.path().join("upstream");
        std::fs::create_dir(&upstream).unwrap();
        seed_repository(&upstream);

        let dest = temp.path().join("home/.tmux/plugins/tpm");
        Git2Cloner::new().clone_repository(upstream.to_str().unwrap(), &dest).unwrap();

        assert!(dest.join(".git").is_dir());
        assert_eq!(std::fs::read_to_string(dest.join("tpm")).unwrap(), "#!/bin/sh\n");
    }

    #[test]
    fn missing_upstream_is_clone_failure() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("nope");

        let err = Git2Cloner::new()
            .clone_repository(missing.to_str().unwrap(), &temp.path().join("dest"))
            .unwrap_err();
        assert!(matches!(err, ActionError::CloneFailed { .. }));
    }
}
