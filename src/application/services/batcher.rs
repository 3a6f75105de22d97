use std::path::PathBuf;

use crate::domain::entities::batch::Batches;
use crate::domain::value_objects::resource_path::ResourcePath;

/// Groups accepted paths by repository root, keeping input order within each
/// batch. Duplicates are kept.
pub fn batch<I>(accepted: I) -> Batches
where
    I: IntoIterator<Item = (ResourcePath, PathBuf)>,
{
    let mut batches = Batches::new();
    for (path, repo_root) in accepted {
        batches.push(&repo_root, path);
    }
    batches
}
