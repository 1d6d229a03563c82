use super::prelude::*;

/// Removes a comment together with its whole subtree and re-packs the
/// thread's interval space.
///
/// Like the insert, the subtree delete and the gap close must commit or
/// fail as one unit.
pub fn delete_comment<R>(repo: &R, id: &str, requesting_author: &str) -> Result<()>
where
    R: CommentRepository,
{
    let comment = repo.load_comment(id)?;
    if comment.author != requesting_author {
        return Err(Error::Forbidden);
    }
    let Comment {
        thread_root,
        left,
        right,
        ..
    } = comment;
    let deleted = repo.delete_subtree(thread_root.as_str(), left, right)?;
    log::info!("Deleted {deleted} comments of thread {thread_root}");
    repo.close_interval_gap(thread_root.as_str(), right, right - left + 1)?;
    Ok(())
}
