use super::prelude::*;
use crate::repositories::Error as RepoError;

/// Upper bound on the text of a single comment,
/// counted in unicode scalar values.
pub const MAX_COMMENT_TEXT_LEN: usize = 4000;

#[derive(Debug, Clone)]
pub struct NewThreadComment {
    pub thread_root: Id,
    pub author: String,
    pub text: String,
    pub parent_id: Option<Id>,
}

pub(super) fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::EmptyComment);
    }
    if text.chars().count() > MAX_COMMENT_TEXT_LEN {
        return Err(Error::CommentTooLong);
    }
    Ok(())
}

/// Inserts a comment into its thread's tree.
///
/// A reply becomes the last child of its parent: a gap of width 2 is
/// opened at the parent's `right` bound, which pushes the parent and all
/// of its ancestors outward and shifts everything beyond the insertion
/// point. A top-level comment is appended after the last subtree without
/// touching any existing interval.
///
/// Must run within a single serialized read/write unit of the backing
/// store: the gap shift and the insert have to commit or fail together.
pub fn store_new_comment<R>(repo: &R, new_comment: NewThreadComment) -> Result<Comment>
where
    R: CommentRepository,
{
    let NewThreadComment {
        thread_root,
        author,
        text,
        parent_id,
    } = new_comment;
    let parent = parent_id
        .map(|parent_id| {
            repo.load_comment(parent_id.as_str()).map_err(|err| match err {
                RepoError::NotFound => Error::ParentCommentNotFound,
                _ => Error::Repo(err),
            })
        })
        .transpose()?;
    if let Some(parent) = &parent {
        if parent.thread_root != thread_root {
            // another thread's node is none of the caller's business
            return Err(Error::ParentCommentNotFound);
        }
    }
    validate_text(&text)?;
    let (left, right) = match parent {
        Some(parent) => {
            let at = parent.right;
            repo.open_interval_gap(thread_root.as_str(), at)?;
            (at, at + 1)
        }
        None => {
            let max = repo.max_interval_bound(thread_root.as_str())?;
            (max + 1, max + 2)
        }
    };
    let now = Timestamp::now();
    let comment = Comment {
        id: Id::new(),
        thread_root,
        author,
        text,
        left,
        right,
        created_at: now,
        updated_at: now,
    };
    log::debug!(
        "Storing comment {} of thread {} at ({}, {})",
        comment.id,
        comment.thread_root,
        left,
        right
    );
    repo.create_comment(comment.clone())?;
    Ok(comment)
}
