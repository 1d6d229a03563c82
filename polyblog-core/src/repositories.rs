// Low-level database access for comment threads.
// The repository persists comment rows and shifts nested-set intervals
// in bulk; the mutation algorithm itself lives in the usecases and runs
// inside one serialized read/write unit provided by the backend.

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub trait CommentRepository {
    fn create_comment(&self, _: Comment) -> Result<()>;
    fn load_comment(&self, id: &str) -> Result<Comment>;

    /// Replaces the text of a stored comment.
    /// Interval bounds are never touched through this method.
    fn update_comment_text(&self, id: &str, text: &str, updated_at: Timestamp) -> Result<()>;

    /// All comments of one thread, ordered by `left` ascending (preorder).
    fn load_thread_comments(&self, thread_root: &str) -> Result<Vec<Comment>>;

    /// Newest-first slice of one thread for the flat view.
    fn recent_thread_comments(
        &self,
        thread_root: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Comment>>;

    fn count_thread_comments(&self, thread_root: &str) -> Result<u64>;

    /// Highest `right` bound in the thread, 0 if the thread is empty.
    fn max_interval_bound(&self, thread_root: &str) -> Result<i64>;

    /// Makes room for one new node: `right += 2` where `right >= at`,
    /// `left += 2` where `left > at`.
    fn open_interval_gap(&self, thread_root: &str, at: i64) -> Result<()>;

    /// Removes the subtree spanned by `[left, right]` and returns the
    /// number of deleted comments.
    fn delete_subtree(&self, thread_root: &str, left: i64, right: i64) -> Result<usize>;

    /// Re-packs the interval space after a deletion: every bound beyond
    /// `after` is pulled back by `width`.
    fn close_interval_gap(&self, thread_root: &str, after: i64, width: i64) -> Result<()>;
}
