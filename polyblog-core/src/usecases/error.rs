use thiserror::Error;

use crate::repositories;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Empty comment")]
    EmptyComment,
    #[error("The comment text is too long")]
    CommentTooLong,
    #[error("This is not allowed")]
    Forbidden,
    #[error("The post does not exist")]
    PostNotFound,
    #[error("The parent comment does not exist")]
    ParentCommentNotFound,
    #[error("Invalid pagination parameters")]
    InvalidPagination,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
