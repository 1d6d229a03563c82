use std::collections::HashMap;

use super::*;

pub use polyblog_core::usecases::PageInfo;

/// A comment enriched with the author's display attributes.
///
/// `author` is `None` when the username no longer resolves in the user
/// directory; rendering falls back to a placeholder in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Option<UserDisplay>,
}

/// One node of the fully assembled tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeCommentView {
    pub comment: Comment,
    pub depth: usize,
    pub author: Option<UserDisplay>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPage {
    pub items: Vec<CommentView>,
    pub page_info: PageInfo,
}

pub(crate) fn enrich_comment(users: &dyn UserDirectoryGateway, comment: Comment) -> CommentView {
    let author = users.lookup_display_info(&comment.author);
    CommentView { comment, author }
}

/// Resolves display info once per distinct username.
pub(crate) fn enrich_comments(
    users: &dyn UserDirectoryGateway,
    comments: Vec<Comment>,
) -> Vec<CommentView> {
    let mut cache: HashMap<String, Option<UserDisplay>> = HashMap::new();
    comments
        .into_iter()
        .map(|comment| {
            let author = cache
                .entry(comment.author.clone())
                .or_insert_with(|| users.lookup_display_info(&comment.author))
                .clone();
            CommentView { comment, author }
        })
        .collect()
}
