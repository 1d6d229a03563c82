use polyblog_core::tree;

use super::*;
use crate::views::*;

/// Flat, newest-first page of a post's comment thread.
pub fn load_comment_page(
    connections: &sqlite::Connections,
    posts: &dyn PostGateway,
    users: &dyn UserDirectoryGateway,
    post_id: &Id,
    page: u64,
    page_size: u64,
) -> Result<CommentPage> {
    let thread_root = usecases::resolve_thread_root(posts, post_id)?;
    let (items, page_info) = {
        let connection = connections.shared()?;
        usecases::load_comment_page(&connection, thread_root.as_str(), page, page_size)?
    };
    Ok(CommentPage {
        items: enrich_comments(users, items),
        page_info,
    })
}

/// A post's whole comment tree in preorder, with derived nesting depths.
pub fn load_comment_tree(
    connections: &sqlite::Connections,
    posts: &dyn PostGateway,
    users: &dyn UserDirectoryGateway,
    post_id: &Id,
) -> Result<Vec<TreeCommentView>> {
    let thread_root = usecases::resolve_thread_root(posts, post_id)?;
    let comments = {
        let connection = connections.shared()?;
        usecases::load_comment_tree(&connection, thread_root.as_str())?
    };
    let depths = tree::nesting_depths(&comments);
    Ok(enrich_comments(users, comments)
        .into_iter()
        .zip(depths)
        .map(|(view, depth)| TreeCommentView {
            comment: view.comment,
            depth,
            author: view.author,
        })
        .collect())
}
