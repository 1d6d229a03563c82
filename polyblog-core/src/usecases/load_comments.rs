use super::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Newest-first slice of a thread with offset pagination.
pub fn load_comment_page<R>(
    repo: &R,
    thread_root: &str,
    page: u64,
    page_size: u64,
) -> Result<(Vec<Comment>, PageInfo)>
where
    R: CommentRepository,
{
    if page == 0 || page_size == 0 {
        return Err(Error::InvalidPagination);
    }
    let total = repo.count_thread_comments(thread_root)?;
    let pagination = Pagination {
        offset: Some((page - 1) * page_size),
        limit: Some(page_size),
    };
    let items = repo.recent_thread_comments(thread_root, &pagination)?;
    let total_pages = total.div_ceil(page_size);
    let page_info = PageInfo {
        page,
        page_size,
        total,
        total_pages,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
    };
    Ok((items, page_info))
}

/// The whole tree of a thread in preorder.
///
/// Sorting by `left` is exactly a depth-first parent-before-children,
/// siblings-in-insertion-order traversal; nesting levels can be derived
/// with [`crate::tree::nesting_depths`].
pub fn load_comment_tree<R>(repo: &R, thread_root: &str) -> Result<Vec<Comment>>
where
    R: CommentRepository,
{
    Ok(repo.load_thread_comments(thread_root)?)
}
