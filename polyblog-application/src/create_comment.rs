use super::*;
use crate::views::*;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Id,
    pub author: String,
    pub text: String,
    pub parent_id: Option<Id>,
}

/// Stores a new comment in the thread shared by the post's translation
/// group and returns it enriched with the author's display info.
pub fn create_comment(
    connections: &sqlite::Connections,
    posts: &dyn PostGateway,
    users: &dyn UserDirectoryGateway,
    new_comment: NewComment,
) -> Result<CommentView> {
    let NewComment {
        post_id,
        author,
        text,
        parent_id,
    } = new_comment;
    let thread_root = usecases::resolve_thread_root(posts, &post_id)?;
    let comment = {
        let mut connection = connections.exclusive()?;
        connection.transaction(|conn| {
            usecases::store_new_comment(
                conn,
                usecases::NewThreadComment {
                    thread_root,
                    author,
                    text,
                    parent_id,
                },
            )
            .map_err(|err| {
                warn!("Failed to store new comment for post {post_id}: {err}");
                err
            })
        })
    }?;
    Ok(enrich_comment(users, comment))
}
