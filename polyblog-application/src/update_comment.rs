use super::*;
use crate::views::*;

/// Replaces the text of the caller's own comment.
pub fn edit_comment(
    connections: &sqlite::Connections,
    users: &dyn UserDirectoryGateway,
    id: &Id,
    new_text: String,
    author: &str,
) -> Result<CommentView> {
    let comment = {
        let mut connection = connections.exclusive()?;
        connection
            .transaction(|conn| usecases::update_comment_text(conn, id.as_str(), new_text, author))
    }?;
    Ok(enrich_comment(users, comment))
}
