use super::{create_comment::validate_text, prelude::*};

/// Replaces the text of an existing comment.
///
/// Only the author may edit their own comment. The nested-set interval
/// stays untouched; edits never restructure the tree.
pub fn update_comment_text<R>(
    repo: &R,
    id: &str,
    new_text: String,
    requesting_author: &str,
) -> Result<Comment>
where
    R: CommentRepository,
{
    let mut comment = repo.load_comment(id)?;
    if comment.author != requesting_author {
        return Err(Error::Forbidden);
    }
    validate_text(&new_text)?;
    comment.text = new_text;
    comment.updated_at = Timestamp::now();
    repo.update_comment_text(id, &comment.text, comment.updated_at)?;
    Ok(comment)
}
