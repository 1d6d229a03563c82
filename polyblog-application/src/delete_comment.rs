use super::*;

/// Removes the caller's own comment together with all replies to it.
pub fn delete_comment(connections: &sqlite::Connections, id: &Id, author: &str) -> Result<()> {
    let mut connection = connections.exclusive()?;
    connection.transaction(|conn| {
        usecases::delete_comment(conn, id.as_str(), author).map_err(|err| {
            warn!("Failed to delete comment {id}: {err}");
            err
        })
    })?;
    Ok(())
}
