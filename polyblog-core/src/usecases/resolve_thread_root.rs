use super::prelude::*;
use crate::gateways::posts::PostGateway;

/// Maps any post id (original or translation) to the id that anchors the
/// comment tree shared by the post's translation group.
///
/// Every comment read and write is keyed by the resolved root, never by
/// the caller-supplied post id.
pub fn resolve_thread_root<G>(posts: &G, post_id: &Id) -> Result<Id>
where
    G: PostGateway + ?Sized,
{
    let post = posts.find_post(post_id).ok_or(Error::PostNotFound)?;
    Ok(post.thread_root().clone())
}
