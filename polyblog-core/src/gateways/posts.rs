use polyblog_entities::{id::Id, post::PostRef};

/// Read-only access to the post directory of the blogging platform.
pub trait PostGateway {
    fn find_post(&self, id: &Id) -> Option<PostRef>;
}
