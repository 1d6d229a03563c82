use crate::id::*;

/// Read-only view of a post as provided by the post directory.
///
/// Translated posts link to the original post they were derived from; the
/// original post of a translation group carries no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    pub id: Id,
    pub derived_from: Option<Id>,
}

impl PostRef {
    /// The id that anchors the comment tree shared by the whole
    /// translation group.
    pub fn thread_root(&self) -> &Id {
        self.derived_from.as_ref().unwrap_or(&self.id)
    }
}
