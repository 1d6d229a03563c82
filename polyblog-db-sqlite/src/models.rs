// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use polyblog_core::entities::{Comment, Timestamp};

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment<'a> {
    pub id: &'a str,
    pub thread_root: &'a str,
    pub author: &'a str,
    pub text: &'a str,
    pub lft: i64,
    pub rght: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct CommentRecord {
    pub rowid: i64,
    pub id: String,
    pub thread_root: String,
    pub author: String,
    pub text: String,
    pub lft: i64,
    pub rght: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<CommentRecord> for Comment {
    fn from(from: CommentRecord) -> Self {
        let CommentRecord {
            rowid: _,
            id,
            thread_root,
            author,
            text,
            lft,
            rght,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            thread_root: thread_root.into(),
            author,
            text,
            left: lft,
            right: rght,
            created_at: Timestamp::from_millis(created_at),
            updated_at: Timestamp::from_millis(updated_at),
        }
    }
}
