use diesel::dsl::max;
use polyblog_core::{
    entities::{Comment, Timestamp},
    repositories::{CommentRepository, Pagination},
};

use super::*;

impl<'a> CommentRepository for DbReadWrite<'a> {
    fn create_comment(&self, comment: Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn load_comment(&self, id: &str) -> Result<Comment> {
        load_comment(&mut self.conn.borrow_mut(), id)
    }
    fn update_comment_text(&self, id: &str, text: &str, updated_at: Timestamp) -> Result<()> {
        update_comment_text(&mut self.conn.borrow_mut(), id, text, updated_at)
    }
    fn load_thread_comments(&self, thread_root: &str) -> Result<Vec<Comment>> {
        load_thread_comments(&mut self.conn.borrow_mut(), thread_root)
    }
    fn recent_thread_comments(
        &self,
        thread_root: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Comment>> {
        recent_thread_comments(&mut self.conn.borrow_mut(), thread_root, pagination)
    }
    fn count_thread_comments(&self, thread_root: &str) -> Result<u64> {
        count_thread_comments(&mut self.conn.borrow_mut(), thread_root)
    }
    fn max_interval_bound(&self, thread_root: &str) -> Result<i64> {
        max_interval_bound(&mut self.conn.borrow_mut(), thread_root)
    }
    fn open_interval_gap(&self, thread_root: &str, at: i64) -> Result<()> {
        open_interval_gap(&mut self.conn.borrow_mut(), thread_root, at)
    }
    fn delete_subtree(&self, thread_root: &str, left: i64, right: i64) -> Result<usize> {
        delete_subtree(&mut self.conn.borrow_mut(), thread_root, left, right)
    }
    fn close_interval_gap(&self, thread_root: &str, after: i64, width: i64) -> Result<()> {
        close_interval_gap(&mut self.conn.borrow_mut(), thread_root, after, width)
    }
}

impl<'a> CommentRepository for DbConnection<'a> {
    fn create_comment(&self, comment: Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn load_comment(&self, id: &str) -> Result<Comment> {
        load_comment(&mut self.conn.borrow_mut(), id)
    }
    fn update_comment_text(&self, id: &str, text: &str, updated_at: Timestamp) -> Result<()> {
        update_comment_text(&mut self.conn.borrow_mut(), id, text, updated_at)
    }
    fn load_thread_comments(&self, thread_root: &str) -> Result<Vec<Comment>> {
        load_thread_comments(&mut self.conn.borrow_mut(), thread_root)
    }
    fn recent_thread_comments(
        &self,
        thread_root: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Comment>> {
        recent_thread_comments(&mut self.conn.borrow_mut(), thread_root, pagination)
    }
    fn count_thread_comments(&self, thread_root: &str) -> Result<u64> {
        count_thread_comments(&mut self.conn.borrow_mut(), thread_root)
    }
    fn max_interval_bound(&self, thread_root: &str) -> Result<i64> {
        max_interval_bound(&mut self.conn.borrow_mut(), thread_root)
    }
    fn open_interval_gap(&self, thread_root: &str, at: i64) -> Result<()> {
        open_interval_gap(&mut self.conn.borrow_mut(), thread_root, at)
    }
    fn delete_subtree(&self, thread_root: &str, left: i64, right: i64) -> Result<usize> {
        delete_subtree(&mut self.conn.borrow_mut(), thread_root, left, right)
    }
    fn close_interval_gap(&self, thread_root: &str, after: i64, width: i64) -> Result<()> {
        close_interval_gap(&mut self.conn.borrow_mut(), thread_root, after, width)
    }
}

impl<'a> CommentRepository for DbReadOnly<'a> {
    fn create_comment(&self, _comment: Comment) -> Result<()> {
        unreachable!();
    }
    fn load_comment(&self, id: &str) -> Result<Comment> {
        load_comment(&mut self.conn.borrow_mut(), id)
    }
    fn update_comment_text(&self, _id: &str, _text: &str, _updated_at: Timestamp) -> Result<()> {
        unreachable!();
    }
    fn load_thread_comments(&self, thread_root: &str) -> Result<Vec<Comment>> {
        load_thread_comments(&mut self.conn.borrow_mut(), thread_root)
    }
    fn recent_thread_comments(
        &self,
        thread_root: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Comment>> {
        recent_thread_comments(&mut self.conn.borrow_mut(), thread_root, pagination)
    }
    fn count_thread_comments(&self, thread_root: &str) -> Result<u64> {
        count_thread_comments(&mut self.conn.borrow_mut(), thread_root)
    }
    fn max_interval_bound(&self, thread_root: &str) -> Result<i64> {
        max_interval_bound(&mut self.conn.borrow_mut(), thread_root)
    }
    fn open_interval_gap(&self, _thread_root: &str, _at: i64) -> Result<()> {
        unreachable!();
    }
    fn delete_subtree(&self, _thread_root: &str, _left: i64, _right: i64) -> Result<usize> {
        unreachable!();
    }
    fn close_interval_gap(&self, _thread_root: &str, _after: i64, _width: i64) -> Result<()> {
        unreachable!();
    }
}

fn create_comment(conn: &mut SqliteConnection, comment: Comment) -> Result<()> {
    let Comment {
        id,
        thread_root,
        author,
        text,
        left,
        right,
        created_at,
        updated_at,
    } = comment;
    let new_comment = models::NewComment {
        id: id.as_str(),
        thread_root: thread_root.as_str(),
        author: &author,
        text: &text,
        lft: left,
        rght: right,
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
    };
    let _count = diesel::insert_into(schema::comments::table)
        .values(&new_comment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    debug_assert_eq!(1, _count);
    Ok(())
}

fn load_comment(conn: &mut SqliteConnection, id: &str) -> Result<Comment> {
    use schema::comments::dsl;
    schema::comments::table
        .filter(dsl::id.eq(id))
        .first::<models::CommentRecord>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into)
        .ok_or(repo::Error::NotFound)
}

fn update_comment_text(
    conn: &mut SqliteConnection,
    id: &str,
    text: &str,
    updated_at: Timestamp,
) -> Result<()> {
    use schema::comments::dsl;
    let count = diesel::update(schema::comments::table.filter(dsl::id.eq(id)))
        .set((
            dsl::text.eq(text),
            dsl::updated_at.eq(updated_at.as_millis()),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(())
}

fn load_thread_comments(conn: &mut SqliteConnection, thread_root: &str) -> Result<Vec<Comment>> {
    use schema::comments::dsl;
    Ok(schema::comments::table
        .filter(dsl::thread_root.eq(thread_root))
        .order(dsl::lft.asc())
        .load::<models::CommentRecord>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn recent_thread_comments(
    conn: &mut SqliteConnection,
    thread_root: &str,
    pagination: &Pagination,
) -> Result<Vec<Comment>> {
    use schema::comments::dsl;
    let mut query = schema::comments::table
        .filter(dsl::thread_root.eq(thread_root))
        .order((dsl::created_at.desc(), dsl::rowid.desc()))
        .into_boxed();
    let offset = pagination.offset.unwrap_or(0) as i64;
    if let Some(limit) = pagination.limit {
        query = query.limit(limit as i64);
        if offset > 0 {
            query = query.offset(offset);
        }
    } else if offset > 0 {
        // SQLite does not support an OFFSET without a LIMIT
        query = query.limit(i64::MAX);
        query = query.offset(offset);
    }
    Ok(query
        .load::<models::CommentRecord>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn count_thread_comments(conn: &mut SqliteConnection, thread_root: &str) -> Result<u64> {
    use schema::comments::dsl;
    let count: i64 = schema::comments::table
        .filter(dsl::thread_root.eq(thread_root))
        .count()
        .get_result(conn)
        .map_err(from_diesel_err)?;
    Ok(count as u64)
}

fn max_interval_bound(conn: &mut SqliteConnection, thread_root: &str) -> Result<i64> {
    use schema::comments::dsl;
    Ok(schema::comments::table
        .filter(dsl::thread_root.eq(thread_root))
        .select(max(dsl::rght))
        .first::<Option<i64>>(conn)
        .map_err(from_diesel_err)?
        .unwrap_or(0))
}

fn open_interval_gap(conn: &mut SqliteConnection, thread_root: &str, at: i64) -> Result<()> {
    use schema::comments::dsl;
    diesel::update(
        schema::comments::table
            .filter(dsl::thread_root.eq(thread_root))
            .filter(dsl::rght.ge(at)),
    )
    .set(dsl::rght.eq(dsl::rght + 2_i64))
    .execute(conn)
    .map_err(from_diesel_err)?;
    diesel::update(
        schema::comments::table
            .filter(dsl::thread_root.eq(thread_root))
            .filter(dsl::lft.gt(at)),
    )
    .set(dsl::lft.eq(dsl::lft + 2_i64))
    .execute(conn)
    .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_subtree(
    conn: &mut SqliteConnection,
    thread_root: &str,
    left: i64,
    right: i64,
) -> Result<usize> {
    use schema::comments::dsl;
    diesel::delete(
        schema::comments::table
            .filter(dsl::thread_root.eq(thread_root))
            .filter(dsl::lft.ge(left))
            .filter(dsl::rght.le(right)),
    )
    .execute(conn)
    .map_err(from_diesel_err)
}

fn close_interval_gap(
    conn: &mut SqliteConnection,
    thread_root: &str,
    after: i64,
    width: i64,
) -> Result<()> {
    use schema::comments::dsl;
    diesel::update(
        schema::comments::table
            .filter(dsl::thread_root.eq(thread_root))
            .filter(dsl::lft.gt(after)),
    )
    .set(dsl::lft.eq(dsl::lft - width))
    .execute(conn)
    .map_err(from_diesel_err)?;
    diesel::update(
        schema::comments::table
            .filter(dsl::thread_root.eq(thread_root))
            .filter(dsl::rght.gt(after)),
    )
    .set(dsl::rght.eq(dsl::rght - width))
    .execute(conn)
    .map_err(from_diesel_err)?;
    Ok(())
}
