use std::{cell::RefCell, collections::HashMap, thread};

use polyblog_core::usecases::Error as ParameterError;

use crate::{
    error::{AppError, BError},
    prelude as flows,
    prelude::*,
    sqlite, Comment, Id, PostGateway, PostRef, UserDirectoryGateway, UserDisplay,
};

#[derive(Debug, Default)]
struct FakePostDirectory {
    posts: RefCell<HashMap<String, PostRef>>,
}

impl FakePostDirectory {
    fn insert(&self, id: &str, derived_from: Option<&str>) {
        self.posts.borrow_mut().insert(
            id.to_owned(),
            PostRef {
                id: id.into(),
                derived_from: derived_from.map(Into::into),
            },
        );
    }
}

impl PostGateway for FakePostDirectory {
    fn find_post(&self, id: &Id) -> Option<PostRef> {
        self.posts.borrow().get(id.as_str()).cloned()
    }
}

#[derive(Debug, Default)]
struct FakeUserDirectory {
    users: RefCell<HashMap<String, UserDisplay>>,
}

impl FakeUserDirectory {
    fn insert(&self, username: &str, name: &str) {
        self.users.borrow_mut().insert(
            username.to_owned(),
            UserDisplay {
                name: name.to_owned(),
                avatar: Some(format!("avatars/{username}.png")),
            },
        );
    }
}

impl UserDirectoryGateway for FakeUserDirectory {
    fn lookup_display_info(&self, username: &str) -> Option<UserDisplay> {
        self.users.borrow().get(username).cloned()
    }
}

struct BackendFixture {
    db_connections: sqlite::Connections,
    posts: FakePostDirectory,
    users: FakeUserDirectory,
}

impl BackendFixture {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
        polyblog_db_sqlite::run_embedded_database_migrations(
            db_connections.exclusive().unwrap(),
        );
        Self {
            db_connections,
            posts: FakePostDirectory::default(),
            users: FakeUserDirectory::default(),
        }
    }

    fn create_comment(
        &self,
        post_id: &str,
        author: &str,
        text: &str,
        parent_id: Option<&Id>,
    ) -> CommentView {
        flows::create_comment(
            &self.db_connections,
            &self.posts,
            &self.users,
            NewComment {
                post_id: post_id.into(),
                author: author.to_owned(),
                text: text.to_owned(),
                parent_id: parent_id.cloned(),
            },
        )
        .unwrap()
    }

    fn tree(&self, post_id: &str) -> Vec<TreeCommentView> {
        flows::load_comment_tree(&self.db_connections, &self.posts, &self.users, &post_id.into())
            .unwrap()
    }

    fn page(&self, post_id: &str, page: u64, page_size: u64) -> CommentPage {
        flows::load_comment_page(
            &self.db_connections,
            &self.posts,
            &self.users,
            &post_id.into(),
            page,
            page_size,
        )
        .unwrap()
    }
}

fn parameter_error(err: AppError) -> ParameterError {
    match err {
        AppError::Business(BError::Parameter(err)) => err,
        err => panic!("unexpected error: {err}"),
    }
}

/// Tight packing and containment over the stored tree: all bounds form
/// exactly `{1..2n}` and any two intervals are disjoint or nested.
fn assert_valid_thread(tree: &[TreeCommentView]) {
    let comments: Vec<&Comment> = tree.iter().map(|view| &view.comment).collect();
    let mut values: Vec<i64> = comments.iter().flat_map(|c| [c.left, c.right]).collect();
    values.sort_unstable();
    let expected: Vec<i64> = (1..=comments.len() as i64 * 2).collect();
    assert_eq!(expected, values);
    for &a in &comments {
        assert!(a.left < a.right);
        for &b in &comments {
            if a.id == b.id {
                continue;
            }
            let disjoint = a.right < b.left || b.right < a.left;
            assert!(disjoint || a.encloses(b) || b.encloses(a));
        }
    }
}

#[test]
fn comment_on_post_roundtrip() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    fixture.users.insert("ada", "Ada Lovelace");

    let created = fixture.create_comment("p1", "ada", "First!", None);
    assert_eq!("First!", created.comment.text);
    assert_eq!((1, 2), (created.comment.left, created.comment.right));
    assert_eq!("Ada Lovelace", created.author.as_ref().unwrap().name);

    let tree = fixture.tree("p1");
    assert_eq!(1, tree.len());
    assert_eq!(created.comment, tree[0].comment);
    assert_eq!(0, tree[0].depth);
    assert_eq!(created.author, tree[0].author);

    let page = fixture.page("p1", 1, 10);
    assert_eq!(1, page.items.len());
    assert_eq!(created, page.items[0]);
    assert_eq!(1, page.page_info.total);
}

#[test]
fn translations_share_one_thread() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    fixture.posts.insert("p2", Some("p1"));

    let created = fixture.create_comment("p2", "ada", "bonjour", None);
    assert_eq!(Id::from("p1"), created.comment.thread_root);

    let via_original = fixture.tree("p1");
    let via_translation = fixture.tree("p2");
    assert_eq!(via_original, via_translation);
    assert_eq!(1, via_original.len());

    // and a reply through the original shows up under the translation
    fixture.create_comment("p1", "bob", "hello", Some(&created.comment.id));
    let via_translation = fixture.tree("p2");
    assert_eq!(2, via_translation.len());
    assert_eq!(vec![0, 1], via_translation.iter().map(|c| c.depth).collect::<Vec<_>>());
}

#[test]
fn nested_replies_in_preorder() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);

    let top = fixture.create_comment("p1", "ada", "top", None);
    let first = fixture.create_comment("p1", "bob", "first reply", Some(&top.comment.id));
    let nested = fixture.create_comment("p1", "ada", "nested", Some(&first.comment.id));
    let second = fixture.create_comment("p1", "eve", "second reply", Some(&top.comment.id));
    let other_top = fixture.create_comment("p1", "bob", "other top", None);

    let tree = fixture.tree("p1");
    let order: Vec<_> = tree.iter().map(|view| view.comment.id.clone()).collect();
    assert_eq!(
        vec![
            top.comment.id,
            first.comment.id,
            nested.comment.id,
            second.comment.id,
            other_top.comment.id,
        ],
        order
    );
    let depths: Vec<_> = tree.iter().map(|view| view.depth).collect();
    assert_eq!(vec![0, 1, 2, 1, 0], depths);
    assert_valid_thread(&tree);
}

#[test]
fn delete_subtree_renumbers_remaining() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);

    let top = fixture.create_comment("p1", "ada", "top", None);
    fixture.create_comment("p1", "ada", "reply", Some(&top.comment.id));
    let other = fixture.create_comment("p1", "bob", "other top", None);
    assert_eq!((5, 6), (other.comment.left, other.comment.right));

    flows::delete_comment(&fixture.db_connections, &top.comment.id, "ada").unwrap();

    let tree = fixture.tree("p1");
    assert_eq!(1, tree.len());
    assert_eq!(other.comment.id, tree[0].comment.id);
    assert_eq!((1, 2), (tree[0].comment.left, tree[0].comment.right));
    assert_valid_thread(&tree);
}

#[test]
fn paginate_flat_view() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    for i in 0..11 {
        fixture.create_comment("p1", "ada", &format!("comment {i}"), None);
    }

    let page = fixture.page("p1", 1, 10);
    assert_eq!(10, page.items.len());
    // newest first
    assert_eq!("comment 10", page.items[0].comment.text);
    assert_eq!(11, page.page_info.total);
    assert_eq!(2, page.page_info.total_pages);
    assert!(page.page_info.has_next_page);
    assert!(!page.page_info.has_prev_page);

    let page = fixture.page("p1", 2, 10);
    assert_eq!(1, page.items.len());
    assert_eq!("comment 0", page.items[0].comment.text);
    assert!(!page.page_info.has_next_page);
    assert!(page.page_info.has_prev_page);
}

#[test]
fn edit_own_comment() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    let created = fixture.create_comment("p1", "ada", "typo", None);

    let edited = flows::edit_comment(
        &fixture.db_connections,
        &fixture.users,
        &created.comment.id,
        "fixed".to_owned(),
        "ada",
    )
    .unwrap();
    assert_eq!("fixed", edited.comment.text);
    assert_eq!(created.comment.created_at, edited.comment.created_at);
    assert!(edited.comment.updated_at >= created.comment.updated_at);

    let tree = fixture.tree("p1");
    assert_eq!("fixed", tree[0].comment.text);
    assert_eq!(
        (created.comment.left, created.comment.right),
        (tree[0].comment.left, tree[0].comment.right)
    );
}

#[test]
fn edit_foreign_comment_is_rejected() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    let created = fixture.create_comment("p1", "ada", "mine", None);

    let err = flows::edit_comment(
        &fixture.db_connections,
        &fixture.users,
        &created.comment.id,
        "stolen".to_owned(),
        "eve",
    )
    .unwrap_err();
    assert!(matches!(parameter_error(err), ParameterError::Forbidden));
    assert_eq!("mine", fixture.tree("p1")[0].comment.text);
}

#[test]
fn delete_foreign_comment_is_rejected() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    let created = fixture.create_comment("p1", "ada", "mine", None);

    let err =
        flows::delete_comment(&fixture.db_connections, &created.comment.id, "eve").unwrap_err();
    assert!(matches!(parameter_error(err), ParameterError::Forbidden));
    assert_eq!(1, fixture.tree("p1").len());
}

#[test]
fn reply_to_missing_parent_is_rejected() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    fixture.create_comment("p1", "ada", "top", None);

    let err = flows::create_comment(
        &fixture.db_connections,
        &fixture.posts,
        &fixture.users,
        NewComment {
            post_id: "p1".into(),
            author: "bob".to_owned(),
            text: "reply".to_owned(),
            parent_id: Some(Id::new()),
        },
    )
    .unwrap_err();
    assert!(matches!(
        parameter_error(err),
        ParameterError::ParentCommentNotFound
    ));
    // the failed insert must not have shifted anything
    assert_valid_thread(&fixture.tree("p1"));
}

#[test]
fn unknown_post_is_rejected() {
    let fixture = BackendFixture::new();
    let err = flows::load_comment_tree(
        &fixture.db_connections,
        &fixture.posts,
        &fixture.users,
        &"nope".into(),
    )
    .unwrap_err();
    assert!(matches!(parameter_error(err), ParameterError::PostNotFound));
}

#[test]
fn unknown_author_renders_without_display_info() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    fixture.users.insert("ada", "Ada Lovelace");

    fixture.create_comment("p1", "ada", "known", None);
    fixture.create_comment("p1", "ghost", "account is gone", None);

    let tree = fixture.tree("p1");
    assert_eq!("Ada Lovelace", tree[0].author.as_ref().unwrap().name);
    assert!(tree[1].author.is_none());
}

#[test]
fn serialized_writers_keep_intervals_tight() {
    let fixture = BackendFixture::new();
    fixture.posts.insert("p1", None);
    let top = fixture.create_comment("p1", "ada", "top", None);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let connections = fixture.db_connections.clone();
            let parent_id = top.comment.id.clone();
            thread::spawn(move || {
                let posts = FakePostDirectory::default();
                posts.insert("p1", None);
                let users = FakeUserDirectory::default();
                for i in 0..5 {
                    let parent_id = (i % 2 == 0).then(|| parent_id.clone());
                    flows::create_comment(
                        &connections,
                        &posts,
                        &users,
                        NewComment {
                            post_id: "p1".into(),
                            author: format!("author-{worker}"),
                            text: format!("comment {worker}/{i}"),
                            parent_id,
                        },
                    )
                    .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let tree = fixture.tree("p1");
    assert_eq!(21, tree.len());
    assert_valid_thread(&tree);
}
