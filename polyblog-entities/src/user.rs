/// Display attributes of a user as provided by the user directory.
///
/// Comments reference their author by username only; whether that username
/// still resolves to a directory entry is decided at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDisplay {
    pub name: String,
    pub avatar: Option<String>,
}
