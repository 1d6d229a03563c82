use polyblog_entities::user::UserDisplay;

/// Read-only access to the user directory.
///
/// A `None` result is not an error: the referenced account may have been
/// removed while its comments remain.
pub trait UserDirectoryGateway {
    fn lookup_display_info(&self, username: &str) -> Option<UserDisplay>;
}
