mod create_comment;
mod delete_comment;
mod error;
mod load_comments;
mod resolve_thread_root;
mod update_comment;


pub use self::{
    create_comment::*, delete_comment::*, error::Error, load_comments::*,
    resolve_thread_root::*, update_comment::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}
