#[macro_use]
extern crate log;

mod create_comment;
mod delete_comment;
mod load_comments;
mod update_comment;
mod views;

pub mod prelude {
    pub use super::{
        create_comment::*, delete_comment::*, load_comments::*, update_comment::*, views::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use polyblog_core::{
    entities::*,
    gateways::{posts::PostGateway, user_directory::UserDirectoryGateway},
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use polyblog_db_sqlite::Connections;
}
