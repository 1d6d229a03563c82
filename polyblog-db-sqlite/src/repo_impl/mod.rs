use diesel::{prelude::*, result::Error as DieselError};

use polyblog_core::repositories as repo;

use super::*;

mod comment;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(err.into()),
    }
}
