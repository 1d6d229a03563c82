//! # polyblog-core
//!
//! The threaded comment engine of the polyblog platform: repository and
//! gateway traits plus the nested-set mutation and read usecases that
//! operate through them.

pub mod gateways;
pub mod repositories;
pub mod tree;
pub mod usecases;

pub mod entities {
    pub use polyblog_entities::{comment::*, id::*, post::*, time::*, user::*};
}
