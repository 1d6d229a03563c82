pub mod posts;
pub mod user_directory;
