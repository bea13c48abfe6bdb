pub mod profile;
pub mod replies;
pub mod start;
