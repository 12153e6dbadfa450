//! Command implementations

pub mod add;
pub mod build;
pub mod clean;
pub mod init;
pub mod new;
pub mod run;
pub mod test;
