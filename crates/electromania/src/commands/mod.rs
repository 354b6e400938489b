pub mod build;
pub mod dev;
pub mod init;
pub mod logos;
pub mod serve;
