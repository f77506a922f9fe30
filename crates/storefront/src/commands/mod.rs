pub mod build;
pub mod init;
pub mod routes;
pub mod serve;
