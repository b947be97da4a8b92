pub mod init;
pub mod pool;
pub mod run;
