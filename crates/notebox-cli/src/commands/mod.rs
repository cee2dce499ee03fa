pub mod bridge;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod notes;
