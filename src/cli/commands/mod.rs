pub mod helper;
pub mod init;
pub mod list;
pub mod pseudo;
pub mod stats;
pub mod sync;

mod command_result;

pub use command_result::*;
