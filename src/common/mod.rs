pub mod archive;
pub mod command_utils;
