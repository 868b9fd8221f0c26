// Command handlers module
// This module contains all CLI command implementations

pub mod init;
pub mod resolve;
