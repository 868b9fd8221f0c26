// External integrations module
// This module contains integrations with external services

// GitHub REST API and Actions runner
pub mod github;
