//! Persistent role configuration
//!
//! Provides [`JsonFileRoleStore`], the file-backed implementation of the
//! [`RoleStore`](confluence_application::RoleStore) port.

mod json_file;

pub use json_file::JsonFileRoleStore;
