//! Group membership adapters

mod roster;

pub use roster::RosterDirectory;
