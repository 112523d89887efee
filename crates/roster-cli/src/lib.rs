//! Command line front end for Roster.
//!
//! The `roster` binary loads a [`config::Config`], opens one session on the
//! configured database, and runs a single command from [`commands`].

pub mod commands;
pub mod config;
