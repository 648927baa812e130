//! acton-breadcrumbs CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;

pub use commands::{
    CheckCommand, CheckReport, ListCommand, Listing, PublishCommand, PublishTarget,
};
