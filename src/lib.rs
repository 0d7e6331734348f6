// ABOUTME: Public library API for the quipex folder exporter
// ABOUTME: Re-exports core modules for external use

pub mod api;
pub mod auth;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod manifest;
pub mod model;
pub mod sanitize;
pub mod session;
pub mod traverse;

pub use error::{Error, Result};
pub use model::{
    CurrentUser, FolderChild, FolderInfo, FolderResponse, ManifestEntry, RateLimit, ThreadInfo,
    ThreadResponse,
};
