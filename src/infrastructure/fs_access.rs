// src/infrastructure/fs_access.rs
//
// Filesystem access seam.
//
// CRITICAL RULES:
// - The engine never touches the filesystem directly; every probe and
//   read goes through this trait
// - Probes are local existence checks, so no timeout is imposed here
// - Tests substitute this seam to inject failures and to assert that
//   filtered paths trigger no I/O at all

use async_trait::async_trait;
use std::io;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Read-only filesystem operations used by the resolution pipeline.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileAccess: Send + Sync {
    /// Probe `path` for existence and readability.
    async fn probe(&self, path: &Path) -> io::Result<()>;

    /// Read the full text content of `path`.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Production implementation over `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFileAccess;

#[async_trait]
impl FileAccess for TokioFileAccess {
    async fn probe(&self, path: &Path) -> io::Result<()> {
        // Opening for read checks existence and permission in one call,
        // the async equivalent of access(F_OK | R_OK).
        tokio::fs::File::open(path).await.map(|_| ())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}
