//! Port traits for every external boundary the collectors touch.
//!
//! The enrichment core never spawns a process, opens a socket or reads a
//! file directly; it goes through these traits so live, recording and
//! replaying adapters (see `src/adapters/`) are interchangeable.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;
pub mod shell;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use git::GitRepo;
pub use http::{HttpClient, HttpResponse};
pub use shell::{ShellExecutor, ShellOutput};

/// Error type returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
