//! Live adapters backed by real processes, disk and network.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;
pub mod shell;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use git::LiveGitRepo;
pub use http::LiveHttpClient;
pub use shell::LiveShellExecutor;
