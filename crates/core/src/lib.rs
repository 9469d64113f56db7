//! jarsync-core: Incremental class-artifact scan and mirror engine
//!
//! Given the host build system's classification of what changed since
//! the previous build (loose class files and packaged archives), the
//! engine derives a logical identity per class, dispatches birth/death
//! events to a pluggable scanner, and mirrors accepted files into the
//! destination tree. The destination tree is the only state carried
//! between builds.

pub mod archive;
pub mod config;
pub mod dir;
pub mod engine;
pub mod event;
pub mod identity;
pub mod mirror;
pub mod scanner;

pub use archive::ArchiveDiffer;
pub use config::ScanFilter;
pub use dir::DirDiffer;
pub use engine::{ArchiveDelta, BuildPass, ChangeKind, Engine, FileDelta, FullUnit};
pub use event::{ClassEvent, ClassSource, ClassStatus, ScanOutcome};
pub use identity::{ClassName, IdentityResolver};
pub use scanner::ClassScanner;
