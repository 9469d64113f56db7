//! Lifecycle events dispatched to the scanner

use std::io::Read;
use std::path::Path;

use crate::identity::ClassName;

/// How a class entered or left the build output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassStatus {
    /// Newly present loose class file
    BirthDir,
    /// Newly present archive entry
    BirthJar,
    /// Loose class file being removed
    DeathDir,
    /// Archive entry being removed
    DeathJar,
}

impl ClassStatus {
    /// Whether this is an addition (loose file or archive entry)
    #[must_use]
    pub fn is_birth(self) -> bool {
        matches!(self, Self::BirthDir | Self::BirthJar)
    }

    /// Whether this is a removal
    #[must_use]
    pub fn is_death(self) -> bool {
        !self.is_birth()
    }
}

/// Where the class bytes come from.
///
/// The source is borrowed: an event lives exactly as long as the scanner
/// call consuming it, and an entry stream closes when the borrow ends.
pub enum ClassSource<'a> {
    /// Loose file on disk
    File(&'a Path),
    /// Open archive-entry stream
    Stream(&'a mut (dyn Read + 'a)),
}

impl ClassSource<'_> {
    /// Read the full class bytes.
    ///
    /// # Errors
    /// Returns an error if the file or stream cannot be read.
    pub fn read_bytes(&mut self) -> color_eyre::Result<Vec<u8>> {
        match self {
            Self::File(path) => Ok(std::fs::read(path)?),
            Self::Stream(reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// One classified change, dispatched to the scanner's `on_scan_class`.
pub struct ClassEvent<'a> {
    /// Lifecycle classification
    pub status: ClassStatus,
    /// Destination root (loose files) or destination archive path (entries)
    pub dest: &'a Path,
    /// Class content
    pub source: ClassSource<'a>,
    /// Resolved logical identity
    pub name: ClassName,
}

/// Outcome counters for one scanned unit.
///
/// Per-entry scanner failures at the best-effort boundaries are logged
/// and counted here instead of aborting the unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Events dispatched
    pub scanned: usize,
    /// Files or entries filtered out or unresolvable
    pub skipped: usize,
    /// Scanner or per-entry failures (logged, not propagated)
    pub failed: usize,
}

impl ScanOutcome {
    /// Fold another unit's counters into this one
    pub fn absorb(&mut self, other: Self) {
        self.scanned += other.scanned;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}
