//! Build-pass orchestration: the host-facing dispatch core

use std::path::PathBuf;

use color_eyre::Result;
use tracing::{debug, info};

use crate::archive::ArchiveDiffer;
use crate::config::ScanFilter;
use crate::dir::DirDiffer;
use crate::event::{ClassStatus, ScanOutcome};
use crate::identity::IdentityResolver;
use crate::mirror;
use crate::scanner::ClassScanner;

/// Host classification of one loose file since the previous build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    NotChanged,
    Added,
    Changed,
    Removed,
}

/// One loose-file unit of work, classified by the host
#[derive(Debug, Clone)]
pub struct FileDelta {
    pub kind: ChangeKind,
    pub src_root: PathBuf,
    pub dest_root: PathBuf,
    pub src: PathBuf,
    pub dest: PathBuf,
}

/// One archive unit of work, classified by the host.
///
/// Entry names are archive paths (`x/Y.class`); the host pre-computes
/// the entry deltas by comparing archive listings across builds.
#[derive(Debug, Clone)]
pub enum ArchiveDelta {
    NotChanged {
        src: PathBuf,
        dest: PathBuf,
        unchanged: Vec<String>,
    },
    Added {
        src: PathBuf,
        dest: PathBuf,
        added: Vec<String>,
    },
    Changed {
        src: PathBuf,
        dest: PathBuf,
        added: Vec<String>,
        removed: Vec<String>,
    },
    Removed {
        src: PathBuf,
        dest: PathBuf,
        removed: Vec<String>,
    },
}

/// A root processed without an incremental baseline
#[derive(Debug, Clone)]
pub enum FullUnit {
    Dir { src: PathBuf, dest: PathBuf },
    Archive { src: PathBuf, dest: PathBuf },
}

/// Everything the host supplies for one build invocation
#[derive(Debug, Clone)]
pub enum BuildPass {
    /// No baseline: every unit is treated as newly born
    Full(Vec<FullUnit>),
    /// Exactly the units that changed since the last pass
    Incremental {
        files: Vec<FileDelta>,
        archives: Vec<ArchiveDelta>,
    },
}

/// The dispatch core: drives the differs over a [`BuildPass`] and
/// brackets the scanner's lifecycle callbacks.
///
/// Dispatch is strictly sequential; the engine does not assume the
/// scanner is reentrant.
pub struct Engine {
    resolver: IdentityResolver,
}

impl Engine {
    /// Create an engine with the given scan filter
    #[must_use]
    pub fn new(filter: ScanFilter) -> Self {
        Self {
            resolver: IdentityResolver::new(filter),
        }
    }

    /// Whether the host may hand this engine incremental passes at all.
    /// Hosts that see `false` must fall back to full passes.
    #[must_use]
    pub fn is_incremental(&self) -> bool {
        true
    }

    /// Run one build pass.
    ///
    /// `on_scan_begin` runs exactly once before any event and
    /// `on_scan_end` exactly once afterwards, also when a mirror write
    /// aborts the pass, in which case the first error is returned after
    /// the bracket closes.
    ///
    /// # Errors
    /// Returns an error on mirror I/O failure or when a scanner hook
    /// fails outside the best-effort boundaries. Per-unit scan failures
    /// during archive iteration and full scans are logged and counted
    /// in the outcome instead.
    pub fn run(&self, scanner: &mut dyn ClassScanner, pass: &BuildPass) -> Result<ScanOutcome> {
        scanner.on_scan_begin()?;
        let result = self.process(scanner, pass);
        let end = scanner.on_scan_end();

        let outcome = result?;
        end?;

        info!(
            "pass complete: {} scanned, {} skipped, {} failed",
            outcome.scanned, outcome.skipped, outcome.failed
        );
        Ok(outcome)
    }

    fn process(&self, scanner: &mut dyn ClassScanner, pass: &BuildPass) -> Result<ScanOutcome> {
        let dirs = DirDiffer::new(&self.resolver);
        let archives = ArchiveDiffer::new(&self.resolver);
        let mut outcome = ScanOutcome::default();

        match pass {
            BuildPass::Full(units) => {
                for unit in units {
                    match unit {
                        FullUnit::Dir { src, dest } => {
                            debug!("full dir >>> {}", src.display());
                            outcome.absorb(dirs.scan_dir(scanner, src, dest)?);
                            mirror::copy_dir_all(src, dest)?;
                        }
                        FullUnit::Archive { src, dest } => {
                            debug!("full archive >>> {}", src.display());
                            outcome.absorb(archives.scan_archive(
                                scanner,
                                src,
                                dest,
                                ClassStatus::BirthJar,
                                None,
                            ));
                            mirror::copy_file(src, dest)?;
                        }
                    }
                }
            }
            BuildPass::Incremental {
                files,
                archives: archive_deltas,
            } => {
                // Births and content changes land before anything is
                // deleted from the mirror.
                for file in files {
                    if matches!(file.kind, ChangeKind::Added | ChangeKind::Changed) {
                        outcome.absorb(dirs.file_upserted(
                            scanner,
                            &file.src_root,
                            &file.dest_root,
                            &file.src,
                            &file.dest,
                        )?);
                    }
                }

                for delta in archive_deltas {
                    match delta {
                        ArchiveDelta::NotChanged { .. } => {}
                        ArchiveDelta::Added { src, dest, added } => {
                            debug!("archive added >>> {} (+{})", src.display(), added.len());
                            outcome.absorb(archives.scan_archive(
                                scanner,
                                src,
                                dest,
                                ClassStatus::BirthJar,
                                Some(added),
                            ));
                            mirror::copy_file(src, dest)?;
                        }
                        ArchiveDelta::Changed {
                            src,
                            dest,
                            added,
                            removed,
                        } => {
                            debug!(
                                "archive changed >>> {} (+{} -{})",
                                src.display(),
                                added.len(),
                                removed.len()
                            );
                            // Added entries come from the new source.
                            // Removed entries only survive in the old
                            // destination archive, so they are scanned
                            // before the copy below overwrites it.
                            outcome.absorb(archives.scan_archive(
                                scanner,
                                src,
                                dest,
                                ClassStatus::BirthJar,
                                Some(added),
                            ));
                            outcome.absorb(archives.scan_archive(
                                scanner,
                                dest,
                                dest,
                                ClassStatus::DeathJar,
                                Some(removed),
                            ));
                            mirror::copy_file(src, dest)?;
                        }
                        ArchiveDelta::Removed { .. } => {}
                    }
                }

                for file in files {
                    if file.kind == ChangeKind::Removed {
                        outcome.absorb(dirs.file_removed(
                            scanner,
                            &file.dest_root,
                            &file.src,
                            &file.dest,
                        )?);
                    }
                }

                for delta in archive_deltas {
                    if let ArchiveDelta::Removed { src, dest, removed } = delta {
                        debug!("archive removed >>> {} (-{})", src.display(), removed.len());
                        // The source archive may already be gone; the
                        // destination copy is the surviving readable one.
                        outcome.absorb(archives.scan_archive(
                            scanner,
                            dest,
                            dest,
                            ClassStatus::DeathJar,
                            Some(removed),
                        ));
                        mirror::remove_path(dest)?;
                    }
                }
            }
        }

        Ok(outcome)
    }
}
