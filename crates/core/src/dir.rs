//! Directory differ: full scans and incremental loose-file handling

use std::path::Path;

use color_eyre::Result;
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::event::{ClassEvent, ClassSource, ClassStatus, ScanOutcome};
use crate::identity::IdentityResolver;
use crate::mirror;
use crate::scanner::ClassScanner;

/// Classifies loose class files against the destination mirror.
pub struct DirDiffer<'r> {
    resolver: &'r IdentityResolver,
}

impl<'r> DirDiffer<'r> {
    /// Create a differ using the given resolver
    #[must_use]
    pub fn new(resolver: &'r IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Full scan: dispatch a birth event for every reportable file under
    /// `src_root`. Filtered files produce no event; the caller still
    /// copies every file. A scanner failure for one file is logged and
    /// the traversal continues; one bad class must not fail the build.
    ///
    /// # Errors
    /// Returns an error if the traversal itself fails.
    pub fn scan_dir(
        &self,
        scanner: &mut dyn ClassScanner,
        src_root: &Path,
        dest_root: &Path,
    ) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();

        for entry in WalkDir::new(src_root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = self.resolver.resolve_file(src_root, entry.path()) else {
                outcome.skipped += 1;
                continue;
            };
            let event = ClassEvent {
                status: ClassStatus::BirthDir,
                dest: dest_root,
                source: ClassSource::File(entry.path()),
                name,
            };
            match scanner.on_scan_class(event) {
                Ok(()) => outcome.scanned += 1,
                Err(e) => {
                    error!("scan failed for {}: {e}", entry.path().display());
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }

    /// Incremental added/changed loose file: ensure the mirror path
    /// exists, dispatch a birth event if the file is reportable, then
    /// copy the content. Unreportable files are copied without an event.
    ///
    /// # Errors
    /// Returns an error on mirror I/O failure or scanner failure (this
    /// path is not a best-effort boundary).
    pub fn file_upserted(
        &self,
        scanner: &mut dyn ClassScanner,
        src_root: &Path,
        dest_root: &Path,
        src: &Path,
        dest: &Path,
    ) -> Result<ScanOutcome> {
        debug!("file upserted >>> {}", src.display());
        let mut outcome = ScanOutcome::default();

        // A newly appeared directory produces no event but the mirror
        // path is still created.
        if src.is_dir() {
            std::fs::create_dir_all(dest)?;
            return Ok(outcome);
        }

        // Placeholder first, so the mirror path exists even if the copy
        // below fails partway.
        mirror::touch(dest)?;

        match self.resolver.resolve_file(src_root, src) {
            Some(name) => {
                let event = ClassEvent {
                    status: ClassStatus::BirthDir,
                    dest: dest_root,
                    source: ClassSource::File(src),
                    name,
                };
                scanner.on_scan_class(event)?;
                outcome.scanned += 1;
            }
            None => outcome.skipped += 1,
        }

        mirror::copy_file(src, dest)?;
        Ok(outcome)
    }

    /// Incremental removed loose file or directory: dispatch death
    /// events for every reportable class still present in the mirror
    /// (the source may already be gone, so identities resolve against
    /// `dest_root`), then delete the mirror path.
    ///
    /// # Errors
    /// Returns an error on mirror I/O failure or scanner failure.
    pub fn file_removed(
        &self,
        scanner: &mut dyn ClassScanner,
        dest_root: &Path,
        src: &Path,
        dest: &Path,
    ) -> Result<ScanOutcome> {
        debug!(
            "file removed >>> {} (src exists: {}, dest exists: {})",
            src.display(),
            src.exists(),
            dest.exists()
        );
        let mut outcome = ScanOutcome::default();

        if dest.is_dir() {
            for entry in WalkDir::new(dest) {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(name) = self.resolver.resolve_file(dest_root, entry.path()) else {
                    outcome.skipped += 1;
                    continue;
                };
                let event = ClassEvent {
                    status: ClassStatus::DeathDir,
                    dest: dest_root,
                    source: ClassSource::File(entry.path()),
                    name,
                };
                scanner.on_scan_class(event)?;
                outcome.scanned += 1;
            }
        } else if let Some(name) = self.resolver.resolve_file(dest_root, dest) {
            let event = ClassEvent {
                status: ClassStatus::DeathDir,
                dest: dest_root,
                source: ClassSource::File(dest),
                name,
            };
            scanner.on_scan_class(event)?;
            outcome.scanned += 1;
        } else {
            outcome.skipped += 1;
        }

        if dest.exists() {
            mirror::remove_path(dest)?;
        }
        Ok(outcome)
    }
}
