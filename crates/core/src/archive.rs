//! Archive differ: stream entries out of archives for scanning

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::error;
use zip::ZipArchive;

use crate::event::{ClassEvent, ClassSource, ClassStatus, ScanOutcome};
use crate::identity::IdentityResolver;
use crate::scanner::ClassScanner;

/// Classifies entries inside an archive, streaming content to the
/// scanner without materializing entries to disk.
pub struct ArchiveDiffer<'r> {
    resolver: &'r IdentityResolver,
}

impl<'r> ArchiveDiffer<'r> {
    /// Create a differ using the given resolver
    #[must_use]
    pub fn new(resolver: &'r IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Scan `entries` of `src_archive` (every entry when `None`) and
    /// dispatch one event per reportable class, with the entry stream
    /// open for the duration of the scanner call.
    ///
    /// Failures are contained: an unreadable archive yields an empty
    /// outcome, and a failing entry or scanner call is logged while
    /// iteration continues; one malformed entry must not abort the
    /// archive. The archive handle is released on every exit path.
    pub fn scan_archive(
        &self,
        scanner: &mut dyn ClassScanner,
        src_archive: &Path,
        dest_archive: &Path,
        status: ClassStatus,
        entries: Option<&[String]>,
    ) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        let file = match File::open(src_archive) {
            Ok(file) => file,
            Err(e) => {
                error!("cannot open archive {}: {e}", src_archive.display());
                return outcome;
            }
        };
        let mut archive = match ZipArchive::new(file) {
            Ok(archive) => archive,
            Err(e) => {
                error!("cannot read archive {}: {e}", src_archive.display());
                return outcome;
            }
        };

        match entries {
            Some(names) => {
                for entry_name in names {
                    match archive.by_name(entry_name) {
                        Ok(mut entry) => self.scan_entry(
                            scanner,
                            dest_archive,
                            status,
                            entry_name,
                            &mut entry,
                            &mut outcome,
                        ),
                        Err(e) => {
                            error!(
                                "missing entry {entry_name} in {}: {e}",
                                src_archive.display()
                            );
                            outcome.failed += 1;
                        }
                    }
                }
            }
            None => {
                for index in 0..archive.len() {
                    match archive.by_index(index) {
                        Ok(mut entry) => {
                            let entry_name = entry.name().to_owned();
                            self.scan_entry(
                                scanner,
                                dest_archive,
                                status,
                                &entry_name,
                                &mut entry,
                                &mut outcome,
                            );
                        }
                        Err(e) => {
                            error!(
                                "unreadable entry #{index} in {}: {e}",
                                src_archive.display()
                            );
                            outcome.failed += 1;
                        }
                    }
                }
            }
        }

        outcome
    }

    /// Resolve and dispatch one open entry. The stream closes when the
    /// entry guard drops, whether or not the scanner succeeded.
    fn scan_entry(
        &self,
        scanner: &mut dyn ClassScanner,
        dest_archive: &Path,
        status: ClassStatus,
        entry_name: &str,
        reader: &mut dyn Read,
        outcome: &mut ScanOutcome,
    ) {
        let Some(name) = self.resolver.resolve_entry(entry_name) else {
            outcome.skipped += 1;
            return;
        };
        let event = ClassEvent {
            status,
            dest: dest_archive,
            source: ClassSource::Stream(reader),
            name: name.clone(),
        };
        match scanner.on_scan_class(event) {
            Ok(()) => outcome.scanned += 1,
            Err(e) => {
                error!("scan failed for {name}: {e}");
                outcome.failed += 1;
            }
        }
    }
}
