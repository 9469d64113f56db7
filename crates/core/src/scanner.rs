//! The scanner seam: lifecycle hooks consumed by instrumenters and analyzers

use color_eyre::Result;

use crate::event::ClassEvent;

/// Consumer of classified class events.
///
/// The engine brackets every build pass with `on_scan_begin`/`on_scan_end`,
/// so implementations can accumulate state across the whole pass (e.g. a
/// call graph over every class they see).
pub trait ClassScanner {
    /// Called exactly once per pass, before any event.
    ///
    /// # Errors
    /// An error here fails the pass before any unit is processed.
    fn on_scan_begin(&mut self) -> Result<()>;

    /// Called once per classified class. The event's content source is
    /// only readable for the duration of the call.
    ///
    /// Errors raised during archive iteration and full-directory scans
    /// are logged per unit and do not abort the pass.
    ///
    /// # Errors
    /// Implementations may fail per class; see above for how failures
    /// are contained.
    fn on_scan_class(&mut self, event: ClassEvent<'_>) -> Result<()>;

    /// Called exactly once per pass, after all events, even when some
    /// units failed and were logged.
    ///
    /// # Errors
    /// An error here fails the pass after all units were processed.
    fn on_scan_end(&mut self) -> Result<()>;
}
