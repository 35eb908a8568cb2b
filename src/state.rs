// The one in-memory result set shown by the dashboard.
//
// A reload either swaps in a complete new `Dashboard` or leaves the old one
// untouched. Overlapping reloads are refused rather than queued.
use crate::error::LoadError;
use crate::types::Dashboard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// Shown to the user whenever a reload fails.
pub const LOAD_FAILURE_NOTICE: &str =
    "Gagal memuat data dari Google Sheets. Cek koneksi internet atau format data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded,
    /// Another reload was still running; nothing was done.
    AlreadyRunning,
}

#[derive(Default)]
pub struct DashboardState {
    current: Mutex<Option<Arc<Dashboard>>>,
    loading: AtomicBool,
}

/// Clears the in-flight flag however the reload ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully loaded dashboard, if any.
    pub fn current(&self) -> Option<Arc<Dashboard>> {
        self.lock().clone()
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Run `fetch` and replace the dashboard with its result on success.
    ///
    /// On error the previous dashboard stays in place and the error is
    /// handed back for the caller to report.
    pub fn reload_with<F>(&self, fetch: F) -> Result<ReloadOutcome, LoadError>
    where
        F: FnOnce() -> Result<Dashboard, LoadError>,
    {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Reload requested while another is in flight; ignoring");
            return Ok(ReloadOutcome::AlreadyRunning);
        }
        let _guard = LoadingGuard(&self.loading);

        match fetch() {
            Ok(dashboard) => {
                *self.lock() = Some(Arc::new(dashboard));
                info!("Dashboard refreshed");
                Ok(ReloadOutcome::Reloaded)
            }
            Err(e) => {
                warn!("Reload failed, keeping previous data: {}", e);
                Err(e)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Dashboard>>> {
        // The slot is only ever replaced whole; poison carries no torn state.
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_dashboard;
    use crate::loader::parse_records;

    fn dashboard_from(csv: &str) -> Result<Dashboard, LoadError> {
        Ok(build_dashboard(&parse_records(csv)?))
    }

    const GOOD: &str = "order_id,order_date,product_category,customer_city,payment_method,price,quantity,discount_applied\n\
                        A1,2024-01-05,Fashion,Jakarta,QRIS,100,2,10%\n\
                        A2,2024-01-06,Electronics,Bandung,Transfer,50,1,\n";

    #[test]
    fn test_starts_empty() {
        let state = DashboardState::new();
        assert!(state.current().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_successful_reload_replaces_dashboard() {
        let state = DashboardState::new();
        let outcome = state.reload_with(|| dashboard_from(GOOD)).unwrap();
        assert_eq!(outcome, ReloadOutcome::Reloaded);
        let current = state.current().unwrap();
        assert!((current.kpis.total_revenue - 230.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_reload_keeps_previous_dashboard() {
        let state = DashboardState::new();
        state.reload_with(|| dashboard_from(GOOD)).unwrap();
        let before = state.current().unwrap();

        let bad = "order_id,order_date\nA1,2024-01-05\n";
        let result = state.reload_with(|| dashboard_from(bad));
        assert!(matches!(result, Err(LoadError::MissingColumn(_))));

        let after = state.current().unwrap();
        assert_eq!(*before, *after);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failed_first_load_leaves_nothing() {
        let state = DashboardState::new();
        let result = state.reload_with(|| Err(LoadError::Timeout { secs: 30 }));
        assert!(result.is_err());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_overlapping_reload_is_ignored() {
        let state = DashboardState::new();
        let outcome = state
            .reload_with(|| {
                assert!(state.is_loading());
                let nested = state.reload_with(|| dashboard_from(GOOD)).unwrap();
                assert_eq!(nested, ReloadOutcome::AlreadyRunning);
                assert!(state.current().is_none());
                dashboard_from(GOOD)
            })
            .unwrap();
        assert_eq!(outcome, ReloadOutcome::Reloaded);
        assert!(!state.is_loading());
        assert!(state.current().is_some());
    }
}
