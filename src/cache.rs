//! Per-year memoization of holiday sets.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::calendar::HolidaySet;

type Cell = Arc<OnceLock<Arc<HolidaySet>>>;

/// Holiday sets keyed by year, computed at most once per year.
///
/// The map lock is only held to find or insert a year's cell; the computation
/// itself runs inside the cell's `OnceLock`, so concurrent first callers for
/// the same year wait for one computation while other years proceed.
#[derive(Debug, Default)]
pub struct HolidayCache {
    years: Mutex<BTreeMap<i32, Cell>>,
}

impl HolidayCache {
    pub fn new() -> HolidayCache {
        HolidayCache::default()
    }

    /// The cached set for `year`, computing it with `compute` on first use.
    pub fn get_or_compute<F>(&self, year: i32, compute: F) -> Arc<HolidaySet>
    where
        F: FnOnce() -> HolidaySet,
    {
        let cell = {
            let mut years = self.years.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(years.entry(year).or_default())
        };
        Arc::clone(cell.get_or_init(|| Arc::new(compute())))
    }

    /// Years whose set has been computed.
    pub fn cached_years(&self) -> Vec<i32> {
        let years = self.years.lock().unwrap_or_else(PoisonError::into_inner);
        years
            .iter()
            .filter(|(_, cell)| cell.get().is_some())
            .map(|(year, _)| *year)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn computes_once_per_year() {
        let cache = HolidayCache::new();
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            HolidaySet::empty(2024)
        };
        let a = cache.get_or_compute(2024, compute);
        let b = cache.get_or_compute(2024, compute);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        cache.get_or_compute(2025, || HolidaySet::empty(2025));
        assert_eq!(cache.cached_years(), vec![2024, 2025]);
    }

    #[test]
    fn concurrent_first_access_computes_once() {
        let cache = Arc::new(HolidayCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache.get_or_compute(2030, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(std::time::Duration::from_millis(10));
                        HolidaySet::empty(2030)
                    })
                })
            })
            .collect();
        let sets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sets.iter().all(|set| Arc::ptr_eq(set, &sets[0])));
    }
}
