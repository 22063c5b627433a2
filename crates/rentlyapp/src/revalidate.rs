use crate::error::{RentlyError, Result};
use std::cell::RefCell;
use tracing::debug;

/// Seam for the hosting layer's route-cache invalidation. Mutating actions
/// call this after a successful write; failures are propagated to the
/// caller, never swallowed: a stale cache is a real error here.
pub trait Revalidator {
    fn revalidate(&self, path: &str) -> Result<()>;
}

/// For hosts without a route cache (the CLI). Logs and succeeds.
pub struct NullRevalidator;

impl Revalidator for NullRevalidator {
    fn revalidate(&self, path: &str) -> Result<()> {
        debug!("revalidate {path}: no route cache attached");
        Ok(())
    }
}

/// Records revalidated paths for tests; can be told to fail.
#[derive(Default)]
pub struct RecordingRevalidator {
    paths: RefCell<Vec<String>>,
    fail: RefCell<bool>,
}

impl RecordingRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.borrow_mut() = fail;
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }
}

impl Revalidator for RecordingRevalidator {
    fn revalidate(&self, path: &str) -> Result<()> {
        if *self.fail.borrow() {
            return Err(RentlyError::Revalidate(format!(
                "Simulated revalidation failure for {path}"
            )));
        }
        self.paths.borrow_mut().push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_revalidator_keeps_call_order() {
        let revalidator = RecordingRevalidator::new();
        revalidator.revalidate("/properties").unwrap();
        revalidator.revalidate("/messages").unwrap();
        assert_eq!(revalidator.paths(), vec!["/properties", "/messages"]);
    }

    #[test]
    fn failures_surface_as_revalidation_errors() {
        let revalidator = RecordingRevalidator::new();
        revalidator.set_fail(true);
        assert!(matches!(
            revalidator.revalidate("/properties"),
            Err(RentlyError::Revalidate(_))
        ));
        assert!(revalidator.paths().is_empty());
    }
}
