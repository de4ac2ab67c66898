//! Pre-flight validation of navigation targets.
//!
//! A navigation command only ever leaves the process for a path the registry
//! knows about. Comparison is exact-string: no trailing-slash trimming, no
//! case folding, no query-string stripping. The frontend router owns those
//! concerns; anything it would not recognize verbatim is rejected here.

use crate::error::NavError;
use crate::registry::RouteRegistry;

/// Validates a proposed navigation path against the registry.
///
/// Accepted iff the path is the root `/` or equals a registered route's path
/// exactly. Rejection carries a human-readable reason naming the path; this
/// function never panics.
pub fn validate_path(registry: &RouteRegistry, path: &str) -> Result<(), NavError> {
    if path == "/" || registry.contains_path(path) {
        Ok(())
    } else {
        Err(NavError::InvalidRoute(format!("invalid route: {path}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_path_validates() {
        let registry = RouteRegistry::site();
        for route in registry.routes() {
            assert!(
                validate_path(&registry, &route.path).is_ok(),
                "{} should validate",
                route.path
            );
        }
    }

    #[test]
    fn root_path_always_validates() {
        let registry = RouteRegistry::site();
        assert!(validate_path(&registry, "/").is_ok());
    }

    #[test]
    fn unknown_paths_reject_with_reason() {
        let registry = RouteRegistry::site();
        for path in ["/nope", "/dashboard/", "/DASHBOARD", "dashboard", "/quiz?x=1", ""] {
            let err = validate_path(&registry, path).unwrap_err();
            match err {
                NavError::InvalidRoute(reason) => {
                    assert!(reason.contains(path) || path.is_empty(), "reason: {reason}")
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
