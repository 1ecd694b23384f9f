use std::fmt::Display;

/// Log-and-swallow for steps that must not fail the surrounding flow,
/// e.g. tag reconciliation after a post row is already written.
pub trait OkLogged<T> {
    fn ok_logged(self, what: &str) -> Option<T>;
}

impl<T, E: Display> OkLogged<T> for Result<T, E> {
    fn ok_logged(self, what: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::error!(step = what, err = %e, "step failed, continuing");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_logged_passes_through_ok() {
        let r: Result<i32, String> = Ok(7);
        assert_eq!(r.ok_logged("noop"), Some(7));
    }

    #[test]
    fn ok_logged_swallows_err() {
        let r: Result<i32, String> = Err("boom".into());
        assert_eq!(r.ok_logged("noop"), None);
    }
}
