//! Helpers for chaining fallible steps.
//!
//! Parsing and type checking report failures through `Result` only. Chaining
//! is done with `Result::map` and `Result::and_then`: a success flows into the
//! next step, the first failure short-circuits the rest.

/// Collapse an ordered collection of results into one result.
///
/// Yields every success payload in input order, or the first failure
/// encountered. Elements after the first failure are not consumed.
pub fn sequence<T, E, I>(results: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    results.into_iter().collect()
}

/// Lift a boolean guard into the result channel
pub fn ensure<E>(condition: bool, error: impl FnOnce() -> E) -> Result<(), E> {
    if condition {
        Ok(())
    } else {
        Err(error())
    }
}
