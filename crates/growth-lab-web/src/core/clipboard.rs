//! Sequencing for the selection-based copy fallback.

/// Run `copy` against a node that was mounted for it, then unmount the node.
///
/// The unmount always runs, whatever `copy` returned. When both steps fail the
/// copy error is reported, since it is the one the caller acted on.
///
/// # Errors
/// Returns the error from `copy`, or from `unmount` when the copy succeeded.
pub fn with_scratch<N, T, E>(
    node: N,
    copy: impl FnOnce(&N) -> Result<T, E>,
    unmount: impl FnOnce(N) -> Result<(), E>,
) -> Result<T, E> {
    let copied = copy(&node);
    let removed = unmount(node);
    let copied = copied?;
    removed?;
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_copy_still_unmounts_the_node() {
        let unmounted = Cell::new(false);
        let result: Result<bool, &str> = with_scratch(
            "textarea",
            |_| Err("exec rejected"),
            |_| {
                unmounted.set(true);
                Ok(())
            },
        );
        assert_eq!(result, Err("exec rejected"));
        assert!(unmounted.get());
    }

    #[test]
    fn copy_error_wins_over_unmount_error() {
        let result: Result<bool, &str> =
            with_scratch((), |()| Err("exec rejected"), |()| Err("detached"));
        assert_eq!(result, Err("exec rejected"));
    }

    #[test]
    fn unmount_error_surfaces_after_a_good_copy() {
        let ok: Result<Option<bool>, &str> = with_scratch((), |()| Ok(Some(true)), |()| Ok(()));
        assert_eq!(ok, Ok(Some(true)));
        let detached: Result<Option<bool>, &str> =
            with_scratch((), |()| Ok(Some(true)), |()| Err("detached"));
        assert_eq!(detached, Err("detached"));
    }
}
