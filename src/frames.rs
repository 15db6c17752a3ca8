//! Frame index resolution
//!
//! Frames of one namespace may declare `frame_index` or leave it out.
//! Explicit indices are kept; implicit frames are numbered while walking the
//! frames in document order, each taking the smallest unused index at or
//! after the running counter. An explicit frame moves the counter past its
//! own index, so `[0, _, 5, _]` resolves to `[0, 1, 5, 6]`.

use std::collections::HashSet;

use crate::error::{Result, SpriteError};

/// Resolve the final index of every frame, in input order.
///
/// `declared` holds each frame's explicit index (or `None`) in document
/// order.
///
/// # Errors
///
/// [`SpriteError::DuplicateFrameIndex`] when two frames declare the same
/// explicit index.
pub fn resolve_indices(namespace: &str, declared: &[Option<u32>]) -> Result<Vec<u32>> {
    let mut used = HashSet::new();
    for index in declared.iter().flatten() {
        if !used.insert(*index) {
            return Err(SpriteError::DuplicateFrameIndex {
                namespace: namespace.to_string(),
                index: *index,
            });
        }
    }

    let mut counter: u64 = 0;
    let mut resolved = Vec::with_capacity(declared.len());
    for index in declared {
        match index {
            Some(explicit) => {
                counter = counter.max(u64::from(*explicit) + 1);
                resolved.push(*explicit);
            }
            None => {
                let assigned = loop {
                    let candidate = u32::try_from(counter).map_err(|_| {
                        SpriteError::malformed(format!(
                            "animation '{}' has no frame index left to assign",
                            namespace
                        ))
                    })?;
                    counter += 1;
                    if !used.contains(&candidate) {
                        break candidate;
                    }
                };
                used.insert(assigned);
                resolved.push(assigned);
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_explicit_and_implicit() {
        let resolved = resolve_indices("walk", &[Some(0), None, Some(5), None]).unwrap();
        assert_eq!(resolved, vec![0, 1, 5, 6]);
    }

    #[test]
    fn test_all_implicit_follow_document_order() {
        let resolved = resolve_indices("walk", &[None, None, None]).unwrap();
        assert_eq!(resolved, vec![0, 1, 2]);
    }

    #[test]
    fn test_implicit_skips_later_explicit() {
        // The explicit 0 declared later is already reserved
        let resolved = resolve_indices("walk", &[None, Some(0), None]).unwrap();
        assert_eq!(resolved, vec![1, 0, 2]);
    }

    #[test]
    fn test_implicit_before_explicit_gap() {
        let resolved = resolve_indices("walk", &[None, Some(1), Some(2), None]).unwrap();
        assert_eq!(resolved, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_descending_explicit_keeps_counter_high() {
        let resolved = resolve_indices("walk", &[Some(4), Some(1), None]).unwrap();
        assert_eq!(resolved, vec![4, 1, 5]);
    }

    #[test]
    fn test_duplicate_explicit_index() {
        let err = resolve_indices("walk", &[Some(2), None, Some(2)]).unwrap_err();
        assert!(matches!(
            err,
            SpriteError::DuplicateFrameIndex { ref namespace, index: 2 } if namespace == "walk"
        ));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let declared = [None, Some(3), None, None, Some(0), None];
        let first = resolve_indices("a", &declared).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve_indices("a", &declared).unwrap(), first);
        }
        let mut unique = first.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), first.len());
    }
}
