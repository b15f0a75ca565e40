//! Offscreen Surface - Registry of live measurement containers.
//!
//! Every measurement container attaches itself here for the duration of one
//! truncation pass and detaches on drop. The registry lets callers and tests
//! observe that no container outlives its pass.
//!
//! State is thread-local: passes on one thread never overlap, and a container
//! cannot be moved to another thread.

use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    /// Surface ids currently attached.
    static LIVE_SURFACES: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());

    /// Pool of detached ids for reuse.
    static FREE_SURFACES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };

    /// Next id to hand out if the pool is empty.
    static NEXT_SURFACE: RefCell<usize> = const { RefCell::new(0) };

    /// Total attachments since the last reset.
    static ATTACH_COUNT: RefCell<usize> = const { RefCell::new(0) };
}

/// Attach a new surface and return its id.
pub fn attach_surface() -> usize {
    let id = FREE_SURFACES.with(|free| {
        free.borrow_mut().pop().unwrap_or_else(|| {
            NEXT_SURFACE.with(|next| {
                let mut next = next.borrow_mut();
                let id = *next;
                *next += 1;
                id
            })
        })
    });

    LIVE_SURFACES.with(|live| {
        live.borrow_mut().insert(id);
    });
    ATTACH_COUNT.with(|count| *count.borrow_mut() += 1);

    id
}

/// Detach a surface. Detaching an unknown id is a no-op.
pub fn detach_surface(id: usize) {
    let removed = LIVE_SURFACES.with(|live| live.borrow_mut().remove(&id));
    if removed {
        FREE_SURFACES.with(|free| free.borrow_mut().push(id));
    }
}

pub fn is_attached(id: usize) -> bool {
    LIVE_SURFACES.with(|live| live.borrow().contains(&id))
}

/// Number of surfaces attached right now.
pub fn live_surface_count() -> usize {
    LIVE_SURFACES.with(|live| live.borrow().len())
}

/// Number of surfaces attached since the last reset, live or not.
pub fn surfaces_attached_total() -> usize {
    ATTACH_COUNT.with(|count| *count.borrow())
}

/// Reset all surface state (for testing).
pub fn reset_surfaces() {
    LIVE_SURFACES.with(|live| live.borrow_mut().clear());
    FREE_SURFACES.with(|free| free.borrow_mut().clear());
    NEXT_SURFACE.with(|next| *next.borrow_mut() = 0);
    ATTACH_COUNT.with(|count| *count.borrow_mut() = 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_detach() {
        reset_surfaces();

        let a = attach_surface();
        let b = attach_surface();
        assert_ne!(a, b);
        assert!(is_attached(a));
        assert_eq!(live_surface_count(), 2);

        detach_surface(a);
        assert!(!is_attached(a));
        assert!(is_attached(b));
        assert_eq!(live_surface_count(), 1);
        assert_eq!(surfaces_attached_total(), 2);
    }

    #[test]
    fn test_detached_id_is_reused() {
        reset_surfaces();

        let a = attach_surface();
        detach_surface(a);
        assert_eq!(attach_surface(), a);
    }

    #[test]
    fn test_double_detach_is_noop() {
        reset_surfaces();

        let a = attach_surface();
        detach_surface(a);
        detach_surface(a);
        assert_eq!(live_surface_count(), 0);
        // Freed once, so the next two attachments get distinct ids.
        let b = attach_surface();
        let c = attach_surface();
        assert_ne!(b, c);
    }
}
