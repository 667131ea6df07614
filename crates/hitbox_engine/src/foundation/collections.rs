//! Specialized collection types

pub use slotmap::{SlotMap, Key};

slotmap::new_key_type! {
    /// Generational handle to a shape stored in a
    /// [`CollisionWorld`](crate::physics::CollisionWorld).
    ///
    /// A handle whose shape was removed from the arena never resolves to a
    /// shape allocated later in the same slot.
    pub struct ShapeHandle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<ShapeHandle, T>;

/// Remove the first occurrence of `value` from `list`, keeping order.
///
/// Returns `true` if something was removed.
pub fn remove_ordered<T: PartialEq>(list: &mut Vec<T>, value: &T) -> bool {
    if let Some(index) = list.iter().position(|item| item == value) {
        list.remove(index);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_ordered_keeps_order() {
        let mut list = vec![1, 2, 3, 2];
        assert!(remove_ordered(&mut list, &2));
        assert_eq!(list, vec![1, 3, 2]);
        assert!(!remove_ordered(&mut list, &7));
    }

    #[test]
    fn test_stale_handle_does_not_alias() {
        let mut map: HandleMap<&str> = HandleMap::with_key();
        let first = map.insert("first");
        map.remove(first);
        let second = map.insert("second");

        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&"second"));
    }
}
