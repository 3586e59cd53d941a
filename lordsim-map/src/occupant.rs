//! Things that sit on a cell: a dropped item container and the stacks present.
//!
//! Both are owned by their [`TerrainCell`](crate::cell::TerrainCell). Item
//! contents beyond "is something plantable here" belong to the inventory system.

use crate::ids::{ItemId, PlayerId, StackId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Can be planted in the ground (e.g. a standard).
    pub plantable: bool,
    /// Player whose standard is planted here, if any.
    pub planted_by: Option<PlayerId>,
}

impl Item {
    pub fn new(id: ItemId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            plantable: false,
            planted_by: None,
        }
    }

    pub fn plantable(mut self) -> Self {
        self.plantable = true;
        self
    }
}

/// Items lying on a cell, in the order they were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backpack {
    items: Vec<Item>,
}

impl Backpack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove an item, handing it back to the caller.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item that can be planted, if any.
    pub fn plantable_item(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.plantable)
    }
}

/// A stack present on a cell, with its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackRef {
    pub stack: StackId,
    pub owner: PlayerId,
}

/// The stacks on one cell, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackContainer {
    stacks: Vec<StackRef>,
}

impl StackContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stack. Returns `false` if it was already here.
    pub fn add(&mut self, stack: StackRef) -> bool {
        if self.contains(stack.stack) {
            return false;
        }
        self.stacks.push(stack);
        true
    }

    pub fn remove(&mut self, stack: StackId) -> Option<StackRef> {
        let index = self.stacks.iter().position(|s| s.stack == stack)?;
        Some(self.stacks.remove(index))
    }

    pub fn contains(&self, stack: StackId) -> bool {
        self.stacks.iter().any(|s| s.stack == stack)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Owner of the stacks here (the first arrival's owner).
    pub fn owner(&self) -> Option<PlayerId> {
        self.stacks.first().map(|s| s.owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StackRef> + '_ {
        self.stacks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backpack_plantable_item() {
        let mut pack = Backpack::new();
        assert!(pack.plantable_item().is_none());

        pack.add_item(Item::new(ItemId(1), "Sword"));
        assert!(pack.plantable_item().is_none());

        pack.add_item(Item::new(ItemId(2), "Standard").plantable());
        assert_eq!(pack.plantable_item().map(|i| i.id), Some(ItemId(2)));
        assert_eq!(pack.len(), 2);
    }

    #[test]
    fn test_backpack_remove_keeps_order() {
        let mut pack = Backpack::new();
        for i in 1..=3 {
            pack.add_item(Item::new(ItemId(i), "Trinket"));
        }
        let removed = pack.remove_item(ItemId(2)).unwrap();
        assert_eq!(removed.id, ItemId(2));
        let ids: Vec<_> = pack.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(3)]);
        assert!(pack.remove_item(ItemId(2)).is_none());
    }

    #[test]
    fn test_stack_container_add_is_idempotent() {
        let mut stacks = StackContainer::new();
        let red = StackRef {
            stack: StackId(7),
            owner: PlayerId(1),
        };
        assert!(stacks.add(red));
        assert!(!stacks.add(red));
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks.owner(), Some(PlayerId(1)));
    }

    #[test]
    fn test_stack_container_remove() {
        let mut stacks = StackContainer::new();
        stacks.add(StackRef {
            stack: StackId(1),
            owner: PlayerId(2),
        });
        stacks.add(StackRef {
            stack: StackId(2),
            owner: PlayerId(2),
        });
        assert_eq!(stacks.remove(StackId(1)).map(|s| s.stack), Some(StackId(1)));
        assert!(!stacks.contains(StackId(1)));
        assert!(stacks.contains(StackId(2)));
        assert!(stacks.remove(StackId(9)).is_none());

        stacks.remove(StackId(2));
        assert!(stacks.is_empty());
        assert_eq!(stacks.owner(), None);
    }
}
