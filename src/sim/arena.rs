//! Entity handles and the obstacle arena
//!
//! Handles are generational slot-map keys, so a stale [`EntityId`] never
//! resolves to the entity that later reuses its slot. Iteration yields live
//! obstacles in spawn order.

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Stable handle for obstacles
    pub struct ObstacleKey;
    /// Stable handle for power-ups
    pub struct PowerupKey;
}

/// What an entity is, for hosts that map ids to visuals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Obstacle,
    Powerup,
}

/// Handle to a simulated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityId {
    /// There is exactly one player per session
    Player,
    Obstacle(ObstacleKey),
    Powerup(PowerupKey),
}

impl EntityId {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityId::Player => EntityKind::Player,
            EntityId::Obstacle(_) => EntityKind::Obstacle,
            EntityId::Powerup(_) => EntityKind::Powerup,
        }
    }
}

/// Live obstacles keyed by [`ObstacleKey`], plus their spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<T> {
    entities: SlotMap<ObstacleKey, T>,
    /// Live keys, oldest first
    order: Vec<ObstacleKey>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn insert(&mut self, value: T) -> EntityId {
        let key = self.entities.insert(value);
        self.order.push(key);
        EntityId::Obstacle(key)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        match id {
            EntityId::Obstacle(key) => self.entities.get(key),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        match id {
            EntityId::Obstacle(key) => self.entities.get_mut(key),
            _ => None,
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let EntityId::Obstacle(key) = id else {
            return None;
        };
        let value = self.entities.remove(key)?;
        self.order.retain(|&k| k != key);
        Some(value)
    }

    /// Remove every live entity, returning them in spawn order
    pub fn drain(&mut self) -> Vec<(EntityId, T)> {
        std::mem::take(&mut self.order)
            .into_iter()
            .filter_map(|key| {
                self.entities
                    .remove(key)
                    .map(|value| (EntityId::Obstacle(key), value))
            })
            .collect()
    }

    /// Live ids in spawn order
    pub fn ids(&self) -> Vec<EntityId> {
        self.order.iter().map(|&key| EntityId::Obstacle(key)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.order.iter().filter_map(move |&key| {
            self.entities
                .get(key)
                .map(|value| (EntityId::Obstacle(key), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(a.kind(), EntityKind::Obstacle);
    }

    #[test]
    fn test_stale_id_does_not_resolve() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        assert_eq!(arena.remove(a), Some(1));
        let b = arena.insert(2);
        assert_ne!(a, b);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.get(b), Some(&2));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_iteration_keeps_spawn_order_across_slot_reuse() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        let _b = arena.insert('b');
        arena.remove(a);
        // Reuses a's slot but is the newest entity
        let _c = arena.insert('c');
        let values: Vec<char> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['b', 'c']);
    }

    #[test]
    fn test_drain() {
        let mut arena = Arena::new();
        let a = arena.insert(10);
        let b = arena.insert(20);
        let drained = arena.drain();
        assert_eq!(drained, vec![(a, 10), (b, 20)]);
        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
        assert!(arena.ids().is_empty());
    }

    #[test]
    fn test_other_kinds_do_not_resolve() {
        let mut arena = Arena::new();
        arena.insert(1);
        assert_eq!(arena.get(EntityId::Player), None);
        let mut powerups: SlotMap<PowerupKey, ()> = SlotMap::with_key();
        let powerup = EntityId::Powerup(powerups.insert(()));
        assert_eq!(arena.get(powerup), None);
        assert_eq!(arena.remove(powerup), None);
        assert_eq!(arena.len(), 1);
    }
}
