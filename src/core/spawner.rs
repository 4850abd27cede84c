//! Entity spawners: new targets, leaves, keys and words
//!
//! Positions are uniform inside a safe margin so nothing spawns on an edge.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::types::{
    BloomTarget, Collectible, EntityId, EntityIdGen, Persona, Position, TargetKey,
    BLOOM_PALETTE, KEY_ALPHABET,
};

/// Bloom targets: x in [10, 90), y in [15, 85)
const BLOOM_X: (f64, f64) = (10.0, 90.0);
const BLOOM_Y: (f64, f64) = (15.0, 85.0);

/// Leaves: x in [15, 85), y in [15, 75)
const LEAF_X: (f64, f64) = (15.0, 85.0);
const LEAF_Y: (f64, f64) = (15.0, 75.0);

#[derive(Debug)]
pub struct Spawner {
    ids: EntityIdGen,
    rng: StdRng,
}

impl Spawner {
    /// Seeded spawner for reproducible sessions
    pub fn seeded(seed: u64) -> Self {
        Self {
            ids: EntityIdGen::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            ids: EntityIdGen::new(),
            rng: StdRng::from_entropy(),
        }
    }

    fn position(&mut self, x: (f64, f64), y: (f64, f64)) -> Position {
        Position {
            x: self.rng.gen_range(x.0..x.1),
            y: self.rng.gen_range(y.0..y.1),
        }
    }

    /// Add a fresh bloom target, evicting older unbloomed ones
    ///
    /// Bloomed targets stay until their removal timer so the petal
    /// animation can finish.
    pub fn spawn_bloom(&mut self, targets: &mut Vec<BloomTarget>) -> EntityId {
        targets.retain(|t| t.is_bloomed);
        let id = self.ids.next_id();
        let position = self.position(BLOOM_X, BLOOM_Y);
        let color_index = self.rng.gen_range(0..BLOOM_PALETTE.len());
        targets.push(BloomTarget {
            id,
            position,
            color_index,
            is_bloomed: false,
        });
        id
    }

    /// A whole new batch of leaves
    pub fn spawn_leaves(&mut self, count: usize) -> Vec<Collectible> {
        (0..count)
            .map(|_| Collectible {
                id: self.ids.next_id(),
                position: self.position(LEAF_X, LEAF_Y),
                is_collected: false,
            })
            .collect()
    }

    /// Uniform pick from the key alphabet; repeats are allowed
    pub fn spawn_key(&mut self) -> TargetKey {
        KEY_ALPHABET[self.rng.gen_range(0..KEY_ALPHABET.len())]
    }

    /// Uniform pick from the persona's word list
    pub fn spawn_word(&mut self, persona: Persona) -> &'static str {
        let words = persona.word_list();
        words[self.rng.gen_range(0..words.len())]
    }

    /// Uniform pick of an index in [0, len)
    pub fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.rng.gen_range(0..len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_unbloomed_target() {
        let mut spawner = Spawner::seeded(1);
        let mut targets = Vec::new();
        spawner.spawn_bloom(&mut targets);
        targets[0].is_bloomed = true;
        spawner.spawn_bloom(&mut targets);
        let newest = spawner.spawn_bloom(&mut targets);

        let live: Vec<_> = targets.iter().filter(|t| !t.is_bloomed).collect();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, newest);
        // The bloomed one is kept for its animation
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_bloom_positions_respect_margin() {
        let mut spawner = Spawner::seeded(42);
        let mut targets = Vec::new();
        for _ in 0..200 {
            spawner.spawn_bloom(&mut targets);
            let t = targets.last().unwrap();
            assert!(t.position.x >= 10.0 && t.position.x < 90.0);
            assert!(t.position.y >= 15.0 && t.position.y < 85.0);
            assert!(t.color_index < BLOOM_PALETTE.len());
        }
    }

    #[test]
    fn test_leaf_batch_has_unique_ids() {
        let mut spawner = Spawner::seeded(3);
        let leaves = spawner.spawn_leaves(10);
        assert_eq!(leaves.len(), 10);
        let mut ids: Vec<_> = leaves.iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 10);
        assert!(leaves.iter().all(|l| !l.is_collected));
    }

    #[test]
    fn test_words_come_from_persona_list() {
        let mut spawner = Spawner::seeded(9);
        for _ in 0..50 {
            assert!(Persona::Child.word_list().contains(&spawner.spawn_word(Persona::Child)));
            assert!(KEY_ALPHABET.contains(&spawner.spawn_key()));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Spawner::seeded(11);
        let mut b = Spawner::seeded(11);
        for _ in 0..20 {
            assert_eq!(a.spawn_key(), b.spawn_key());
        }
    }
}
