// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! A minimal in-memory search tree driven only by the support callbacks.
//!
//! It plays the part of the host: descend by least penalty, split on
//! overflow, keep internal keys equal to the bounding of their subtree, and
//! answer queries through the consistency oracle. Searches are checked
//! against a brute-force scan.
//!
//! Bounds are only rewritten when [`same`] reports a change, the way a host
//! avoids dirtying pages whose key did not move.

use crate::{
    bounding::bounding,
    consistent::{Query, Strategy, consistent},
    error::IndexResult,
    keys::same,
    penalty::penalty,
    split::pick_split,
};
use period_core::{Period, Timestamp};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[derive(Debug)]
enum Node {
    Leaf(Vec<(Period, usize)>),
    Internal(Vec<(Period, Box<Node>)>),
}

impl Node {
    fn bounding(&self) -> Period {
        match self {
            Node::Leaf(entries) => bounding(entries.iter().map(|(period, _)| period)),
            Node::Internal(children) => bounding(children.iter().map(|(period, _)| period)),
        }
    }

    /// Inserts below this node; returns the new sibling if this node split.
    fn insert(&mut self, period: Period, id: usize, capacity: usize) -> IndexResult<Option<Node>> {
        match self {
            Node::Leaf(entries) => {
                entries.push((period, id));
                if entries.len() <= capacity {
                    return Ok(None);
                }
                let (left, right) = split_entries(std::mem::take(entries))?;
                *entries = left;
                Ok(Some(Node::Leaf(right)))
            }
            Node::Internal(children) => {
                let best = children
                    .iter()
                    .enumerate()
                    .map(|(i, (bound, _))| (i, penalty(*bound, period)))
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(i, _)| i)
                    .expect("internal nodes are never empty");

                let (bound, child) = &mut children[best];
                let sibling = child.insert(period, id, capacity)?;
                let grown = child.bounding();
                if !same(*bound, grown) {
                    *bound = grown;
                }
                if let Some(sibling) = sibling {
                    children.push((sibling.bounding(), Box::new(sibling)));
                }

                if children.len() <= capacity {
                    return Ok(None);
                }
                let (left, right) = split_entries(std::mem::take(children))?;
                *children = left;
                Ok(Some(Node::Internal(right)))
            }
        }
    }

    fn search(&self, query: Query, strategy: Strategy, hits: &mut Vec<usize>) -> IndexResult<()> {
        match self {
            Node::Leaf(entries) => {
                for (period, id) in entries {
                    if consistent(*period, query, strategy, true)? {
                        hits.push(*id);
                    }
                }
            }
            Node::Internal(children) => {
                for (bound, child) in children {
                    if consistent(*bound, query, strategy, false)? {
                        child.search(query, strategy, hits)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Asserts that every stored bound equals the bounding of its subtree.
    fn check_bounds(&self) {
        if let Node::Internal(children) = self {
            for (bound, child) in children {
                assert_eq!(*bound, child.bounding());
                child.check_bounds();
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(children) => {
                1 + children.iter().map(|(_, child)| child.depth()).max().unwrap_or(0)
            }
        }
    }
}

/// Regroups owned entries according to [`pick_split`].
fn split_entries<T>(items: Vec<(Period, T)>) -> IndexResult<(Vec<(Period, T)>, Vec<(Period, T)>)> {
    let keyed: Vec<(Period, usize)> = items.iter().map(|(period, _)| *period).zip(0..).collect();
    let split = pick_split(&keyed)?;

    let mut slots: Vec<Option<(Period, T)>> = items.into_iter().map(Some).collect();
    let mut take = |ordinals: &[usize]| -> Vec<(Period, T)> {
        ordinals
            .iter()
            .map(|&i| slots[i].take().expect("each ordinal is placed once"))
            .collect()
    };
    let left = take(split.left());
    let right = take(split.right());
    Ok((left, right))
}

struct ReferenceTree {
    root: Node,
    capacity: usize,
    len: usize,
}

impl ReferenceTree {
    fn new(capacity: usize) -> Self {
        Self {
            root: Node::Leaf(Vec::new()),
            capacity,
            len: 0,
        }
    }

    fn insert(&mut self, period: Period) -> IndexResult<usize> {
        let id = self.len;
        if let Some(sibling) = self.root.insert(period, id, self.capacity)? {
            let old = std::mem::replace(&mut self.root, Node::Leaf(Vec::new()));
            self.root = Node::Internal(vec![
                (old.bounding(), Box::new(old)),
                (sibling.bounding(), Box::new(sibling)),
            ]);
        }
        self.len += 1;
        Ok(id)
    }

    fn search(&self, query: impl Into<Query>, strategy: Strategy) -> IndexResult<Vec<usize>> {
        let mut hits = Vec::new();
        self.root.search(query.into(), strategy, &mut hits)?;
        hits.sort_unstable();
        Ok(hits)
    }
}

fn p(first: i64, next: i64) -> Period {
    Period::new(Timestamp::from_micros(first), Timestamp::from_micros(next)).unwrap()
}

fn random_period(rng: &mut StdRng, width: i64) -> Period {
    let first = rng.gen_range(-1_000..1_000);
    p(first, first + rng.gen_range(1..width))
}

fn brute_force(stored: &[Period], query: impl Into<Query>, strategy: Strategy) -> Vec<usize> {
    let query = query.into();
    stored
        .iter()
        .enumerate()
        .filter(|(_, key)| consistent(**key, query, strategy, true).unwrap())
        .map(|(id, _)| id)
        .collect()
}

fn containing(stored: &[Period], t: Timestamp) -> Vec<usize> {
    stored
        .iter()
        .enumerate()
        .filter(|(_, key)| key.contains_timestamp(t))
        .map(|(id, _)| id)
        .collect()
}

#[test]
fn test_tree_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x7eee);
    let mut tree = ReferenceTree::new(6);
    let mut stored = Vec::new();

    for _ in 0..500 {
        let period = random_period(&mut rng, 200);
        assert_eq!(tree.insert(period).unwrap(), stored.len());
        stored.push(period);
    }
    tree.root.check_bounds();
    assert!(tree.root.depth() > 2);

    for _ in 0..100 {
        let query = random_period(&mut rng, 400);
        for strategy in Strategy::ALL {
            let query = match strategy {
                Strategy::ContainsPoint | Strategy::ContainedByPoint => Query::Timestamp(query.start()),
                _ => Query::Period(query),
            };
            let expected = brute_force(&stored, query, strategy);
            assert_eq!(tree.search(query, strategy).unwrap(), expected, "{}", strategy);
        }
        let t = query.start();
        assert_eq!(tree.search(t, Strategy::ContainsPoint).unwrap(), containing(&stored, t));
    }

    for sentinel in [Timestamp::NEG_INFINITY, Timestamp::INFINITY] {
        for strategy in Strategy::ALL {
            assert_eq!(
                tree.search(sentinel, strategy).unwrap(),
                brute_force(&stored, sentinel, strategy),
                "{} {}",
                strategy,
                sentinel
            );
        }
        // No finite key holds an infinite instant.
        assert!(tree.search(sentinel, Strategy::ContainsPoint).unwrap().is_empty());
    }
}

#[test]
fn test_tree_with_heavy_duplicates() {
    let mut tree = ReferenceTree::new(4);
    let stored: Vec<Period> = (0..64).map(|i| p(i % 3, 10 + i % 3)).collect();
    for period in &stored {
        tree.insert(*period).unwrap();
    }
    tree.root.check_bounds();

    let query = p(1, 11);
    assert_eq!(
        tree.search(query, Strategy::Same).unwrap(),
        brute_force(&stored, query, Strategy::Same)
    );
    assert_eq!(tree.search(query, Strategy::Same).unwrap().len(), 21);
}

#[test]
fn test_tree_with_unbounded_keys() {
    let mut rng = StdRng::seed_from_u64(0x1f);
    let mut tree = ReferenceTree::new(5);
    let mut stored = Vec::new();

    for i in 0..200 {
        let period = match i % 7 {
            0 => {
                let next = Timestamp::from_micros(rng.gen_range(-500..500));
                Period::new(Timestamp::NEG_INFINITY, next).unwrap()
            }
            1 => {
                let first = Timestamp::from_micros(rng.gen_range(-500..500));
                Period::new(first, Timestamp::INFINITY).unwrap()
            }
            _ => random_period(&mut rng, 50),
        };
        tree.insert(period).unwrap();
        stored.push(period);
    }
    tree.root.check_bounds();

    for _ in 0..50 {
        let query = random_period(&mut rng, 100);
        for strategy in [
            Strategy::Overlaps,
            Strategy::Contains,
            Strategy::StrictlyBefore,
            Strategy::OverRight,
        ] {
            assert_eq!(
                tree.search(query, strategy).unwrap(),
                brute_force(&stored, query, strategy)
            );
        }
    }

    for sentinel in [Timestamp::NEG_INFINITY, Timestamp::INFINITY] {
        let hits = tree.search(sentinel, Strategy::ContainsPoint).unwrap();
        assert_eq!(hits, containing(&stored, sentinel));
        for strategy in Strategy::ALL {
            assert_eq!(
                tree.search(sentinel, strategy).unwrap(),
                brute_force(&stored, sentinel, strategy)
            );
        }
    }
    // Keys reaching down to -infinity contain it; nothing contains +infinity.
    assert!(!containing(&stored, Timestamp::NEG_INFINITY).is_empty());
    assert!(containing(&stored, Timestamp::INFINITY).is_empty());
}

#[test]
fn test_tree_with_only_empty_keys() {
    let mut tree = ReferenceTree::new(4);
    for _ in 0..20 {
        tree.insert(Period::EMPTY).unwrap();
    }
    tree.root.check_bounds();
    assert!(tree.root.depth() > 2);

    let all: Vec<usize> = (0..20).collect();
    assert_eq!(tree.search(p(0, 10), Strategy::ContainedBy).unwrap(), all);
    assert_eq!(tree.search(Timestamp::INFINITY, Strategy::ContainedByPoint).unwrap(), all);
    assert!(tree.search(p(0, 10), Strategy::Overlaps).unwrap().is_empty());
}

#[test]
fn test_tree_with_mixed_empty_keys() {
    let mut rng = StdRng::seed_from_u64(0xe3);
    let mut tree = ReferenceTree::new(5);
    let mut stored = Vec::new();

    for i in 0..150 {
        let period = if i % 5 == 0 {
            Period::EMPTY
        } else {
            random_period(&mut rng, 80)
        };
        tree.insert(period).unwrap();
        stored.push(period);
    }
    tree.root.check_bounds();

    for _ in 0..50 {
        let query = random_period(&mut rng, 300);
        for strategy in [Strategy::Overlaps, Strategy::Contains, Strategy::Same] {
            assert_eq!(
                tree.search(query, strategy).unwrap(),
                brute_force(&stored, query, strategy)
            );
        }

        // Every non-empty match is found. Empty keys are found unless they
        // share a subtree with non-empty keys whose bound misses the query.
        let hits = tree.search(query, Strategy::ContainedBy).unwrap();
        let expected = brute_force(&stored, query, Strategy::ContainedBy);
        assert!(hits.iter().all(|id| expected.contains(id)));
        for id in expected {
            if !stored[id].is_empty() {
                assert!(hits.contains(&id));
            }
        }
    }
}
