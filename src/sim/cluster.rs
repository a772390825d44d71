//! Ordered entity cluster
//!
//! A cluster owns a sequence of payloads (asteroids, blasts) with O(1) append,
//! O(1) removal by handle and front-to-back traversal. Storage is an arena of
//! slots; ordering is an intrusive doubly-linked list threaded through the
//! slots by index. Handles carry a generation so a handle outlives neither its
//! payload nor a slot that has since been reused.
//!
//! Invariants:
//! - `first.is_none() == last.is_none() == (len == 0)`
//! - for every linked node, `next.prev == node` and `prev.next == node`

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable reference to a node in a [`Cluster`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Structural damage found by [`Cluster::check_links`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("cluster ends disagree: first={first:?}, last={last:?}, len={len}")]
    EndsMismatch {
        first: Option<u32>,
        last: Option<u32>,
        len: usize,
    },
    #[error("node {index} links to vacant slot {target}")]
    DanglingLink { index: u32, target: u32 },
    #[error("node {index}: neighbour {neighbour} does not link back")]
    BrokenBackLink { index: u32, neighbour: u32 },
    #[error("walked {walked} nodes but cluster reports {len}")]
    CountMismatch { walked: usize, len: usize },
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Arena-backed doubly-linked collection
#[derive(Debug, Clone)]
pub struct Cluster<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    first: Option<u32>,
    last: Option<u32>,
    len: usize,
}

impl<T> Default for Cluster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cluster<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            first: None,
            last: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a payload at the back
    pub fn add(&mut self, value: T) -> Handle {
        self.add_with(|_| value)
    }

    /// Append a payload built from its own handle
    ///
    /// Lets a payload remember where it lives so it can later remove itself
    /// without a search.
    pub fn add_with(&mut self, make: impl FnOnce(Handle) -> T) -> Handle {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let handle = Handle {
            index,
            generation: self.slots[index as usize].generation,
        };

        let node = Node {
            value: make(handle),
            prev: self.last,
            next: None,
        };
        self.slots[index as usize].node = Some(node);

        match self.last {
            Some(old_last) => {
                let old = self.node_mut(old_last);
                assert!(
                    old.next.is_none(),
                    "cluster tail {old_last} already has a successor"
                );
                old.next = Some(index);
            }
            None => {
                assert!(
                    self.first.is_none(),
                    "cluster has a first node but no last node"
                );
                self.first = Some(index);
            }
        }
        self.last = Some(index);
        self.len += 1;
        handle
    }

    /// Unlink the node behind `handle` and return its payload
    ///
    /// Returns `None` for a handle that is stale or belongs elsewhere.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            log::warn!(
                "ignoring remove of stale cluster handle {}:{}",
                handle.index,
                handle.generation
            );
            return None;
        }

        let slot = &mut self.slots[handle.index as usize];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.first = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.last = node.prev,
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Drop every payload, keeping the allocated slots
    pub fn clear(&mut self) {
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            cursor = self.next_of(handle);
            self.remove(handle);
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|slot| slot.generation == handle.generation && slot.node.is_some())
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.node.as_ref().map(|node| &node.value)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.node.as_mut().map(|node| &mut node.value)
    }

    pub fn first(&self) -> Option<Handle> {
        self.first.map(|index| self.handle_at(index))
    }

    pub fn last(&self) -> Option<Handle> {
        self.last.map(|index| self.handle_at(index))
    }

    /// Successor of a live node
    pub fn next_of(&self, handle: Handle) -> Option<Handle> {
        let node = self.node_of(handle)?;
        node.next.map(|index| self.handle_at(index))
    }

    /// Predecessor of a live node
    pub fn prev_of(&self, handle: Handle) -> Option<Handle> {
        let node = self.node_of(handle)?;
        node.prev.map(|index| self.handle_at(index))
    }

    /// Front-to-back iterator over payloads
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cluster: self,
            cursor: self.first,
            remaining: self.len,
        }
    }

    /// Front-to-back iterator over handles and payloads
    pub fn iter_with_handles(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        let mut cursor = self.first;
        std::iter::from_fn(move || {
            let index = cursor?;
            let node = self.slots[index as usize].node.as_ref()?;
            cursor = node.next;
            Some((self.handle_at(index), &node.value))
        })
    }

    /// Run `action` on every payload, front to back
    pub fn for_each<R>(&mut self, action: impl FnMut(&mut T) -> R) {
        self.for_each_then(action, |_, _, _| {});
    }

    /// Run `action` on every payload, then hand its result to `on_result`
    ///
    /// `on_result` may remove the node it was given. The successor is captured
    /// before `on_result` runs, so removing that successor instead is a bug and
    /// panics. Not reentrant.
    pub fn for_each_then<R>(
        &mut self,
        mut action: impl FnMut(&mut T) -> R,
        mut on_result: impl FnMut(&mut Self, Handle, R),
    ) {
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            assert!(
                self.contains(handle),
                "cluster node {}:{} vanished during traversal",
                handle.index,
                handle.generation
            );
            let result = match self.get_mut(handle) {
                Some(value) => action(value),
                None => break,
            };
            cursor = self.next_of(handle);
            on_result(self, handle, result);
        }
    }

    /// O(1) check that both ends and the count agree
    pub fn check_ends(&self) -> Result<(), ClusterError> {
        let ends_agree = self.first.is_none() == self.last.is_none()
            && self.first.is_none() == (self.len == 0);
        let tail_terminates = match self.last {
            Some(last) => self.slots[last as usize]
                .node
                .as_ref()
                .is_some_and(|node| node.next.is_none()),
            None => true,
        };
        if !ends_agree || !tail_terminates {
            return Err(ClusterError::EndsMismatch {
                first: self.first,
                last: self.last,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Walk the whole structure and verify the link invariants
    pub fn check_links(&self) -> Result<(), ClusterError> {
        self.check_ends()?;

        let mut walked = 0;
        let mut prev: Option<u32> = None;
        let mut cursor = self.first;
        while let Some(index) = cursor {
            let node = self.slots[index as usize]
                .node
                .as_ref()
                .ok_or(ClusterError::DanglingLink {
                    index: prev.unwrap_or(index),
                    target: index,
                })?;
            if node.prev != prev {
                return Err(ClusterError::BrokenBackLink {
                    index,
                    neighbour: prev.unwrap_or(index),
                });
            }
            walked += 1;
            if walked > self.len {
                return Err(ClusterError::CountMismatch {
                    walked,
                    len: self.len,
                });
            }
            prev = Some(index);
            cursor = node.next;
        }

        if prev != self.last {
            return Err(ClusterError::EndsMismatch {
                first: self.first,
                last: self.last,
                len: self.len,
            });
        }
        if walked != self.len {
            return Err(ClusterError::CountMismatch {
                walked,
                len: self.len,
            });
        }
        Ok(())
    }

    fn handle_at(&self, index: u32) -> Handle {
        Handle {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn node_of(&self, handle: Handle) -> Option<&Node<T>> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, index: u32) -> &mut Node<T> {
        match self.slots[index as usize].node.as_mut() {
            Some(node) => node,
            None => panic!("cluster link points at vacant slot {index}"),
        }
    }
}

/// Ordered payload iterator
pub struct Iter<'a, T> {
    cluster: &'a Cluster<T>,
    cursor: Option<u32>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = self.cluster.slots[index as usize].node.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a Cluster<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(cluster: &Cluster<i32>) -> Vec<i32> {
        cluster.iter().copied().collect()
    }

    #[test]
    fn test_empty_cluster() {
        let cluster: Cluster<i32> = Cluster::new();
        assert!(cluster.is_empty());
        assert!(cluster.first().is_none());
        assert!(cluster.last().is_none());
        assert!(cluster.check_links().is_ok());
    }

    #[test]
    fn test_add_preserves_order() {
        let mut cluster = Cluster::new();
        let a = cluster.add(1);
        cluster.add(2);
        let c = cluster.add(3);

        assert_eq!(collect(&cluster), vec![1, 2, 3]);
        assert_eq!(cluster.first(), Some(a));
        assert_eq!(cluster.last(), Some(c));
        assert_eq!(cluster.len(), 3);
        assert!(cluster.check_links().is_ok());
    }

    #[test]
    fn test_remove_first_middle_last() {
        let mut cluster = Cluster::new();
        let handles: Vec<_> = (0..5).map(|i| cluster.add(i)).collect();

        assert_eq!(cluster.remove(handles[2]), Some(2));
        assert_eq!(collect(&cluster), vec![0, 1, 3, 4]);
        assert_eq!(cluster.remove(handles[0]), Some(0));
        assert_eq!(cluster.first(), Some(handles[1]));
        assert_eq!(cluster.remove(handles[4]), Some(4));
        assert_eq!(cluster.last(), Some(handles[3]));
        assert_eq!(collect(&cluster), vec![1, 3]);
        assert!(cluster.check_links().is_ok());

        cluster.remove(handles[1]);
        cluster.remove(handles[3]);
        assert!(cluster.is_empty());
        assert!(cluster.first().is_none() && cluster.last().is_none());
        assert!(cluster.check_links().is_ok());
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut cluster = Cluster::new();
        let a = cluster.add(10);
        assert_eq!(cluster.remove(a), Some(10));

        // Slot is reused with a new generation
        let b = cluster.add(20);
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());

        assert!(cluster.get(a).is_none());
        assert_eq!(cluster.remove(a), None);
        assert_eq!(cluster.get(b), Some(&20));
        assert_eq!(cluster.len(), 1);
    }

    #[test]
    fn test_add_with_sees_own_handle() {
        let mut cluster: Cluster<(Handle, &str)> = Cluster::new();
        let h = cluster.add_with(|handle| (handle, "rock"));
        let (stored, _) = cluster.get(h).copied().unwrap();
        assert_eq!(stored, h);
        assert!(cluster.remove(stored).is_some());
    }

    #[test]
    fn test_for_each_then_removes_current() {
        let mut cluster = Cluster::new();
        for i in 0..6 {
            cluster.add(i);
        }

        cluster.for_each_then(
            |value| *value % 2 == 0,
            |cluster, handle, even| {
                if even {
                    cluster.remove(handle);
                }
            },
        );

        assert_eq!(collect(&cluster), vec![1, 3, 5]);
        assert!(cluster.check_links().is_ok());
    }

    #[test]
    fn test_for_each_mutates_and_is_restartable() {
        let mut cluster = Cluster::new();
        cluster.add(1);
        cluster.add(2);

        cluster.for_each(|v| *v *= 10);
        cluster.for_each(|v| *v += 1);
        assert_eq!(collect(&cluster), vec![11, 21]);
    }

    #[test]
    fn test_neighbour_navigation() {
        let mut cluster = Cluster::new();
        let a = cluster.add('a');
        let b = cluster.add('b');
        let c = cluster.add('c');

        assert_eq!(cluster.next_of(a), Some(b));
        assert_eq!(cluster.prev_of(c), Some(b));
        assert_eq!(cluster.next_of(c), None);
        assert_eq!(cluster.prev_of(a), None);

        cluster.remove(b);
        assert_eq!(cluster.next_of(a), Some(c));
        assert_eq!(cluster.next_of(b), None);
    }

    #[test]
    fn test_check_ends_catches_damaged_ends() {
        let mut cluster = Cluster::new();
        cluster.add(1);
        cluster.add(2);
        assert!(cluster.check_ends().is_ok());

        cluster.last = None;
        assert!(matches!(
            cluster.check_ends(),
            Err(ClusterError::EndsMismatch { .. })
        ));
        assert!(cluster.check_links().is_err());

        cluster.last = cluster.first;
        assert!(cluster.check_ends().is_err());
    }

    #[test]
    fn test_clear() {
        let mut cluster = Cluster::new();
        for i in 0..4 {
            cluster.add(i);
        }
        cluster.clear();
        assert!(cluster.is_empty());
        assert!(cluster.check_links().is_ok());
        let h = cluster.add(99);
        assert_eq!(cluster.first(), Some(h));
    }

    #[test]
    fn test_iter_with_handles_matches_order() {
        let mut cluster = Cluster::new();
        let handles: Vec<_> = (0..3).map(|i| cluster.add(i * 7)).collect();
        let walked: Vec<_> = cluster.iter_with_handles().map(|(h, v)| (h, *v)).collect();
        assert_eq!(
            walked,
            vec![(handles[0], 0), (handles[1], 7), (handles[2], 14)]
        );
    }
}
