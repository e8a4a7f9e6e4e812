//! Fixed-capacity circular task ring
//!
//! Tasks live in arena slots and are linked through explicit next/prev
//! indices. A task can sit in a slot without being linked, so it can be
//! taken off screen and put back later.

use super::SchedulerError;

/// Handle of a slot in a [`TaskRing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskId(u8);

impl TaskId {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: u8,
    prev: u8,
    linked: bool,
}

pub struct TaskRing<T, const N: usize> {
    slots: [Option<Node<T>>; N],
    head: Option<u8>,
    len: usize,
}

impl<T, const N: usize> Default for TaskRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> TaskRing<T, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            head: None,
            len: 0,
        }
    }

    /// Store a task without linking it
    pub fn insert(&mut self, value: T) -> Result<TaskId, SchedulerError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .filter(|&i| i <= usize::from(u8::MAX))
            .ok_or(SchedulerError::Full)?;
        let id = index as u8;
        self.slots[index] = Some(Node {
            value,
            next: id,
            prev: id,
            linked: false,
        });
        Ok(TaskId(id))
    }

    fn node(&self, id: TaskId) -> Option<&Node<T>> {
        self.slots.get(id.index())?.as_ref()
    }

    fn node_mut(&mut self, id: TaskId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Link a stored task in as the tail of the ring
    ///
    /// Adding a task that is already linked does nothing.
    pub fn add(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        let node = self.node(id).ok_or(SchedulerError::InvalidTask)?;
        if node.linked {
            return Ok(());
        }

        let (next, prev) = match self.head {
            None => {
                self.head = Some(id.0);
                (id.0, id.0)
            }
            Some(head) => {
                let tail = self.node(TaskId(head)).map_or(head, |n| n.prev);
                if let Some(n) = self.node_mut(TaskId(tail)) {
                    n.next = id.0;
                }
                if let Some(n) = self.node_mut(TaskId(head)) {
                    n.prev = id.0;
                }
                (head, tail)
            }
        };

        if let Some(node) = self.node_mut(id) {
            node.next = next;
            node.prev = prev;
            node.linked = true;
        }
        self.len += 1;
        Ok(())
    }

    /// Unlink a task, keeping the order of the others
    ///
    /// The task stays stored and can be added again.
    pub fn remove(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        let node = self.node(id).ok_or(SchedulerError::InvalidTask)?;
        if !node.linked {
            return Ok(());
        }
        let (next, prev) = (node.next, node.prev);

        if next == id.0 {
            self.head = None;
        } else {
            if let Some(n) = self.node_mut(TaskId(prev)) {
                n.next = next;
            }
            if let Some(n) = self.node_mut(TaskId(next)) {
                n.prev = prev;
            }
            if self.head == Some(id.0) {
                self.head = Some(next);
            }
        }

        if let Some(node) = self.node_mut(id) {
            node.next = id.0;
            node.prev = id.0;
            node.linked = false;
        }
        self.len -= 1;
        Ok(())
    }

    /// Unlink and free a slot, returning its task
    pub fn release(&mut self, id: TaskId) -> Option<T> {
        self.remove(id).ok()?;
        self.slots
            .get_mut(id.index())
            .and_then(Option::take)
            .map(|node| node.value)
    }

    pub fn get(&self, id: TaskId) -> Option<&T> {
        self.node(id).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut T> {
        self.node_mut(id).map(|n| &mut n.value)
    }

    pub fn is_linked(&self, id: TaskId) -> bool {
        self.node(id).is_some_and(|n| n.linked)
    }

    pub fn next(&self, id: TaskId) -> Option<TaskId> {
        self.node(id).filter(|n| n.linked).map(|n| TaskId(n.next))
    }

    pub fn prev(&self, id: TaskId) -> Option<TaskId> {
        self.node(id).filter(|n| n.linked).map(|n| TaskId(n.prev))
    }

    pub fn head(&self) -> Option<TaskId> {
        self.head.map(TaskId)
    }

    /// Number of linked tasks
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walk the ring for the first task matching `pred`
    ///
    /// From a linked `start` the walk begins at its successor and ends with
    /// `start` itself. Otherwise it covers the whole ring from the head.
    /// Each linked task is examined at most once.
    pub fn find<F>(&self, start: Option<TaskId>, mut pred: F) -> Option<TaskId>
    where
        F: FnMut(TaskId, &T) -> bool,
    {
        let mut cursor = match start {
            Some(id) if self.is_linked(id) => self.next(id)?,
            _ => self.head()?,
        };

        for _ in 0..self.len {
            let node = self.node(cursor)?;
            if pred(cursor, &node.value) {
                return Some(cursor);
            }
            cursor = TaskId(node.next);
        }
        None
    }

    /// Stored tasks in slot order, linked or not
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (TaskId(i as u8), &n.value)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TaskId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|n| (TaskId(i as u8), &mut n.value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    fn ring_of(values: &[u32]) -> (TaskRing<u32, 8>, Vec<TaskId, 8>) {
        let mut ring = TaskRing::new();
        let mut ids = Vec::new();
        for &v in values {
            let id = ring.insert(v).unwrap();
            ring.add(id).unwrap();
            ids.push(id).unwrap();
        }
        (ring, ids)
    }

    fn order(ring: &TaskRing<u32, 8>) -> Vec<u32, 8> {
        let mut out = Vec::new();
        let mut cursor = ring.head();
        for _ in 0..ring.len() {
            let id = cursor.unwrap();
            out.push(*ring.get(id).unwrap()).unwrap();
            cursor = ring.next(id);
        }
        out
    }

    #[test]
    fn test_add_appends_in_order() {
        let (ring, ids) = ring_of(&[1, 2, 3]);
        assert_eq!(order(&ring).as_slice(), &[1, 2, 3]);
        assert_eq!(ring.next(ids[2]), Some(ids[0]));
        assert_eq!(ring.prev(ids[0]), Some(ids[2]));
    }

    #[test]
    fn test_remove_keeps_order() {
        let (mut ring, ids) = ring_of(&[1, 2, 3, 4]);
        ring.remove(ids[1]).unwrap();
        assert_eq!(order(&ring).as_slice(), &[1, 3, 4]);

        ring.remove(ids[0]).unwrap();
        assert_eq!(order(&ring).as_slice(), &[3, 4]);
        assert_eq!(ring.head(), Some(ids[2]));

        // Re-adding puts the task at the tail
        ring.add(ids[1]).unwrap();
        assert_eq!(order(&ring).as_slice(), &[3, 4, 2]);
    }

    #[test]
    fn test_remove_last_empties_ring() {
        let (mut ring, ids) = ring_of(&[1]);
        assert_eq!(ring.next(ids[0]), Some(ids[0]));
        ring.remove(ids[0]).unwrap();
        assert!(ring.is_empty());
        assert_eq!(ring.head(), None);
        assert_eq!(ring.next(ids[0]), None);
        assert_eq!(ring.get(ids[0]), Some(&1));
    }

    #[test]
    fn test_full_and_release() {
        let mut ring: TaskRing<u32, 2> = TaskRing::new();
        let a = ring.insert(1).unwrap();
        ring.insert(2).unwrap();
        assert_eq!(ring.insert(3), Err(SchedulerError::Full));

        ring.add(a).unwrap();
        assert_eq!(ring.release(a), Some(1));
        assert!(ring.is_empty());
        assert!(ring.insert(3).is_ok());
        assert_eq!(ring.add(TaskId(7)), Err(SchedulerError::InvalidTask));
    }

    #[test]
    fn test_find_starts_after_start() {
        let (ring, ids) = ring_of(&[1, 2, 3]);
        assert_eq!(ring.find(Some(ids[0]), |_, _| true), Some(ids[1]));
        assert_eq!(ring.find(Some(ids[2]), |_, _| true), Some(ids[0]));
        // Start itself is checked last
        assert_eq!(ring.find(Some(ids[1]), |_, &v| v == 2), Some(ids[1]));
        assert_eq!(ring.find(None, |_, &v| v > 1), Some(ids[1]));
    }

    #[test]
    fn test_find_without_match_visits_each_once() {
        let (ring, ids) = ring_of(&[1, 2, 3, 4, 5]);
        let mut visits = [0u8; 8];
        let found = ring.find(Some(ids[3]), |id, _| {
            visits[id.index()] += 1;
            false
        });
        assert_eq!(found, None);
        assert_eq!(&visits[..5], &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_find_on_empty_ring() {
        let ring: TaskRing<u32, 4> = TaskRing::new();
        assert_eq!(ring.find(None, |_, _| true), None);
    }
}
