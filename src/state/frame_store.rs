//! Authoritative frame list for the current batch.
//!
//! The store holds frames behind an `Arc<Vec<Frame>>`. Every commit builds a
//! new vector and bumps the version, so snapshots handed out earlier stay
//! valid and caches can key on the version number.

use crate::domain::transitions::{try_transition, FrameAction};
use crate::frame::{Frame, FrameId};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// What a commit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChangeKind {
    /// Some frames changed in place.
    Updated(Vec<FrameId>),
    /// The whole list was replaced (new batch).
    Replaced,
}

/// Notification delivered to subscribers after each commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub version: u64,
    pub kind: StoreChangeKind,
}

/// Handle returned by [`FrameStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange)>;

/// Copy-on-write store of the current batch's frames.
pub struct FrameStore {
    frames: Arc<Vec<Frame>>,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameStore")
            .field("frames", &self.frames.len())
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FrameStore {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: Arc::new(frames),
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ===== Queries =====

    /// Cheap shared snapshot of the current frames.
    pub fn snapshot(&self) -> Arc<Vec<Frame>> {
        Arc::clone(&self.frames)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn position(&self, id: &FrameId) -> Option<usize> {
        self.frames.iter().position(|f| &f.id == id)
    }

    pub fn get(&self, id: &FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| &f.id == id)
    }

    // ===== Commits =====

    /// Applies `action` to every frame selected by `filter` in one commit.
    ///
    /// Frames for which the action does not apply are left untouched. No
    /// commit happens (and no version bump) when nothing changed.
    ///
    /// # Returns
    /// Ids of the frames that changed, in array order
    pub fn apply<F>(&mut self, action: &FrameAction<'_>, mut filter: F) -> Vec<FrameId>
    where
        F: FnMut(&Frame) -> bool,
    {
        let mut changed = Vec::new();
        let next: Vec<Frame> = self
            .frames
            .iter()
            .map(|frame| {
                if !filter(frame) {
                    return frame.clone();
                }
                match try_transition(frame, action) {
                    Some(updated) => {
                        changed.push(frame.id.clone());
                        updated
                    }
                    None => frame.clone(),
                }
            })
            .collect();

        if !changed.is_empty() {
            self.commit(next, StoreChangeKind::Updated(changed.clone()));
        }
        changed
    }

    /// Applies `action` to the frames whose ids are in `ids`.
    pub fn apply_to(&mut self, action: &FrameAction<'_>, ids: &HashSet<FrameId>) -> Vec<FrameId> {
        self.apply(action, |frame| ids.contains(&frame.id))
    }

    /// Applies `action` to the frames in the array range `range`.
    pub fn apply_range(&mut self, action: &FrameAction<'_>, range: std::ops::Range<usize>) -> Vec<FrameId> {
        let mut index = 0usize;
        self.apply(action, |_| {
            let inside = range.contains(&index);
            index += 1;
            inside
        })
    }

    /// Rewrites frames with `edit` where `filter` matches; for edits that are
    /// not phase transitions (zoom changes).
    pub fn update_where<F, E>(&mut self, mut filter: F, mut edit: E) -> Vec<FrameId>
    where
        F: FnMut(usize, &Frame) -> bool,
        E: FnMut(&mut Frame),
    {
        let mut changed = Vec::new();
        let next: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .map(|(i, frame)| {
                if !filter(i, frame) {
                    return frame.clone();
                }
                let mut updated = frame.clone();
                edit(&mut updated);
                if updated != *frame {
                    changed.push(frame.id.clone());
                }
                updated
            })
            .collect();

        if !changed.is_empty() {
            self.commit(next, StoreChangeKind::Updated(changed.clone()));
        }
        changed
    }

    /// Replaces the whole list.
    pub fn replace(&mut self, frames: Vec<Frame>) {
        self.commit(frames, StoreChangeKind::Replaced);
    }

    fn commit(&mut self, frames: Vec<Frame>, kind: StoreChangeKind) {
        self.frames = Arc::new(frames);
        self.version += 1;
        let change = StoreChange { version: self.version, kind };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }

    // ===== Subscriptions =====

    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: FnMut(&StoreChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Confidence, Phase};
    use crate::generator::generate_frames;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_apply_commits_once_and_bumps_version() {
        let mut store = FrameStore::new(generate_frames(1, Confidence::Mid));
        let changed = store.apply(&FrameAction::Toggle, |f| f.id.as_str() == "frame-1-1");
        assert_eq!(changed, vec![FrameId::from("frame-1-1")]);
        assert_eq!(store.version(), 1);
        assert_eq!(store.frames()[0].phase, Phase::DOUBLE_SELECTED);
    }

    #[test]
    fn test_noop_apply_does_not_commit() {
        let mut store = FrameStore::new(generate_frames(1, Confidence::Mid));
        let changed = store.apply(&FrameAction::Restore, |_| true);
        assert!(changed.is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_snapshots_survive_commits() {
        let mut store = FrameStore::new(generate_frames(1, Confidence::Mid));
        let before = store.snapshot();
        store.apply(&FrameAction::RejectNow, |_| true);
        assert!(before.iter().all(|f| f.phase == Phase::SELECTED));
        assert!(store.frames().iter().all(|f| f.phase == Phase::Rejected));
    }

    #[test]
    fn test_apply_range() {
        let mut store = FrameStore::new(generate_frames(1, Confidence::Mid));
        let changed = store.apply_range(&FrameAction::RejectNow, 5..10);
        assert_eq!(changed.len(), 5);
        assert_eq!(changed[0].as_str(), "frame-1-6");
    }

    #[test]
    fn test_update_where_reports_real_changes_only() {
        let mut store = FrameStore::new(generate_frames(1, Confidence::Mid));
        let changed = store.update_where(|i, _| i < 3, |f| f.confidence = Confidence::Mid);
        assert!(changed.is_empty());
        let changed = store.update_where(|i, _| i < 3, |f| f.confidence = Confidence::Max);
        assert_eq!(changed.len(), 3);
    }

    #[test]
    fn test_subscribers_are_notified() {
        let mut store = FrameStore::new(generate_frames(1, Confidence::Mid));
        let seen: Rc<RefCell<Vec<StoreChange>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        store.replace(generate_frames(2, Confidence::Mid));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].kind, StoreChangeKind::Replaced);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.apply(&FrameAction::RejectNow, |_| true);
        assert_eq!(seen.borrow().len(), 1);
    }
}
