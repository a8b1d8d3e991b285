//! Asset manifest and the readiness gate
//!
//! Loaders run wherever the host wants (threads, async tasks, decode pools)
//! and report terminal outcomes through a cloneable resolver handle. The
//! scheduler polls the gate between ticks; the gate drains those reports and
//! signals readiness exactly once, either when every entry has resolved or
//! when the timeout deadline passes, whichever comes first. A failed load
//! counts as resolved: the vignette starts with whatever art made it.

use std::fmt;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use serde::{Deserialize, Serialize};

use crate::consts::{COMPANION_FRAME_COUNT, WALK_FRAME_COUNT};

/// Logical identity of one loadable resource. Doubles as the sprite id
/// handed to `Surface::draw_sprite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    /// The tulip, on the ground and later in hand
    Item,
    /// Walk cycle frame, 0-based
    ProtagonistFrame(u8),
    /// Idle/celebration cycle frame, 0-based
    CompanionFrame(u8),
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKey::Item => write!(f, "item"),
            AssetKey::ProtagonistFrame(i) => write!(f, "protagonist-frame-{i}"),
            AssetKey::CompanionFrame(i) => write!(f, "companion-frame-{i}"),
        }
    }
}

/// One manifest entry: what to load and where from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub key: AssetKey,
    pub source: String,
}

/// Lifecycle of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl AssetStatus {
    /// Loaded and Failed both count as resolved; only Pending blocks the gate.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AssetStatus::Pending)
    }
}

/// Terminal result a loader reports for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Ordered resource table with per-entry status. Frozen once the gate hands
/// it to the scheduler; rendering reads statuses to skip missing art.
#[derive(Debug, Clone)]
pub struct AssetSet {
    entries: Vec<AssetEntry>,
}

#[derive(Debug, Clone)]
pub struct AssetEntry {
    pub key: AssetKey,
    pub source: String,
    pub status: AssetStatus,
}

impl AssetSet {
    fn new(manifest: Vec<AssetDescriptor>) -> Self {
        Self {
            entries: manifest
                .into_iter()
                .map(|d| AssetEntry {
                    key: d.key,
                    source: d.source,
                    status: AssetStatus::Pending,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn resolved(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_resolved()).count()
    }

    pub fn loaded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == AssetStatus::Loaded)
            .count()
    }

    pub fn status(&self, key: AssetKey) -> Option<AssetStatus> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.status)
    }

    /// Rendering gate for one sprite: anything but Loaded is skipped.
    pub fn is_loaded(&self, key: AssetKey) -> bool {
        self.status(key) == Some(AssetStatus::Loaded)
    }
}

#[derive(Debug, Clone, Copy)]
struct Resolution {
    key: AssetKey,
    outcome: LoadOutcome,
}

/// Cloneable handle a loader uses to report its outcome. Safe to call from
/// any thread; reports may arrive in any order.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    tx: Sender<Resolution>,
}

impl AssetResolver {
    pub fn resolve(&self, key: AssetKey, outcome: LoadOutcome) {
        // A closed channel means the gate is gone; nothing left to notify.
        let _ = self.tx.send(Resolution { key, outcome });
    }
}

/// One-shot readiness gate over a fixed manifest.
#[derive(Debug)]
pub struct AssetGate {
    set: AssetSet,
    deadline_ms: f64,
    ready: bool,
    tx: Sender<Resolution>,
    rx: Receiver<Resolution>,
}

impl AssetGate {
    /// Register the manifest and anchor the timeout at `now_ms`. The entry
    /// list is fixed from here on.
    pub fn new(manifest: Vec<AssetDescriptor>, timeout_ms: f64, now_ms: f64) -> Self {
        let (tx, rx) = unbounded();
        Self {
            set: AssetSet::new(manifest),
            deadline_ms: now_ms + timeout_ms,
            ready: false,
            tx,
            rx,
        }
    }

    pub fn resolver(&self) -> AssetResolver {
        AssetResolver {
            tx: self.tx.clone(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn pending(&self) -> usize {
        self.set.len() - self.set.resolved()
    }

    /// Drain loader reports, then hand over the frozen set exactly once:
    /// on the poll where everything resolved, or on the first poll at/after
    /// the deadline. Later polls return `None` and discard stragglers.
    pub fn poll(&mut self, now_ms: f64) -> Option<AssetSet> {
        loop {
            match self.rx.try_recv() {
                Ok(resolution) if !self.ready => self.apply(resolution),
                Ok(_) => {} // straggler after readiness, set is frozen
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.ready {
            return None;
        }

        let resolved = self.set.resolved();
        if resolved == self.set.len() {
            self.ready = true;
            log::info!(
                "assets ready: {} loaded, {} failed",
                self.set.loaded(),
                resolved - self.set.loaded()
            );
            return Some(self.set.clone());
        }
        if now_ms >= self.deadline_ms {
            self.ready = true;
            log::warn!(
                "asset loading timed out with {} of {} unresolved, starting anyway",
                self.set.len() - resolved,
                self.set.len()
            );
            return Some(self.set.clone());
        }
        None
    }

    fn apply(&mut self, resolution: Resolution) {
        let Some(entry) = self
            .set
            .entries
            .iter_mut()
            .find(|e| e.key == resolution.key)
        else {
            log::warn!("resolution for unknown asset {}, ignoring", resolution.key);
            return;
        };
        if entry.status.is_resolved() {
            log::debug!("duplicate resolution for {}, ignoring", resolution.key);
            return;
        }
        entry.status = match resolution.outcome {
            LoadOutcome::Loaded => AssetStatus::Loaded,
            LoadOutcome::Failed => {
                log::warn!("failed to load {} ({})", resolution.key, entry.source);
                AssetStatus::Failed
            }
        };
    }
}

/// Reference manifest: four walk frames, seven companion frames and the item.
/// The backdrop is procedural and never loaded.
pub fn default_manifest() -> Vec<AssetDescriptor> {
    let mut manifest = Vec::with_capacity(1 + WALK_FRAME_COUNT as usize + COMPANION_FRAME_COUNT as usize);
    for i in 0..WALK_FRAME_COUNT as u8 {
        manifest.push(AssetDescriptor {
            key: AssetKey::ProtagonistFrame(i),
            source: format!("assets/protagonist/walk-{i}.png"),
        });
    }
    for i in 0..COMPANION_FRAME_COUNT as u8 {
        manifest.push(AssetDescriptor {
            key: AssetKey::CompanionFrame(i),
            source: format!("assets/companion/idle-{i}.png"),
        });
    }
    manifest.push(AssetDescriptor {
        key: AssetKey::Item,
        source: "assets/tulip.png".into(),
    });
    manifest
}
