//! Per-load "page is ready" gate.
//!
//! Each navigation starts a new [`Epoch`] in the `Loading` state. The page
//! reports readiness tagged with the epoch it was loaded under, so a ready
//! signal from a superseded load can never release actions meant for the
//! current one.

use std::fmt;

/// Identifier of a single page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(pub u64);

impl Epoch {
    /// URL fragment key carrying the epoch through a navigation.
    pub const FRAGMENT_KEY: &'static str = "epoch";

    /// The epoch following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Add this epoch to the fragment of `url` as an `epoch=<n>` pair.
    ///
    /// The rest of an existing fragment (a hash route, other pairs) is kept;
    /// only a previous `epoch` pair is replaced.
    #[must_use]
    pub fn tag_url(self, url: &str) -> String {
        let tag = format!("{}={}", Self::FRAGMENT_KEY, self.0);
        let Some((base, fragment)) = url.split_once('#') else {
            return format!("{url}#{tag}");
        };
        let mut pairs: Vec<&str> = fragment
            .split('&')
            .filter(|pair| {
                !pair.is_empty()
                    && pair.split('=').next() != Some(Self::FRAGMENT_KEY)
            })
            .collect();
        pairs.push(&tag);
        format!("{base}#{}", pairs.join("&"))
    }

    /// Recover the epoch from a page's `location.href`.
    #[must_use]
    pub fn from_href(href: &str) -> Option<Self> {
        let (_, fragment) = href.split_once('#')?;
        fragment
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == Self::FRAGMENT_KEY)
            .and_then(|(_, value)| value.parse().ok())
            .map(Self)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of the current load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Navigation issued, page has not reported ready yet.
    Loading(Epoch),
    /// The page reported ready for this epoch.
    Ready(Epoch),
}

impl LoadState {
    /// Epoch of the current load.
    #[must_use]
    pub fn epoch(self) -> Epoch {
        match self {
            Self::Loading(e) | Self::Ready(e) => e,
        }
    }
}

/// Holds continuations until the page of the current epoch is ready.
///
/// The gate never runs actions itself; it hands them back to the caller,
/// which owns whatever context they need.
pub struct ReadyGate<A> {
    state: LoadState,
    pending: Vec<A>,
}

impl<A> ReadyGate<A> {
    /// A gate waiting for the first load (epoch 0).
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading(Epoch::default()),
            pending: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Whether the current load has reported ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// Number of actions waiting for the current load.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Register an action.
    ///
    /// Returns `Some(action)` when the page is already ready, in which case
    /// the caller runs it immediately. Otherwise the action is queued.
    pub fn register(&mut self, action: A) -> Option<A> {
        if self.is_ready() {
            Some(action)
        } else {
            self.pending.push(action);
            None
        }
    }

    /// Record a ready signal for `epoch`.
    ///
    /// Returns the queued actions, in registration order, if `epoch` is the
    /// current load and it was still loading. Stale and repeated signals
    /// return `None`.
    pub fn mark_ready(&mut self, epoch: Epoch) -> Option<Vec<A>> {
        match self.state {
            LoadState::Loading(current) if current == epoch => {
                self.state = LoadState::Ready(epoch);
                Some(std::mem::take(&mut self.pending))
            }
            _ => None,
        }
    }

    /// Start a new load and return its epoch.
    ///
    /// Actions still queued were never run against the superseded page;
    /// they stay queued and are released by the new epoch's ready signal.
    pub fn rearm(&mut self) -> Epoch {
        let epoch = self.state.epoch().next();
        self.state = LoadState::Loading(epoch);
        epoch
    }
}

impl<A> Default for ReadyGate<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for ReadyGate<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadyGate")
            .field("state", &self.state)
            .field("pending", &self.pending.len())
            .finish()
    }
}
