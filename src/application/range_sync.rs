// Range synchronizer - Keeps timeseries panels on one visible window
use crate::application::panel_registry::PanelRegistry;
use crate::application::renderer::{RangeEvent, RangeNotifier};
use crate::domain::panel::{PanelIndex, PanelKind};
use crate::domain::range::TimeRange;
use std::collections::VecDeque;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Propagating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Shared range updated and imposed on `targets` other panels.
    Propagated { targets: usize },
    /// Arrived while a pass was running; an echo of our own `impose_range`.
    Suppressed,
    /// Source is not a live timeseries panel.
    Ignored,
}

/// Owns the shared range and the `{Idle, Propagating}` guard. Render handles
/// report changes through notifiers created by [`RangeSynchronizer::subscribe`];
/// notifications may arrive synchronously from inside `impose_range`.
pub struct RangeSynchronizer {
    state: SyncState,
    shared_range: Option<TimeRange>,
    tx: UnboundedSender<RangeEvent>,
    rx: UnboundedReceiver<RangeEvent>,
    /// User changes queued before a pass started, awaiting their own pass
    backlog: VecDeque<RangeEvent>,
}

impl Default for RangeSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeSynchronizer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: SyncState::Idle,
            shared_range: None,
            tx,
            rx,
            backlog: VecDeque::new(),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn shared_range(&self) -> Option<TimeRange> {
        self.shared_range
    }

    /// Notifier for the handle drawn in `panel`.
    pub fn subscribe(&self, panel: PanelIndex) -> RangeNotifier {
        RangeNotifier::new(panel, self.tx.clone())
    }

    /// One synchronization pass for a range change reported by `source`.
    pub fn on_panel_range_changed(
        &mut self,
        registry: &mut PanelRegistry,
        source: PanelIndex,
        range: TimeRange,
    ) -> SyncOutcome {
        if self.state == SyncState::Propagating {
            return SyncOutcome::Suppressed;
        }
        if registry.kind_of(source) != Some(PanelKind::Timeseries) {
            tracing::debug!("Ignoring range change from non-timeseries panel {}", source);
            return SyncOutcome::Ignored;
        }

        self.state = SyncState::Propagating;
        self.shared_range = Some(range);
        let targets = self.impose_on_timeseries(registry, Some(source), range);
        self.state = SyncState::Idle;

        tracing::debug!(
            "Panel {} moved shared range to {} ({} panels followed)",
            source,
            range.describe(),
            targets
        );
        SyncOutcome::Propagated { targets }
    }

    /// Record `range` and impose it on every timeseries panel, in one guarded
    /// pass. Used when restoring a dashboard.
    pub fn apply_shared_range(&mut self, registry: &mut PanelRegistry, range: TimeRange) -> usize {
        self.state = SyncState::Propagating;
        self.shared_range = Some(range);
        let targets = self.impose_on_timeseries(registry, None, range);
        self.state = SyncState::Idle;
        targets
    }

    /// Run a pass, in arrival order, for every user change queued since the
    /// last call, including ones set aside while another pass ran. Returns
    /// true if any pass moved the shared range.
    pub fn dispatch_pending(&mut self, registry: &mut PanelRegistry) -> bool {
        self.take_queued();

        let mut changed = false;
        while let Some(event) = self.backlog.pop_front() {
            if let SyncOutcome::Propagated { .. } =
                self.on_panel_range_changed(registry, event.panel, event.range)
            {
                changed = true;
            }
        }
        changed
    }

    /// Move everything already on the channel to the backlog. Called before a
    /// pass so the channel afterwards holds only that pass's echoes.
    fn take_queued(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.backlog.push_back(event);
        }
    }

    // Caller holds the Propagating state
    fn impose_on_timeseries(
        &mut self,
        registry: &mut PanelRegistry,
        skip: Option<PanelIndex>,
        range: TimeRange,
    ) -> usize {
        self.take_queued();

        let mut targets = 0;
        for (index, panel) in registry.active_panels_mut() {
            if !panel.kind.is_timeseries() || Some(index) == skip {
                continue;
            }
            if let Some(handle) = panel.renderer.as_mut() {
                handle.impose_range(range);
                targets += 1;
            }
        }

        // Echoes from the calls above hit the guard and are dropped
        while let Ok(echo) = self.rx.try_recv() {
            let outcome = self.on_panel_range_changed(registry, echo.panel, echo.range);
            debug_assert_eq!(outcome, SyncOutcome::Suppressed);
        }
        targets
    }
}
