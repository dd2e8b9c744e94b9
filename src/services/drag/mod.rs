//! Drag-to-move controller.
//!
//! [`DragManager`] owns the transient state of one drag gesture, debounces
//! pointer samples into drop proposals, and runs the edge-dwell timer used
//! for auto-paging. Hosts subscribe with [`DragManager::add_listener`] and
//! repaint from the state snapshot they are handed.
//!
//! All calls happen on one logical thread. The handle is cheap to clone, so a
//! listener may capture one and call back into the manager; no internal
//! borrow is held while listeners or validators run.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::NaiveDate;

use crate::models::drag::{DragState, EdgeSide, HighlightCellInfo};
use crate::models::event::TimedEvent;
use crate::models::geometry::Point;
use crate::models::settings::DragSettings;
use crate::utils::date::day_delta;

pub mod geometry;
pub mod timer;

pub use geometry::{
    resolve_drop_target, DragMoveRequest, DropProposal, DropTargetError, DropValidator,
    GridFns, MonthGridLayout, WeekGrid, WeekRowLayout,
};
pub use timer::{ManualScheduler, TimerHandle, TimerScheduler, TokioScheduler};

pub type ListenerId = u64;

type Listener = Rc<dyn Fn(&DragState)>;

#[derive(Default)]
struct DragInner {
    state: DragState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
    debounce_timer: Option<TimerHandle>,
    pending_move: Option<DragMoveRequest>,
    edge_timer: Option<TimerHandle>,
    /// Bumped whenever a drag starts or ends
    generation: u64,
    disposed: bool,
}

impl DragInner {
    fn cancel_timers(&mut self) {
        if let Some(timer) = self.debounce_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = self.edge_timer.take() {
            timer.cancel();
        }
        self.pending_move = None;
    }

    fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[derive(Clone)]
pub struct DragManager {
    inner: Rc<RefCell<DragInner>>,
    scheduler: Rc<dyn TimerScheduler>,
    settings: DragSettings,
}

impl DragManager {
    pub fn new(scheduler: Rc<dyn TimerScheduler>) -> Self {
        Self::with_settings(scheduler, DragSettings::default())
    }

    pub fn with_settings(scheduler: Rc<dyn TimerScheduler>, settings: DragSettings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DragInner::default())),
            scheduler,
            settings,
        }
    }

    pub fn settings(&self) -> DragSettings {
        self.settings
    }

    // ── Listeners ───────────────────────────────────────────────────────

    pub fn add_listener(&self, listener: impl Fn(&DragState) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    // ── State accessors ─────────────────────────────────────────────────

    /// Snapshot of the full state
    pub fn state(&self) -> DragState {
        self.inner.borrow().state.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().state.is_dragging
    }

    pub fn dragged_event(&self) -> Option<TimedEvent> {
        self.inner.borrow().state.dragged_event
    }

    pub fn source_date(&self) -> Option<NaiveDate> {
        self.inner.borrow().state.source_date
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        self.inner.borrow().state.target_date
    }

    pub fn is_valid_target(&self) -> bool {
        self.inner.borrow().state.is_valid_target
    }

    pub fn drag_position(&self) -> Option<Point> {
        self.inner.borrow().state.drag_position
    }

    pub fn highlighted_cells(&self) -> Vec<HighlightCellInfo> {
        self.inner.borrow().state.highlighted_cells.clone()
    }

    pub fn proposed_start_date(&self) -> Option<NaiveDate> {
        self.inner.borrow().state.proposed_start_date
    }

    pub fn proposed_end_date(&self) -> Option<NaiveDate> {
        self.inner.borrow().state.proposed_end_date
    }

    pub fn is_proposed_drop_valid(&self) -> bool {
        self.inner.borrow().state.is_proposed_drop_valid
    }

    pub fn has_pending_edge_timer(&self) -> bool {
        self.inner
            .borrow()
            .edge_timer
            .as_ref()
            .is_some_and(TimerHandle::is_pending)
    }

    pub fn has_pending_move(&self) -> bool {
        self.inner.borrow().pending_move.is_some()
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Begin dragging `event` from `source_date`, replacing any drag in progress.
    pub fn start_drag(&self, event: TimedEvent, source_date: NaiveDate) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                log::warn!("start_drag on a disposed drag manager ignored");
                return;
            }
            if inner.state.is_dragging {
                log::debug!("replacing active drag of event {:?}", inner.state.dragged_event.map(|e| e.id));
            }
            inner.cancel_timers();
            inner.next_generation();
            inner.state = DragState::started(event, source_date);
        }
        log::debug!("drag started: event {:?} from {}", event.id, source_date);
        notify(&self.inner);
    }

    /// Record the date cell the host reports under the pointer.
    ///
    /// Listeners are only notified when one of the three values changed.
    pub fn update_drag(&self, target_date: NaiveDate, is_valid: bool, position: Point) {
        {
            let mut inner = self.inner.borrow_mut();
            let state = &mut inner.state;
            if !state.is_dragging {
                return;
            }
            let unchanged = state.target_date == Some(target_date)
                && state.is_valid_target == is_valid
                && state.drag_position == Some(position);
            if unchanged {
                return;
            }
            state.target_date = Some(target_date);
            state.is_valid_target = is_valid;
            state.drag_position = Some(position);
        }
        notify(&self.inner);
    }

    /// Whole days between the source and target dates (0 when idle)
    pub fn calculate_day_delta(&self) -> i64 {
        let inner = self.inner.borrow();
        let state = &inner.state;
        if !state.is_dragging {
            return 0;
        }
        match (state.source_date, state.target_date) {
            (Some(source), Some(target)) => day_delta(source, target),
            _ => 0,
        }
    }

    /// Finish the drag. Returns the target date if it was last marked valid.
    ///
    /// The state is cleared either way.
    pub fn complete_drag(&self) -> Option<NaiveDate> {
        let result = {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.is_dragging {
                return None;
            }
            let state = std::mem::take(&mut inner.state);
            inner.cancel_timers();
            inner.next_generation();
            state.is_valid_target.then_some(state.target_date).flatten()
        };
        log::debug!("drag completed with target {:?}", result);
        notify(&self.inner);
        result
    }

    /// Abandon the drag. Idle calls are silent.
    pub fn cancel_drag(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            let was_dragging = inner.state.is_dragging;
            inner.cancel_timers();
            inner.next_generation();
            inner.state = DragState::default();
            if !was_dragging {
                return;
            }
        }
        log::debug!("drag cancelled");
        notify(&self.inner);
    }

    /// Cancel every timer and drop all listeners. Safe to call repeatedly.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.cancel_timers();
        inner.next_generation();
        inner.state = DragState::default();
        inner.listeners.clear();
        inner.disposed = true;
        log::debug!("drag manager disposed");
    }

    // ── Edge paging ─────────────────────────────────────────────────────

    /// Start, keep or cancel the edge-dwell timer.
    ///
    /// While `near_edge` stays true the first timer runs to completion; repeat
    /// calls do not restart it. `on_fire` runs at most once per timer.
    pub fn handle_edge_proximity(
        &self,
        near_edge: bool,
        is_left_edge: bool,
        on_fire: impl FnOnce(EdgeSide) + 'static,
    ) {
        let mut inner = self.inner.borrow_mut();
        if !inner.state.is_dragging {
            return;
        }

        if !near_edge {
            if let Some(timer) = inner.edge_timer.take() {
                if timer.cancel() {
                    log::trace!("edge dwell timer cancelled");
                }
            }
            return;
        }

        if inner.edge_timer.as_ref().is_some_and(TimerHandle::is_pending) {
            return;
        }

        let side = EdgeSide::from_is_left(is_left_edge);
        let weak = Rc::downgrade(&self.inner);
        let timer = self.scheduler.schedule(
            self.settings.edge_dwell(),
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                {
                    let mut inner = inner.borrow_mut();
                    inner.edge_timer = None;
                    if !inner.state.is_dragging {
                        return;
                    }
                }
                log::debug!("edge dwell elapsed on {:?} edge", side);
                on_fire(side);
            }),
        );
        inner.edge_timer = Some(timer);
    }

    // ── Pointer moves ───────────────────────────────────────────────────

    /// Queue a pointer sample. Samples arriving within one debounce window are
    /// coalesced; only the latest is resolved when the window closes.
    pub fn handle_drag_move(&self, request: DragMoveRequest) {
        let mut inner = self.inner.borrow_mut();
        if !inner.state.is_dragging {
            return;
        }

        inner.pending_move = Some(request);
        if inner.debounce_timer.as_ref().is_some_and(TimerHandle::is_pending) {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let timer = self.scheduler.schedule(
            self.settings.debounce(),
            Box::new(move || flush_pending_move(&weak)),
        );
        inner.debounce_timer = Some(timer);
    }

    /// Drop the proposed span (e.g. when the pointer leaves the grid)
    pub fn clear_highlighted_cells(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.has_proposal() {
                return;
            }
            inner.state.clear_proposal();
        }
        notify(&self.inner);
    }
}

/// Resolve the latest queued pointer sample and publish the result
fn flush_pending_move(weak: &Weak<RefCell<DragInner>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };

    let (request, generation) = {
        let mut guard = inner.borrow_mut();
        guard.debounce_timer = None;
        if !guard.state.is_dragging {
            guard.pending_move = None;
            return;
        }
        match guard.pending_move.take() {
            Some(request) => (request, guard.generation),
            None => return,
        }
    };

    let proposal = match resolve_drop_target(&request) {
        Ok(proposal) => proposal,
        Err(err) if err.is_contract_violation() => {
            log::warn!("drag move ignored: {}", err);
            return;
        }
        Err(err) => {
            log::debug!("drag move ignored: {}", err);
            return;
        }
    };

    let is_valid = request
        .validator
        .as_ref()
        .map_or(true, |validate| validate(proposal.start_date, proposal.end_date));

    {
        let mut guard = inner.borrow_mut();
        // A validator may have ended the drag or started another one
        if guard.generation != generation || !guard.state.is_dragging {
            log::trace!("drag changed while resolving a move; proposal dropped");
            return;
        }
        let state = &mut guard.state;
        let unchanged = state.highlighted_cells == proposal.highlighted_cells
            && state.proposed_start_date == Some(proposal.start_date)
            && state.proposed_end_date == Some(proposal.end_date)
            && state.is_proposed_drop_valid == is_valid;
        if unchanged {
            log::trace!("drag move resolved to the same span; skipping repaint");
            return;
        }
        log::trace!(
            "drop proposal {} .. {} (row {}, cell {}, valid {})",
            proposal.start_date,
            proposal.end_date,
            proposal.week_row_index,
            proposal.cell_index,
            is_valid
        );
        state.highlighted_cells = proposal.highlighted_cells;
        state.proposed_start_date = Some(proposal.start_date);
        state.proposed_end_date = Some(proposal.end_date);
        state.is_proposed_drop_valid = is_valid;
    }
    notify(&inner);
}

/// Call every listener with a snapshot; no borrow is held while they run
fn notify(inner: &Rc<RefCell<DragInner>>) {
    let (listeners, snapshot) = {
        let guard = inner.borrow();
        let listeners: Vec<Listener> = guard
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        (listeners, guard.state.clone())
    };
    for listener in listeners {
        listener(&snapshot);
    }
}
