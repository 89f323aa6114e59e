use std::mem;

use crate::cli::config::HintSettings;
use crate::controller::activation::{LinkActivation, activate_link};
use crate::controller::host::{ClickModifiers, Host};
use crate::controller::scheduler::{Scheduler, TaskHandle};
use crate::controller::session::{ActionMode, ActiveSession, DelayingSession, Phase, Session};
use crate::dom::dom_model::{DocumentSource, NodeId};
use crate::hints::hint_model::{HintMarker, Key, labeler_for};
use crate::hints::render::render_markers;
use crate::scanner::scanner::scan;
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

/// Work the controller schedules on its own clock.
enum Deferred {
    /// The resolved selection's delay is over: act and tear down
    Finish,
    /// Delayed teardown requested through `deactivate_after`
    Teardown { on_done: Option<Box<dyn FnOnce()>> },
    /// Current-tab click issued after the target was focused
    Click { node: NodeId, modifiers: ClickModifiers },
}

/// Drives one hinting episode at a time:
/// Inactive -> Building -> Active -> Delaying -> Inactive.
///
/// The document and the host are passed into every call; the controller
/// itself only keeps the session and its timers.
pub struct HintController {
    settings: HintSettings,
    session: Session,
    scheduler: Scheduler<Deferred>,
    pending_teardown: Option<TaskHandle>,
    tracer: TraceLogger,
    step: u64,
    builds: u64,
}

impl HintController {
    pub fn new(settings: HintSettings) -> Self {
        Self::with_tracer(settings, TraceLogger::disabled())
    }

    pub fn with_tracer(settings: HintSettings, tracer: TraceLogger) -> Self {
        Self {
            settings,
            session: Session::Inactive,
            scheduler: Scheduler::new(),
            pending_teardown: None,
            tracer,
            step: 0,
            builds: 0,
        }
    }

    // ---- Queries ----

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.session, Session::Inactive)
    }

    pub fn settings(&self) -> &HintSettings {
        &self.settings
    }

    pub fn markers(&self) -> &[HintMarker] {
        match &self.session {
            Session::Inactive => &[],
            Session::Active(s) => &s.markers,
            Session::Delaying(d) => &d.session.markers,
        }
    }

    /// Action mode in effect, including a held shift.
    pub fn action_mode(&self) -> Option<ActionMode> {
        match &self.session {
            Session::Inactive => None,
            Session::Active(s) => Some(s.effective_mode()),
            Session::Delaying(d) => Some(d.mode),
        }
    }

    /// The marker waiting for its delay to elapse.
    pub fn resolved(&self) -> Option<&HintMarker> {
        match &self.session {
            Session::Delaying(d) => Some(&d.resolved),
            _ => None,
        }
    }

    /// How many times markers were built (one per scan).
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_count()
    }

    // ---- Activation ----

    pub fn activate(&mut self, mode: ActionMode, doc: &dyn DocumentSource, host: &mut dyn Host) {
        // A fresh activation must never act on a stale marker.
        if let Some(task) = self.pending_teardown.take() {
            task.cancel();
        }
        self.close_session(host);

        self.log(TraceEvent::now(self.step, Phase::Building).with_mode(mode).with_decision("activate"));

        if !doc.has_root() {
            self.log(TraceEvent::now(self.step, Phase::Inactive).with_mode(mode).with_decision("abort_missing_root"));
            return;
        }

        let elements = scan(doc);
        if elements.is_empty() {
            self.log(
                TraceEvent::now(self.step, Phase::Inactive)
                    .with_mode(mode)
                    .with_decision("abort_no_candidates")
                    .with_matched(0),
            );
            return;
        }

        let mut labeler = labeler_for(
            self.settings.mode,
            &self.settings.alphabet,
            self.settings.filter_text_delay_ms,
        );
        let markers = labeler.build_markers(doc, &elements);

        host.show_status(mode.status_text());
        host.show_markers(&render_markers(&markers, labeler.as_ref(), &doc.viewport()));
        let handler = host.push_handler("link-hints");

        self.builds += 1;
        let count = markers.len();
        self.session = Session::Active(ActiveSession {
            markers,
            labeler,
            mode,
            shift_held: false,
            handler,
        });

        self.log(
            TraceEvent::now(self.step, Phase::Active)
                .with_mode(mode)
                .with_decision("markers_built")
                .with_matched(count),
        );
    }

    pub fn activate_to_open_in_new_tab(&mut self, doc: &dyn DocumentSource, host: &mut dyn Host) {
        self.activate(ActionMode::NewTab, doc, host);
    }

    pub fn activate_to_copy_link_url(&mut self, doc: &dyn DocumentSource, host: &mut dyn Host) {
        self.activate(ActionMode::CopyUrl, doc, host);
    }

    pub fn activate_with_queue(&mut self, doc: &dyn DocumentSource, host: &mut dyn Host) {
        self.activate(ActionMode::Queued, doc, host);
    }

    // ---- Deactivation ----

    /// Tear the session down now, dropping any pending selection.
    pub fn deactivate(&mut self, host: &mut dyn Host) {
        if let Some(task) = self.pending_teardown.take() {
            task.cancel();
        }
        if self.close_session(host) {
            self.log(TraceEvent::now(self.step, Phase::Inactive).with_decision("teardown"));
        }
    }

    /// Tear the session down after `delay_ms`, then run `on_done`. The
    /// returned handle cancels both; so does the next `activate`.
    pub fn deactivate_after(
        &mut self,
        delay_ms: u64,
        on_done: Option<Box<dyn FnOnce()>>,
    ) -> TaskHandle {
        if let Some(task) = self.pending_teardown.take() {
            task.cancel();
        }
        let handle = self.scheduler.schedule(delay_ms, Deferred::Teardown { on_done });
        self.pending_teardown = Some(handle.clone());
        handle
    }

    // ---- Key handling ----

    /// Returns whether the event should keep propagating.
    pub fn on_key_down(&mut self, key: &Key, doc: &dyn DocumentSource, host: &mut dyn Host) -> bool {
        self.step += 1;

        match self.session {
            Session::Inactive => return true,
            Session::Delaying(_) => {
                self.log(TraceEvent::now(self.step, Phase::Delaying).with_key(key).with_decision("swallowed"));
                return false;
            }
            Session::Active(_) => {}
        }

        match key {
            Key::Escape => {
                self.log(TraceEvent::now(self.step, Phase::Active).with_key(key).with_decision("escape"));
                self.deactivate(host);
            }
            Key::Shift => self.set_shift(true, host),
            _ => self.match_key(key, doc, host),
        }

        false
    }

    pub fn on_key_up(&mut self, key: &Key, host: &mut dyn Host) -> bool {
        match self.session {
            Session::Inactive => true,
            Session::Active(_) => {
                if *key == Key::Shift {
                    self.set_shift(false, host);
                }
                false
            }
            Session::Delaying(_) => false,
        }
    }

    fn set_shift(&mut self, held: bool, host: &mut dyn Host) {
        let session = match &mut self.session {
            Session::Active(s) => s,
            _ => return,
        };

        if !session.mode.can_toggle() || session.shift_held == held {
            return;
        }

        session.shift_held = held;
        let mode = session.effective_mode();
        host.show_status(mode.status_text());

        let decision = if held { "toggle_mode" } else { "revert_mode" };
        self.log(TraceEvent::now(self.step, Phase::Active).with_mode(mode).with_decision(decision));
    }

    fn match_key(&mut self, key: &Key, doc: &dyn DocumentSource, host: &mut dyn Host) {
        let outcome = match &mut self.session {
            Session::Active(session) => session.labeler.match_key(key, &mut session.markers),
            _ => return,
        };

        match outcome.matched.as_slice() {
            [] => {
                self.log(
                    TraceEvent::now(self.step, Phase::Active)
                        .with_key(key)
                        .with_decision("no_matches")
                        .with_matched(0),
                );
                self.deactivate(host);
            }
            [only] => {
                self.log(
                    TraceEvent::now(self.step, Phase::Active)
                        .with_key(key)
                        .with_decision("resolved")
                        .with_matched(1)
                        .with_delay(outcome.delay_ms),
                );
                self.resolve(*only, outcome.delay_ms, doc, host);
            }
            matched => {
                let count = matched.len();
                if let Session::Active(session) = &mut self.session {
                    for (i, marker) in session.markers.iter_mut().enumerate() {
                        marker.visible = matched.contains(&i);
                    }
                    host.update_markers(&render_markers(
                        &session.markers,
                        session.labeler.as_ref(),
                        &doc.viewport(),
                    ));
                }
                self.log(
                    TraceEvent::now(self.step, Phase::Active)
                        .with_key(key)
                        .with_decision("narrowed")
                        .with_matched(count),
                );
            }
        }
    }

    // ---- Resolution ----

    fn resolve(&mut self, index: usize, delay_ms: u64, doc: &dyn DocumentSource, host: &mut dyn Host) {
        let session = match mem::replace(&mut self.session, Session::Inactive) {
            Session::Active(s) => s,
            other => {
                self.session = other;
                return;
            }
        };

        let resolved = session.markers.get(index).cloned();
        let resolved = match resolved {
            Some(m) => m,
            None => {
                self.session = Session::Active(session);
                self.deactivate(host);
                return;
            }
        };

        let mode = session.effective_mode();
        let task = self.scheduler.schedule(delay_ms, Deferred::Finish);
        self.pending_teardown = Some(task.clone());
        self.session = Session::Delaying(DelayingSession {
            session,
            resolved,
            mode,
            task,
        });

        if delay_ms == 0 {
            self.advance(0, doc, host);
        }
    }

    fn finish(&mut self, doc: &dyn DocumentSource, host: &mut dyn Host) {
        let delaying = match mem::replace(&mut self.session, Session::Inactive) {
            Session::Delaying(d) => d,
            other => {
                self.session = other;
                return;
            }
        };
        self.pending_teardown = None;

        let activation = activate_link(doc, &delaying.resolved, delaying.mode, &self.settings, host);
        if let LinkActivation::ClickPending(click) = activation {
            self.scheduler.schedule(
                click.delay_ms,
                Deferred::Click {
                    node: click.node,
                    modifiers: click.modifiers,
                },
            );
        }

        self.teardown(delaying.session, host);
        self.log(TraceEvent::now(self.step, Phase::Inactive).with_mode(delaying.mode).with_decision("teardown"));

        if delaying.mode == ActionMode::Queued && activation != LinkActivation::Selected {
            self.log(TraceEvent::now(self.step, Phase::Building).with_mode(ActionMode::Queued).with_decision("requeue"));
            self.activate(ActionMode::Queued, doc, host);
        }
    }

    // ---- Timers ----

    /// Let `elapsed_ms` of virtual time pass, running every task that
    /// comes due in order.
    pub fn advance(&mut self, elapsed_ms: u64, doc: &dyn DocumentSource, host: &mut dyn Host) {
        let until = self.scheduler.now() + elapsed_ms;

        while let Some(task) = self.scheduler.pop_due(until) {
            match task {
                Deferred::Finish => self.finish(doc, host),
                Deferred::Teardown { on_done } => {
                    self.pending_teardown = None;
                    if self.close_session(host) {
                        self.log(TraceEvent::now(self.step, Phase::Inactive).with_decision("teardown"));
                    }
                    if let Some(callback) = on_done {
                        callback();
                    }
                }
                Deferred::Click { node, modifiers } => host.simulate_click(node, modifiers),
            }
        }
    }

    // ---- Teardown ----

    /// Returns false if there was no session to close.
    fn close_session(&mut self, host: &mut dyn Host) -> bool {
        match mem::replace(&mut self.session, Session::Inactive) {
            Session::Inactive => false,
            Session::Active(session) => {
                self.teardown(session, host);
                true
            }
            Session::Delaying(delaying) => {
                delaying.task.cancel();
                self.teardown(delaying.session, host);
                true
            }
        }
    }

    fn teardown(&mut self, mut session: ActiveSession, host: &mut dyn Host) {
        session.labeler.reset();
        host.remove_markers();
        host.pop_handler(session.handler);
        host.hide_status();
    }

    fn log(&self, event: TraceEvent) {
        self.tracer.log(&event);
    }
}
