//! Layout Actor: Dedicated thread that owns the flow registry.
//!
//! Callers send triggers and edits over a bounded channel. The actor drains
//! everything pending, applies the edits in order, and runs a single layout
//! pass for the combined triggers. Passes therefore never overlap, and a
//! burst of triggers costs one pass.

use super::messages::{FlowTrigger, LayoutCommand, LayoutEvent};
use crate::error::FlowError;
use crate::flow::{FlowFailure, FlowRegistry};
use crate::layout::Region;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the layout actor.
#[derive(Debug, Clone)]
pub struct ActorConfig {
    /// Commands that may queue before senders block.
    pub command_capacity: usize,
    /// Events that may queue before new ones are dropped.
    pub event_capacity: usize,
    /// How long the loop waits for a command before rechecking shutdown.
    pub idle_timeout: Duration,
    /// Name of the actor thread.
    pub thread_name: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            command_capacity: 64,
            event_capacity: 256,
            idle_timeout: Duration::from_millis(16),
            thread_name: "flywheel-layout".to_string(),
        }
    }
}

/// Commands drained in one batch.
#[derive(Debug, Default, PartialEq, Eq)]
struct Batch {
    trigger: FlowTrigger,
    shutdown: bool,
}

/// Handle to the layout thread.
pub struct LayoutActor<R> {
    /// Handle to the layout thread; yields the registry back on join.
    handle: Option<JoinHandle<FlowRegistry<R>>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Command sender.
    command_tx: Sender<LayoutCommand<R>>,
    /// Event receiver.
    event_rx: Receiver<LayoutEvent>,
}

impl<R: Region + Send + 'static> LayoutActor<R> {
    /// Move `registry` onto a new layout thread.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the layout thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn(registry: FlowRegistry<R>, config: ActorConfig) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let (command_tx, command_rx) = bounded(config.command_capacity);
        let (event_tx, event_rx) = bounded(config.event_capacity);
        let idle_timeout = config.idle_timeout;

        let handle = thread::Builder::new()
            .name(config.thread_name)
            .spawn(move || {
                let mut registry = registry;
                Self::run_loop(
                    &mut registry,
                    &command_rx,
                    &event_tx,
                    &shutdown_clone,
                    idle_timeout,
                );
                registry
            })
            .expect("Failed to spawn layout thread");

        Self {
            handle: Some(handle),
            shutdown,
            command_tx,
            event_rx,
        }
    }

    /// Request a layout pass.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Disconnected`] if the actor has stopped.
    pub fn trigger(&self, trigger: FlowTrigger) -> Result<(), FlowError> {
        self.send(LayoutCommand::Trigger(trigger))
    }

    /// Run `edit` against the registry on the actor thread.
    ///
    /// The triggers it returns are coalesced with any others pending.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Disconnected`] if the actor has stopped.
    pub fn edit<F>(&self, edit: F) -> Result<(), FlowError>
    where
        F: FnOnce(&mut FlowRegistry<R>) -> FlowTrigger + Send + 'static,
    {
        self.send(LayoutCommand::Edit(Box::new(edit)))
    }

    /// Get a reference to the event receiver.
    #[inline]
    pub const fn events(&self) -> &Receiver<LayoutEvent> {
        &self.event_rx
    }

    /// Signal the actor to stop once pending commands are handled.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.command_tx.try_send(LayoutCommand::Shutdown);
    }

    /// Stop the actor and take the registry back.
    ///
    /// Returns `None` if the layout thread panicked.
    pub fn join(mut self) -> Option<FlowRegistry<R>> {
        self.shutdown();
        self.handle.take().and_then(|handle| handle.join().ok())
    }

    fn send(&self, command: LayoutCommand<R>) -> Result<(), FlowError> {
        self.command_tx
            .send(command)
            .map_err(|_| FlowError::Disconnected)
    }

    /// Main layout loop.
    fn run_loop(
        registry: &mut FlowRegistry<R>,
        commands: &Receiver<LayoutCommand<R>>,
        events: &Sender<LayoutEvent>,
        shutdown: &Arc<AtomicBool>,
        idle_timeout: Duration,
    ) {
        loop {
            let first = match commands.recv_timeout(idle_timeout) {
                Ok(command) => command,
                Err(RecvTimeoutError::Timeout) => {
                    if shutdown.load(Ordering::Relaxed) {
                        break;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            };

            let batch = Self::drain(first, commands, registry);
            if !batch.trigger.is_empty() {
                Self::publish(registry, batch.trigger, events);
            }
            if batch.shutdown {
                break;
            }
        }
        debug!("layout actor stopped");
    }

    /// Apply `first` and every command already queued behind it.
    fn drain(
        first: LayoutCommand<R>,
        commands: &Receiver<LayoutCommand<R>>,
        registry: &mut FlowRegistry<R>,
    ) -> Batch {
        let mut batch = Batch::default();
        let mut next = Some(first);

        while let Some(command) = next {
            match command {
                LayoutCommand::Trigger(trigger) => batch.trigger |= trigger,
                LayoutCommand::Edit(edit) => batch.trigger |= edit(registry),
                LayoutCommand::Shutdown => {
                    batch.shutdown = true;
                    break;
                }
            }
            next = commands.try_recv().ok();
        }
        batch
    }

    /// Run one pass and publish its results.
    fn publish(registry: &mut FlowRegistry<R>, trigger: FlowTrigger, events: &Sender<LayoutEvent>) {
        debug!(?trigger, flows = registry.len(), "layout triggered");

        let outcome = registry.do_layout();
        let updates = outcome.updates.len();
        let failures = outcome.failures.len();

        for update in outcome.updates {
            Self::emit(events, LayoutEvent::Updated(update));
        }
        for FlowFailure { flow, error } in outcome.failures {
            Self::emit(events, LayoutEvent::Failed { flow, error });
        }
        Self::emit(
            events,
            LayoutEvent::Completed {
                trigger,
                updates,
                failures,
            },
        );
    }

    /// Non-blocking send; a full queue drops the event.
    fn emit(events: &Sender<LayoutEvent>, event: LayoutEvent) {
        if let Err(TrySendError::Full(event)) = events.try_send(event) {
            warn!(?event, "event queue full, dropping layout event");
        }
    }
}

impl<R> Drop for LayoutActor<R> {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentNode;
    use crate::flow::testing::{words, CapacityRegion};
    use crate::flow::LayoutUpdate;
    use crate::layout::{ProbeError, RegionId};

    const WAIT: Duration = Duration::from_secs(2);

    fn article() -> FlowRegistry<CapacityRegion> {
        let mut registry = FlowRegistry::new();
        registry.add_content("article", ContentNode::text(words(1..=6)));
        registry.add_region("article", CapacityRegion::new(0, 3));
        registry.add_region("article", CapacityRegion::new(1, 10));
        registry
    }

    fn next_completed(actor: &LayoutActor<CapacityRegion>) -> Vec<LayoutEvent> {
        let mut seen = Vec::new();
        loop {
            let event = actor.events().recv_timeout(WAIT).unwrap();
            let done = matches!(event, LayoutEvent::Completed { .. });
            seen.push(event);
            if done {
                return seen;
            }
        }
    }

    #[test]
    fn test_trigger_publishes_updates() {
        let actor = LayoutActor::spawn(article(), ActorConfig::default());
        actor.trigger(FlowTrigger::READY).unwrap();

        let events = next_completed(&actor);
        assert_eq!(
            events,
            vec![
                LayoutEvent::Updated(LayoutUpdate {
                    flow: "article".into(),
                    overset: false,
                    first_empty_region_index: None,
                }),
                LayoutEvent::Completed {
                    trigger: FlowTrigger::READY,
                    updates: 1,
                    failures: 0,
                },
            ]
        );

        let registry = actor.join().unwrap();
        assert_eq!(registry.stats().passes, 1);
    }

    #[test]
    fn test_edit_runs_on_actor_thread() {
        let actor = LayoutActor::spawn(article(), ActorConfig::default());
        actor
            .edit(|registry| {
                registry.add_content("article", ContentNode::text(words(7..=20)));
                FlowTrigger::CONTENT
            })
            .unwrap();

        let events = next_completed(&actor);
        assert!(events.contains(&LayoutEvent::Updated(LayoutUpdate {
            flow: "article".into(),
            overset: true,
            first_empty_region_index: None,
        })));

        let registry = actor.join().unwrap();
        assert_eq!(registry.named_flow("article").unwrap().content().len(), 2);
    }

    #[test]
    fn test_edit_without_trigger_skips_pass() {
        let actor = LayoutActor::spawn(article(), ActorConfig::default());
        actor
            .edit(|registry| {
                registry.add_region("sidebar", CapacityRegion::new(9, 1));
                FlowTrigger::empty()
            })
            .unwrap();
        actor.trigger(FlowTrigger::REGIONS).unwrap();

        let events = next_completed(&actor);
        assert_eq!(
            events.last(),
            Some(&LayoutEvent::Completed {
                trigger: FlowTrigger::REGIONS,
                updates: 2,
                failures: 0,
            })
        );

        // One pass per flow, both from the single trigger.
        let registry = actor.join().unwrap();
        assert_eq!(registry.stats().passes, 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_flow_is_reported_alongside_updates() {
        let mut registry = FlowRegistry::new();
        registry.add_content("broken", ContentNode::text("x"));
        registry.add_region("broken", CapacityRegion::new(0, 1).failing_after(0));
        registry.add_content("article", ContentNode::text("y"));
        registry.add_region("article", CapacityRegion::new(1, 1));

        let actor = LayoutActor::spawn(registry, ActorConfig::default());
        actor.trigger(FlowTrigger::READY).unwrap();

        let events = next_completed(&actor);
        assert_eq!(
            events,
            vec![
                LayoutEvent::Updated(LayoutUpdate {
                    flow: "article".into(),
                    overset: false,
                    first_empty_region_index: None,
                }),
                LayoutEvent::Failed {
                    flow: "broken".into(),
                    error: FlowError::probe(
                        RegionId::new(0),
                        ProbeError::new("measurement unavailable")
                    ),
                },
                LayoutEvent::Completed {
                    trigger: FlowTrigger::READY,
                    updates: 1,
                    failures: 1,
                },
            ]
        );
        actor.join().unwrap();
    }

    #[test]
    fn test_pending_commands_coalesce() {
        let mut registry = article();
        let (tx, rx) = bounded(8);
        tx.send(LayoutCommand::Trigger(FlowTrigger::RESIZE)).unwrap();
        tx.send(LayoutCommand::Edit(Box::new(|r: &mut FlowRegistry<CapacityRegion>| {
            r.add_content("footer", ContentNode::text("fin"));
            FlowTrigger::CONTENT
        })))
        .unwrap();
        tx.send(LayoutCommand::Shutdown).unwrap();
        tx.send(LayoutCommand::Trigger(FlowTrigger::READY)).unwrap();

        let batch = LayoutActor::drain(LayoutCommand::Trigger(FlowTrigger::RESIZE), &rx, &mut registry);

        assert_eq!(
            batch,
            Batch {
                trigger: FlowTrigger::RESIZE | FlowTrigger::CONTENT,
                shutdown: true,
            }
        );
        assert_eq!(registry.len(), 2);
        // Commands after the shutdown stay queued.
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_full_event_queue_drops_events() {
        let config = ActorConfig {
            event_capacity: 1,
            ..ActorConfig::default()
        };
        let actor = LayoutActor::spawn(article(), config);
        actor.trigger(FlowTrigger::READY).unwrap();

        let registry = actor.join().unwrap();
        assert_eq!(registry.stats().passes, 1);
    }

    #[test]
    fn test_shutdown_returns_registry() {
        let actor = LayoutActor::spawn(article(), ActorConfig::default());
        actor.shutdown();
        let registry = actor.join().unwrap();
        assert_eq!(registry.stats().passes, 0);
        assert_eq!(registry.len(), 1);
    }
}
