//! Message types for the layout actor.
//!
//! Commands flow into the actor; events flow out.

use crate::error::FlowError;
use crate::flow::{FlowRegistry, LayoutUpdate};
use bitflags::bitflags;

bitflags! {
    /// Why a layout pass was requested.
    ///
    /// Triggers that arrive together are OR-ed into one pass.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlowTrigger: u8 {
        /// The host finished loading.
        const READY = 0b0000_0001;
        /// Flow content was added, removed or edited.
        const CONTENT = 0b0000_0010;
        /// Regions were added, removed, shown or hidden.
        const REGIONS = 0b0000_0100;
        /// A region changed size.
        const RESIZE = 0b0000_1000;
    }
}

impl std::fmt::Debug for FlowTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A change applied to the registry on the actor thread.
///
/// Returns the triggers the change warrants; empty means no pass.
pub type RegistryEdit<R> = Box<dyn FnOnce(&mut FlowRegistry<R>) -> FlowTrigger + Send>;

/// Commands sent to the layout actor.
pub enum LayoutCommand<R> {
    /// Request a layout pass.
    Trigger(FlowTrigger),
    /// Edit the registry, then lay out if the edit asks for it.
    Edit(RegistryEdit<R>),
    /// Stop after finishing pending work.
    Shutdown,
}

impl<R> std::fmt::Debug for LayoutCommand<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trigger(trigger) => f.debug_tuple("Trigger").field(trigger).finish(),
            Self::Edit(_) => f.write_str("Edit(..)"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Events published by the layout actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// A flow finished a pass.
    Updated(LayoutUpdate),
    /// A flow's pass failed; that flow keeps its previous results.
    Failed {
        /// Name of the flow.
        flow: String,
        /// Why its pass was abandoned.
        error: FlowError,
    },
    /// Every flow was laid out for the coalesced triggers.
    Completed {
        /// Triggers served by this pass.
        trigger: FlowTrigger,
        /// Number of `Updated` events published for it.
        updates: usize,
        /// Number of `Failed` events published for it.
        failures: usize,
    },
}
