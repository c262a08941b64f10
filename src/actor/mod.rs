//! Actor Model: Layout passes on a dedicated thread.
//!
//! The registry lives on the layout thread. Everything else talks to it
//! through crossbeam channels:
//!
//! ```text
//! ┌──────────────┐  LayoutCommand   ┌──────────────┐
//! │    Caller    │ ───────────────▶ │ Layout Thread│
//! │              │ ◀─────────────── │ FlowRegistry │
//! └──────────────┘   LayoutEvent    └──────────────┘
//! ```

mod layout_actor;
mod messages;

pub use layout_actor::{ActorConfig, LayoutActor};
pub use messages::{FlowTrigger, LayoutCommand, LayoutEvent, RegistryEdit};
