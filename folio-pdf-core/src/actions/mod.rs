//! Actions and destinations (ISO 32000-1 Sections 12.3.2 and 12.6)
//!
//! [`Action`] and [`Destination`] build new objects. [`ActionView`] edits an
//! action dictionary already in the graph.

mod action;
mod destination;
mod view;

pub use action::{Action, ActionKind, ActionType};
pub use destination::{Destination, DestinationType, PageDestination};
pub use view::ActionView;
