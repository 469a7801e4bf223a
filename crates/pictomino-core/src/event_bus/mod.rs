//! # Event Bus Module
//!
//! Publish/subscribe fan-out for engine events. A puzzle session owns one
//! bus and publishes into it; hosts subscribe with filters or drain a
//! broadcast receiver.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pictomino_core::event_bus::{EventBus, EventCategory, EventFilter};
//! use pictomino_core::PuzzleEvent;
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to progress events
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Progress]),
//!     |event| {
//!         if let PuzzleEvent::Progress(p) = event {
//!             println!("progress: {:?}", p);
//!         }
//!     },
//! );
//!
//! // Unsubscribe when done
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
