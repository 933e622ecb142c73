pub mod events;

pub use events::{Event, EventSource, NewEvent};
