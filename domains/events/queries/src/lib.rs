pub mod feed;
pub mod get_event;
pub mod local_events;
pub mod ordering;

pub use feed::{FeedPlan, FeedQuery, SortBy, is_truthy};
pub use get_event::GetEventQuery;
pub use local_events::LocalEventsQuery;
pub use ordering::{compare_titles, sort_events};
