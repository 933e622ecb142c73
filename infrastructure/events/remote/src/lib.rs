mod client;
mod error;
mod normalize;
mod raw;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PAGE_SIZE, RemoteEventSource,
    TicketmasterClient, TicketmasterConfig,
};
pub use error::RemoteError;
pub use normalize::{
    DEFAULT_DURATION_HOURS, MAX_DESCRIPTION_CHARS, NO_DESCRIPTION,
    UNKNOWN_LOCATION, UNTITLED, normalize,
};
pub use raw::{
    RawClassification, RawDate, RawDates, RawEmbeddedVenues, RawNamed,
    RawState, RawTicketmasterEvent, RawVenue, SearchEmbedded, SearchResponse,
};
