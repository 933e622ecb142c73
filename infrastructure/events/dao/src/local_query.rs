use dao_utils::query_helpers::{PgParamVec, contains_pattern};
use events_queries::{LocalEventsQuery, SortBy};

const SELECT_EVENTS: &str = "SELECT id, title, description, location, \
                             start_time, end_time, organizer_id, image_url, \
                             created_at FROM events";

const SEARCH_FILTER: &str = " WHERE title ILIKE $1 ESCAPE '\\' OR description \
                             ILIKE $1 ESCAPE '\\' OR location ILIKE $1 \
                             ESCAPE '\\'";

/// Parameterized SELECT for the local half of the feed
pub struct LocalEventsSql {
    pub sql: String,
    pub params: PgParamVec,
}

impl LocalEventsSql {
    pub fn build(query: &LocalEventsQuery) -> Self {
        let mut sql = String::from(SELECT_EVENTS);
        let mut params: PgParamVec = Vec::new();

        if let Some(search) = query.search.as_deref() {
            sql.push_str(SEARCH_FILTER);
            params.push(Box::new(contains_pattern(search)));
        }

        sql.push_str(match query.sort_by {
            SortBy::Name => " ORDER BY title ASC",
            SortBy::Date => " ORDER BY start_time ASC",
        });

        Self { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_search_selects_everything_by_date() {
        let built = LocalEventsSql::build(&LocalEventsQuery::default());
        assert!(!built.sql.contains("WHERE"));
        assert!(built.sql.ends_with("ORDER BY start_time ASC"));
        assert!(built.params.is_empty());
    }

    #[test]
    fn test_search_binds_a_single_parameter() {
        let query = LocalEventsQuery::new(Some("park"), SortBy::Name);
        let built = LocalEventsSql::build(&query);

        assert!(built.sql.contains("title ILIKE $1"));
        assert!(built.sql.contains("description ILIKE $1"));
        assert!(built.sql.contains("location ILIKE $1"));
        assert!(built.sql.ends_with("ORDER BY title ASC"));
        assert_eq!(built.params.len(), 1);
    }

    #[test]
    fn test_search_text_never_reaches_sql() {
        let query =
            LocalEventsQuery::new(Some("'; DROP TABLE events; --"), SortBy::Date);
        let built = LocalEventsSql::build(&query);
        assert!(!built.sql.contains("DROP"));
        assert_eq!(built.params.len(), 1);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = LocalEventsQuery::new(Some("   "), SortBy::Date);
        let built = LocalEventsSql::build(&query);
        assert!(!built.sql.contains("WHERE"));
        assert!(built.params.is_empty());
    }
}
