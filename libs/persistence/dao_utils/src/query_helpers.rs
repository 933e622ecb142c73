// Type aliases for PostgreSQL parameter types
pub type PgParam = dyn tokio_postgres::types::ToSql + Sync;
pub type PgSendParam = dyn tokio_postgres::types::ToSql + Sync + Send;
pub type PgParamBox = Box<PgSendParam>;
pub type PgParamVec = Vec<PgParamBox>;

/// Borrow boxed parameters in the shape `Client::query` expects
pub fn param_refs(params: &[PgParamBox]) -> Vec<&PgParam> {
    params.iter().map(|p| p.as_ref() as &PgParam).collect()
}

/// Escape LIKE/ILIKE wildcards so user text matches literally.
/// Pair with `ESCAPE '\'` in the SQL.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `%text%` with wildcards in `text` escaped
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain_text() {
        assert_eq!(escape_like("park"), "park");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("City Park"), "%City Park%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
    }

    #[test]
    fn test_param_refs_keeps_order() {
        let params: PgParamVec = vec![Box::new(1_i64), Box::new("x".to_string())];
        assert_eq!(param_refs(&params).len(), 2);
    }
}
