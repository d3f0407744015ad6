use crate::store::StoreId;

/// Store-scoped API location shown to operators, e.g.
/// `http://localhost:3000/api/abc123`.
pub fn api_url(origin: &str, store_id: &StoreId) -> String {
    format!("{}/api/{}", origin.trim_end_matches('/'), store_id)
}
