use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub index_name: String,
    pub search_limit: usize,
    pub suggest_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            index_name: std::env::var("JUICEBAR_INDEX").unwrap_or_else(|_| "juices".into()),
            search_limit: std::env::var("JUICEBAR_SEARCH_LIMIT")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(20),
            suggest_limit: std::env::var("JUICEBAR_SUGGEST_LIMIT")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(5),
        }
    }
}
