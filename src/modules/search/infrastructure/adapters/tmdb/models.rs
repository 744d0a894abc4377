use serde::{Deserialize, Serialize};

// Response envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<MovieResult>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbError {
    pub status_code: u16,
    pub status_message: String,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Unprocessable-entity bodies carry a list of messages instead of a status_message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbValidationError {
    pub errors: Vec<String>,
}

// Core movie type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub original_language: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub popularity: Option<f32>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub genre_ids: Option<Vec<u32>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SearchPage {
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|movie| movie.title.as_str())
    }
}
