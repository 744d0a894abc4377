/// In-process stand-in for the TMDB movie search endpoint
use serde_json::{json, Value};
use std::collections::HashMap;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const SEARCH_PATH: &str = "/3/search/movie";
pub const VALID_TOKEN: &str = "fake-tmdb-token";
pub const PAGE_SIZE: usize = 20;
pub const MAX_PAGE: u32 = 500;

#[derive(Debug, Clone)]
pub struct FakeMovie {
    pub id: u64,
    pub title: String,
    pub release_date: String,
    pub original_language: String,
    pub adult: bool,
}

/// Catalog of 45 "Titanic" titles plus one unique title.
///
/// Every third title was released in 2016.
pub fn titanic_catalog() -> Vec<FakeMovie> {
    let mut movies: Vec<FakeMovie> = (0..45u64)
        .map(|i| FakeMovie {
            id: 1000 + i,
            title: if i == 0 {
                "Titanic".to_string()
            } else {
                format!("Titanic {}", i)
            },
            release_date: if i % 3 == 0 {
                format!("2016-{:02}-14", i % 12 + 1)
            } else {
                "1997-11-18".to_string()
            },
            original_language: "en".to_string(),
            adult: false,
        })
        .collect();

    movies.push(FakeMovie {
        id: 2000,
        title: "Saving the Titanic".to_string(),
        release_date: "2012-04-15".to_string(),
        original_language: "en".to_string(),
        adult: false,
    });
    movies
}

/// Answers searches the way the real API does for the behaviours the suite
/// checks. The switches break one behaviour each.
#[derive(Debug, Clone)]
pub struct FakeTmdb {
    catalog: Vec<FakeMovie>,
    accept_missing_key: bool,
    total_results_offset: u32,
}

impl Default for FakeTmdb {
    fn default() -> Self {
        Self {
            catalog: titanic_catalog(),
            accept_missing_key: false,
            total_results_offset: 0,
        }
    }
}

impl FakeTmdb {
    /// Serve requests that carry no api_key at all
    pub fn accept_missing_key(mut self) -> Self {
        self.accept_missing_key = true;
        self
    }

    /// Report more total_results than the pages contain
    pub fn overstate_total_results(mut self, by: u32) -> Self {
        self.total_results_offset = by;
        self
    }

    pub async fn start(self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(self)
            .mount(&server)
            .await;
        server
    }

    fn matching(&self, params: &HashMap<String, String>) -> Vec<&FakeMovie> {
        let query = params
            .get("query")
            .map(|q| q.trim().to_lowercase())
            .unwrap_or_default();
        if query.is_empty() {
            return Vec::new();
        }
        let include_adult = params.get("include_adult").map(String::as_str) == Some("true");
        let year = params
            .get("primary_release_year")
            .or_else(|| params.get("year"))
            .cloned();

        self.catalog
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&query))
            .filter(|movie| include_adult || !movie.adult)
            .filter(|movie| match &year {
                Some(year) => movie.release_date.starts_with(year.as_str()),
                None => true,
            })
            .collect()
    }
}

fn status_error(status: u16, code: u32, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "status_code": code,
        "status_message": message,
        "success": false
    }))
}

fn movie_json(movie: &FakeMovie) -> Value {
    json!({
        "id": movie.id,
        "title": movie.title,
        "original_title": movie.title,
        "adult": movie.adult,
        "release_date": movie.release_date,
        "original_language": movie.original_language,
        "overview": "",
        "popularity": 12.5,
        "vote_average": 7.1,
        "vote_count": 320,
        "genre_ids": [18, 10749]
    })
}

impl Respond for FakeTmdb {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if request.url.path() != SEARCH_PATH {
            return status_error(404, 34, "The resource you requested could not be found.");
        }

        let params: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        match params.get("api_key").map(String::as_str) {
            Some(VALID_TOKEN) => {}
            None if self.accept_missing_key => {}
            _ => return status_error(401, 7, "Invalid API key: You must be granted a valid key."),
        }

        let page = match params.get("page") {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(page) if (1..=MAX_PAGE).contains(&page) => page,
                _ => {
                    return ResponseTemplate::new(422).set_body_json(json!({
                        "errors": ["page must be less than or equal to 500"]
                    }))
                }
            },
        };

        let matches = self.matching(&params);
        let total_results = matches.len();
        let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
        let results: Vec<Value> = matches
            .iter()
            .skip((page as usize - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|movie| movie_json(movie))
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "page": page,
            "results": results,
            "total_pages": total_pages,
            "total_results": total_results as u32 + self.total_results_offset
        }))
    }
}
