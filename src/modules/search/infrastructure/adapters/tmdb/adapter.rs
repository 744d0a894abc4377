use crate::{
    modules::config::SuiteConfig,
    modules::search::{
        domain::{ApiResponse, SearchApi, SearchRequest},
        infrastructure::http_client::RateLimitClient,
    },
    shared::{errors::AppResult, utils::mask_secret},
};
use async_trait::async_trait;

/// TMDB (The Movie Database) movie-search adapter over REST
pub struct TmdbSearchAdapter {
    http_client: RateLimitClient,
    base_url: String,
}

impl TmdbSearchAdapter {
    /// Create an adapter for the configured search url
    pub fn new(config: &SuiteConfig) -> AppResult<Self> {
        Ok(Self::with_client(
            RateLimitClient::for_tmdb(&config.http)?,
            config.base_url.clone(),
        ))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build URL with percent-encoded query parameters
    pub fn build_url(&self, resource: Option<&str>, request: &SearchRequest) -> String {
        let mut url = self.base_url.trim_end_matches('/').to_string();
        if let Some(resource) = resource {
            url.push('/');
            url.push_str(resource.trim_start_matches('/'));
        }

        for (index, (key, value)) in request.to_query_params().iter().enumerate() {
            let separator = if index == 0 && !url.contains('?') { '?' } else { '&' };
            url.push(separator);
            url.push_str(&format!("{}={}", key, urlencoding::encode(value)));
        }
        url
    }

    async fn fetch(
        &self,
        resource: Option<&str>,
        request: &SearchRequest,
    ) -> AppResult<ApiResponse> {
        let url = self.build_url(resource, request);

        log::debug!("TMDB: GET {}", redact_api_key(&url));

        let response = self.http_client.get(&url).await?;

        log::info!(
            "TMDB: query {:?} page {} -> {}",
            request.query.as_deref().unwrap_or(""),
            request.page.map_or_else(|| "-".to_string(), |p| p.to_string()),
            response.status
        );
        Ok(response)
    }

}

/// Mask the value of the `api_key` query parameter, leaving the rest of the url intact
fn redact_api_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let query: Vec<String> = query
        .split('&')
        .map(|pair| match pair.strip_prefix("api_key=") {
            Some(key) => {
                let key = urlencoding::decode(key)
                    .map_or_else(|_| key.to_string(), |k| k.into_owned());
                format!("api_key={}", mask_secret(&key))
            }
            None => pair.to_string(),
        })
        .collect();
    format!("{}?{}", base, query.join("&"))
}

#[async_trait]
impl SearchApi for TmdbSearchAdapter {
    async fn search(&self, request: &SearchRequest) -> AppResult<ApiResponse> {
        self.fetch(None, request).await
    }

    async fn get_resource(
        &self,
        resource: &str,
        request: &SearchRequest,
    ) -> AppResult<ApiResponse> {
        self.fetch(Some(resource), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::HttpSettings;

    const BASE_URL: &str = "https://api.themoviedb.org/3/search/movie";

    fn adapter() -> TmdbSearchAdapter {
        let client = RateLimitClient::for_tmdb(&HttpSettings::default()).unwrap();
        TmdbSearchAdapter::with_client(client, BASE_URL)
    }

    #[test]
    fn test_adapter_creation() {
        let adapter = adapter();
        assert_eq!(adapter.base_url(), BASE_URL);
    }

    #[test]
    fn test_build_url_encodes_values() {
        let request = SearchRequest::new("key", " Saving the Titanic ").page(1);
        assert_eq!(
            adapter().build_url(None, &request),
            format!("{}?api_key=key&query=%20Saving%20the%20Titanic%20&page=1", BASE_URL)
        );
    }

    #[test]
    fn test_build_url_with_resource() {
        let request = SearchRequest::new("key", "Titanic");
        assert_eq!(
            adapter().build_url(Some("/nonexistent_resource"), &request),
            format!("{}/nonexistent_resource?api_key=key&query=Titanic", BASE_URL)
        );
    }

    #[test]
    fn test_build_url_keeps_existing_query_string() {
        let client = RateLimitClient::for_tmdb(&HttpSettings::default()).unwrap();
        let adapter = TmdbSearchAdapter::with_client(client, format!("{}?region=US", BASE_URL));
        let request = SearchRequest::new("key", "Titanic");
        assert_eq!(
            adapter.build_url(None, &request),
            format!("{}?region=US&api_key=key&query=Titanic", BASE_URL)
        );
    }

    #[test]
    fn test_redact_masks_api_key() {
        let adapter = adapter();
        let request = SearchRequest::new("14a032abcf1763ff", "Titanic");
        let url = adapter.build_url(None, &request);
        let redacted = redact_api_key(&url);
        assert!(!redacted.contains("14a032abcf1763ff"));
        assert!(redacted.contains("api_key=****63ff"));
    }

    #[test]
    fn test_redact_leaves_host_and_query_alone() {
        let client = RateLimitClient::for_tmdb(&HttpSettings::default()).unwrap();
        let adapter = TmdbSearchAdapter::with_client(client, "https://tt.example/3/search/movie");
        let request = SearchRequest::new("tt", "Titanic");
        let url = adapter.build_url(None, &request);

        assert_eq!(
            redact_api_key(&url),
            "https://tt.example/3/search/movie?api_key=****&query=Titanic"
        );
    }

    #[test]
    fn test_redact_without_query_string() {
        assert_eq!(redact_api_key(BASE_URL), BASE_URL);
    }
}
