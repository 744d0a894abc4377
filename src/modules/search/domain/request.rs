/// One query against the movie-search endpoint.
///
/// Built fresh for every HTTP call. Unset optional parameters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub api_key: Option<String>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub include_adult: Option<bool>,
    pub region: Option<String>,
    pub year: Option<u32>,
    pub primary_release_year: Option<u32>,
    pub language: Option<String>,
}

impl SearchRequest {
    pub fn new(api_key: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Request with no credential at all
    pub fn without_api_key(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = Some(include);
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn primary_release_year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(ref api_key) = self.api_key {
            params.push(("api_key", api_key.clone()));
        }
        if let Some(ref query) = self.query {
            params.push(("query", query.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(include) = self.include_adult {
            params.push(("include_adult", include.to_string()));
        }
        if let Some(ref region) = self.region {
            params.push(("region", region.clone()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(year) = self.primary_release_year {
            params.push(("primary_release_year", year.to_string()));
        }
        if let Some(ref language) = self.language {
            params.push(("language", language.clone()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_params_only() {
        let request = SearchRequest::new("key", "Titanic");
        assert_eq!(
            request.to_query_params(),
            vec![("api_key", "key".to_string()), ("query", "Titanic".to_string())]
        );
    }

    #[test]
    fn test_all_optional_params() {
        let request = SearchRequest::new("key", "Titanic")
            .page(2)
            .include_adult(true)
            .region("US")
            .year(2016)
            .primary_release_year(2016)
            .language("en");

        let params = request.to_query_params();
        let names: Vec<_> = params.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "api_key",
                "query",
                "page",
                "include_adult",
                "region",
                "year",
                "primary_release_year",
                "language"
            ]
        );
        assert!(params.contains(&("include_adult", "true".to_string())));
    }

    #[test]
    fn test_without_api_key_omits_credential() {
        let params = SearchRequest::without_api_key("Titanic").to_query_params();
        assert!(params.iter().all(|(name, _)| *name != "api_key"));
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let request = SearchRequest::new("key", " Titanic ");
        assert_eq!(request.query.as_deref(), Some(" Titanic "));
    }
}
