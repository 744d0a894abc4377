/// Test helper functions and config builders
use super::fake_tmdb::{SEARCH_PATH, VALID_TOKEN};
use movie_search_suite::modules::config::Properties;
use movie_search_suite::SuiteConfig;
use std::path::Path;

/// Properties pointing the suite at `server_uri`, with fixtures matching the fake catalog
pub fn fake_properties(server_uri: &str) -> Properties {
    [
        ("token", VALID_TOKEN.to_string()),
        ("url", format!("{}{}", server_uri, SEARCH_PATH)),
        ("moviename", "Titanic".to_string()),
        ("Nonexisting_moviename", "Qwzxv Plorth Unfindable".to_string()),
        ("single_result_moviename", "Saving the Titanic".to_string()),
        ("request_timeout_secs", "5".to_string()),
        ("requests_per_second", "200".to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

pub fn fake_config(server_uri: &str) -> SuiteConfig {
    SuiteConfig::from_properties("fake", &fake_properties(server_uri), None)
        .expect("fake properties are complete")
}

/// Write `<dir>/<env>.properties` from `lines`
pub fn write_properties(dir: &Path, environment: &str, lines: &[String]) {
    let path = dir.join(format!("{}.properties", environment));
    std::fs::write(&path, lines.join("\n")).expect("write properties file");
}

/// Lines of a complete `.properties` resource for the fake at `server_uri`
pub fn fake_property_lines(server_uri: &str) -> Vec<String> {
    vec![
        "# fake environment".to_string(),
        format!("token={}", VALID_TOKEN),
        format!("url={}{}", server_uri, SEARCH_PATH),
        "moviename=Titanic".to_string(),
        "Nonexisting_moviename=Qwzxv Plorth Unfindable".to_string(),
        "requests_per_second=200".to_string(),
    ]
}
