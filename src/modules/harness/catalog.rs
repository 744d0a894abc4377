//! Scenario bodies.
//!
//! Each scenario issues its own requests and asserts on status codes and the
//! parsed body. Scenarios share nothing but the read-only context.

use futures::StreamExt;

use super::outcome::{
    ensure_eq, ensure_every_result, ensure_status, AssertionFailure, ScenarioError, ScenarioResult,
};
use super::scenario::{ScenarioContext, ScenarioKind};
use crate::modules::search::{pages, SearchPage, SearchRequest};
use crate::shared::errors::AppError;
use crate::shared::utils::TimedOperation;

const INVALID_API_KEY: &str = "Invalid Token";

impl ScenarioKind {
    pub async fn execute(self, ctx: &ScenarioContext<'_>) -> ScenarioResult {
        match self {
            ScenarioKind::SearchByTitle => search_by_title(ctx).await,
            ScenarioKind::SearchTrimsWhitespace => search_trims_whitespace(ctx).await,
            ScenarioKind::PaginatedResultsMatchTotal => paginated_results_match_total(ctx).await,
            ScenarioKind::AbsentTitleHasNoResults => absent_title_has_no_results(ctx).await,
            ScenarioKind::MissingApiKeyUnauthorized => {
                let request = SearchRequest::without_api_key(&ctx.fixtures().movie_name);
                expect_status(ctx, &request, 401).await
            }
            ScenarioKind::InvalidApiKeyUnauthorized => {
                let request = SearchRequest::new(INVALID_API_KEY, &ctx.fixtures().movie_name);
                expect_status(ctx, &request, 401).await
            }
            ScenarioKind::AdultFilterExcludesAdultTitles => adult_filter(ctx).await,
            ScenarioKind::ReleaseYearFilters => release_year_filters(ctx).await,
            ScenarioKind::LanguageFilter => language_filter(ctx).await,
            ScenarioKind::MinLengthQueryFillsPage => min_length_query(ctx).await,
            ScenarioKind::UnknownResourceNotFound => unknown_resource(ctx).await,
            ScenarioKind::SingleResultQuery => single_result_query(ctx).await,
            ScenarioKind::OutOfRangePageRejected => {
                let request = ctx
                    .request(&ctx.fixtures().movie_name)
                    .page(ctx.fixtures().out_of_range_page);
                expect_status(ctx, &request, 422).await
            }
            ScenarioKind::PaginationWithinSla => pagination_within_sla(ctx).await,
            ScenarioKind::RepeatedSearchIsStable => repeated_search_is_stable(ctx).await,
        }
    }
}

/// Issue `request`, require a 200 and decode the search page
async fn fetch_page(
    ctx: &ScenarioContext<'_>,
    request: &SearchRequest,
) -> Result<SearchPage, ScenarioError> {
    let response = ctx.api.search(request).await?;
    ensure_status(&response, 200)?;
    Ok(response.search_page()?)
}

async fn expect_status(
    ctx: &ScenarioContext<'_>,
    request: &SearchRequest,
    expected: u16,
) -> ScenarioResult {
    let response = ctx.api.search(request).await?;
    ensure_status(&response, expected)
}

fn ensure_titles_contain(page: &SearchPage, needle: &str) -> ScenarioResult {
    ensure_every_result(
        page,
        "result title",
        &format!("contains {:?}", needle),
        |movie| format!("{:?}", movie.title),
        |movie| movie.title.contains(needle),
    )
}

async fn search_by_title(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let movie_name = &ctx.fixtures().movie_name;
    let page = fetch_page(ctx, &ctx.request(movie_name)).await?;

    log::debug!("'{}' returned {} titles on page 1", movie_name, page.results.len());
    ensure_titles_contain(&page, movie_name)
}

async fn search_trims_whitespace(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let movie_name = ctx.fixtures().movie_name.trim();
    let padded = format!(" {} ", movie_name);
    let page = fetch_page(ctx, &ctx.request(padded)).await?;

    ensure_titles_contain(&page, movie_name)
}

/// Walk every page of `query`, returning the first page and the summed result count
async fn count_all_pages(
    ctx: &ScenarioContext<'_>,
    query: &str,
) -> Result<(SearchPage, usize), ScenarioError> {
    let first = fetch_page(ctx, &ctx.request(query)).await?;

    let mut counted = 0usize;
    let mut stream = Box::pin(pages(ctx.api, ctx.request(query), first.total_pages));
    while let Some(fetched) = stream.next().await {
        let (number, response) = fetched?;
        if response.status != 200 {
            return Err(AssertionFailure::new(
                format!("status code of page {}", number),
                "200",
                response.status.to_string(),
            )
            .into());
        }
        let page = response.search_page()?;
        counted += page.results.len();
        log::debug!("page {}: {} results (running total {})", number, page.results.len(), counted);
    }

    Ok((first, counted))
}

async fn paginated_results_match_total(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let (first, counted) = count_all_pages(ctx, &ctx.fixtures().movie_name).await?;

    ensure_eq(
        "results summed over all pages",
        first.total_results as usize,
        counted,
    )
}

async fn absent_title_has_no_results(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let page = fetch_page(ctx, &ctx.request(&ctx.fixtures().nonexisting_movie_name)).await?;
    ensure_eq("total_results", 0, page.total_results)
}

async fn adult_filter(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let request = ctx
        .request(&ctx.fixtures().movie_name)
        .page(2)
        .include_adult(true);
    let page = fetch_page(ctx, &request).await?;

    ensure_every_result(
        &page,
        "result adult flag",
        "false",
        |movie| format!("adult={}", movie.adult),
        |movie| !movie.adult,
    )
}

async fn release_year_filters(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let year = ctx.fixtures().release_year;
    let request = ctx
        .request(&ctx.fixtures().movie_name)
        .primary_release_year(year)
        .year(year);
    let page = fetch_page(ctx, &request).await?;

    let year = year.to_string();
    ensure_every_result(
        &page,
        "result release_date",
        &format!("contains {:?}", year),
        |movie| format!("{:?}", movie.release_date),
        |movie| movie.release_date.contains(&year),
    )
}

async fn language_filter(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let fixtures = ctx.fixtures();
    let request = ctx
        .request(&fixtures.movie_name)
        .language(&fixtures.language)
        .page(1)
        .year(fixtures.release_year);
    let page = fetch_page(ctx, &request).await?;

    ensure_every_result(
        &page,
        "result original_language",
        &format!("contains {:?}", fixtures.language),
        |movie| format!("{:?}", movie.original_language),
        |movie| movie.original_language.contains(&fixtures.language),
    )
}

async fn min_length_query(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let first_char = ctx
        .fixtures()
        .movie_name
        .trim()
        .chars()
        .next()
        .ok_or_else(|| AppError::InvalidInput("moviename is empty".to_string()))?;

    let page = fetch_page(ctx, &ctx.request(first_char.to_string()).page(1)).await?;
    ensure_eq("results on page 1", ctx.fixtures().page_size, page.results.len())
}

async fn unknown_resource(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let request = ctx.request(&ctx.fixtures().movie_name);
    let response = ctx
        .api
        .get_resource(&ctx.fixtures().invalid_resource, &request)
        .await?;
    ensure_status(&response, 404)
}

async fn single_result_query(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let request = ctx.request(&ctx.fixtures().single_result_movie_name).page(1);
    let page = fetch_page(ctx, &request).await?;
    ensure_eq("results on page 1", 1, page.results.len())
}

async fn pagination_within_sla(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let Some(sla) = ctx.fixtures().pagination_sla else {
        return Err(ScenarioError::Skipped(
            "no pagination_sla_ms configured".to_string(),
        ));
    };

    let timer = TimedOperation::new("fetch all pages");
    let (first, _) = count_all_pages(ctx, &ctx.fixtures().movie_name).await?;
    let elapsed = timer.finish();

    if elapsed > sla {
        return Err(AssertionFailure::new(
            format!("time to fetch {} pages", first.total_pages),
            format!("<= {}ms", sla.as_millis()),
            format!("{}ms", elapsed.as_millis()),
        )
        .into());
    }
    Ok(())
}

async fn repeated_search_is_stable(ctx: &ScenarioContext<'_>) -> ScenarioResult {
    let request = ctx.request(&ctx.fixtures().movie_name);
    let first = ctx.api.search(&request).await?;
    let second = ctx.api.search(&request).await?;

    ensure_eq("status code of repeated search", first.status, second.status)?;
    ensure_status(&first, 200)?;

    let first = first.search_page()?;
    let second = second.search_page()?;
    ensure_eq("page of repeated search", first.page, second.page)?;
    ensure_eq(
        "repeated search is empty",
        first.total_results == 0,
        second.total_results == 0,
    )
}
