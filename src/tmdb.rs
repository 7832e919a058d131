use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::debug;
use wreq::header::ACCEPT;

use crate::{
    error::{AppError, AppResult},
    models::NewMovie,
};

pub struct TmdbClient {
    client: wreq::Client,
    access_token: String,
    base_url: String,
    image_base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: wreq::Client,
        access_token: String,
        base_url: String,
        image_base_url: String,
        rps: u32,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN),
        )));
        Self { client, access_token, base_url, image_base_url, limiter }
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Searches by title. An empty result list is not an error.
    pub async fn search_movie(&self, title: &str) -> AppResult<Vec<SearchResult>> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .query(&[
                ("query", title),
                ("include_adult", "true"),
                ("language", "en-US"),
                ("page", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(query = %title, results = resp.results.len(), "searched TMDB");
        Ok(resp.results)
    }

    /// Looks up a movie by its TMDB id. The id is passed through as given, so
    /// an id TMDB does not recognise fails upstream like any unknown movie.
    pub async fn movie_details(&self, tmdb_id: &str) -> AppResult<MovieDetails> {
        self.limiter.until_ready().await;

        let url = format!(
            "{}/movie/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(tmdb_id)
        );
        let details: MovieDetails = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .query(&[("language", "en-US")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(tmdb_id = %tmdb_id, title = %details.title, "fetched TMDB details");
        Ok(details)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl SearchResult {
    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(year_from_release_date)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieDetails {
    /// Maps the TMDB payload onto the stored shape. The year is the leading
    /// component of `release_date`; a movie without one cannot be stored.
    pub fn into_new_movie(self, image_base_url: &str) -> AppResult<NewMovie> {
        let year = self.release_date.as_deref().and_then(year_from_release_date).ok_or_else(|| {
            AppError::UpstreamPayload(format!("\"{}\" has no release date", self.title))
        })?;

        let image_url = match self.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{image_base_url}{path}"),
            _ => String::new(),
        };

        Ok(NewMovie {
            title: self.title,
            year,
            description: self.overview.unwrap_or_default(),
            image_url,
        })
    }
}

/// `"1999-10-15"` -> `1999`.
pub fn year_from_release_date(date: &str) -> Option<i32> {
    date.split('-').next().map(str::trim).filter(|s| !s.is_empty())?.parse().ok()
}
