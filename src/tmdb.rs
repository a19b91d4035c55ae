use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{CatalogSource, ConfigurationResponse};
use crate::media::{GenreList, MediaId, MediaType};
use crate::settings::AppSettings;

const BASE_URL: &str = "https://api.themoviedb.org/3";

pub const UPCOMING_PATH: &str = "/movie/upcoming";
pub const SEARCH_PATH: &str = "/search/multi";
pub const CONFIGURATION_PATH: &str = "/configuration";

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("TMDB returned HTTP {0}")]
    Status(u16),
    #[error("TMDB rejected the API key")]
    Unauthorized,
    #[error("parse error: {0}")]
    Parse(String),
}

pub fn details_path(media_type: MediaType, id: MediaId) -> String {
    format!("/{}/{}", media_type.path(), id)
}

pub fn credits_path(media_type: MediaType, id: MediaId) -> String {
    format!("/{}/{}/credits", media_type.path(), id)
}

pub fn videos_path(media_type: MediaType, id: MediaId) -> String {
    format!("/{}/{}/videos", media_type.path(), id)
}

pub fn similar_path(media_type: MediaType, id: MediaId) -> String {
    format!("/{}/{}/similar", media_type.path(), id)
}

pub fn recommendations_path(media_type: MediaType, id: MediaId) -> String {
    format!("/{}/{}/recommendations", media_type.path(), id)
}

pub fn trending_path(window: &str) -> String {
    format!("/trending/movie/{}", window)
}

pub fn popular_path(media_type: MediaType) -> String {
    format!("/{}/popular", media_type.path())
}

pub fn top_rated_path(media_type: MediaType) -> String {
    format!("/{}/top_rated", media_type.path())
}

pub fn genre_list_path(media_type: MediaType) -> String {
    format!("/genre/{}/list", media_type.path())
}

pub fn discover_path(media_type: MediaType) -> String {
    format!("/discover/{}", media_type.path())
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            api_key,
            base_url: String::from(BASE_URL),
            language,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.api_key.clone(), settings.language.clone())
    }

    pub fn request_url(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::Network(format!("invalid request path {path}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            if !self.language.is_empty() {
                query.append_pair("language", &self.language);
            }
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn fetch_response(&self, url: reqwest::Url) -> Result<reqwest::Response, ApiError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status().as_u16() {
            401 => Err(ApiError::Unauthorized),
            s if s >= 400 => Err(ApiError::Status(s)),
            _ => Ok(response),
        }
    }

    /// GETs `path` with the credential plus `params` and decodes the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let url = self.request_url(path, params)?;
        debug!(path, ?params, "TMDB request");
        self.fetch_response(url)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    async fn configuration(&self) -> Result<ConfigurationResponse, ApiError> {
        self.get(CONFIGURATION_PATH, &[]).await
    }

    async fn genres(&self, media_type: MediaType) -> Result<GenreList, ApiError> {
        self.get(&genre_list_path(media_type), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(String::from("secret"), String::from("en-US"))
    }

    #[test]
    fn request_url_carries_key_language_and_params() {
        let params = vec![
            (String::from("query"), String::from("the thing")),
            (String::from("page"), String::from("2")),
        ];
        let url = client().request_url(SEARCH_PATH, &params).unwrap();
        assert_eq!(url.path(), "/3/search/multi");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (String::from("api_key"), String::from("secret")),
                (String::from("language"), String::from("en-US")),
                (String::from("query"), String::from("the thing")),
                (String::from("page"), String::from("2")),
            ]
        );
    }

    #[test]
    fn empty_language_is_omitted() {
        let client = TmdbClient::new(String::from("k"), String::new());
        let url = client.request_url(UPCOMING_PATH, &[]).unwrap();
        assert_eq!(url.query(), Some("api_key=k"));
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(details_path(MediaType::Tv, 1399), "/tv/1399");
        assert_eq!(credits_path(MediaType::Movie, 5), "/movie/5/credits");
        assert_eq!(videos_path(MediaType::Movie, 5), "/movie/5/videos");
        assert_eq!(similar_path(MediaType::Tv, 9), "/tv/9/similar");
        assert_eq!(recommendations_path(MediaType::Tv, 9), "/tv/9/recommendations");
        assert_eq!(trending_path("week"), "/trending/movie/week");
        assert_eq!(popular_path(MediaType::Tv), "/tv/popular");
        assert_eq!(top_rated_path(MediaType::Movie), "/movie/top_rated");
        assert_eq!(genre_list_path(MediaType::Movie), "/genre/movie/list");
        assert_eq!(discover_path(MediaType::Tv), "/discover/tv");
    }
}
