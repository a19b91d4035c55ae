//! API-derived lookup tables shared by every page: image base URLs and the
//! merged genre table. Built once by [`bootstrap`] and read-only afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::media::{Genre, GenreList, MediaType};
use crate::tmdb::ApiError;

const IMAGE_SIZE: &str = "original";

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationResponse {
    pub images: ImagesConfiguration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfiguration {
    pub secure_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfiguration {
    pub backdrop: String,
    pub poster: String,
    pub profile: String,
}

impl From<ConfigurationResponse> for ApiConfiguration {
    fn from(response: ConfigurationResponse) -> Self {
        let prefix = format!("{}{}", response.images.secure_base_url, IMAGE_SIZE);
        Self {
            backdrop: prefix.clone(),
            poster: prefix.clone(),
            profile: prefix,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreTable {
    names: HashMap<u64, String>,
}

impl GenreTable {
    /// Later lists overwrite earlier ones on id collisions.
    pub fn merged<'a>(lists: impl IntoIterator<Item = &'a [Genre]>) -> Self {
        let mut names = HashMap::new();
        for list in lists {
            for genre in list {
                names.insert(genre.id, genre.name.clone());
            }
        }
        Self { names }
    }

    pub fn name(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Resolves ids in order, skipping unknown ones.
    pub fn names_for(&self, ids: &[u64]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.name(*id)).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub config: ApiConfiguration,
    pub genres: GenreTable,
}

impl Catalog {
    pub fn poster_url(&self, path: &str) -> String {
        format!("{}{}", self.config.poster, path)
    }

    pub fn backdrop_url(&self, path: &str) -> String {
        format!("{}{}", self.config.backdrop, path)
    }

    pub fn profile_url(&self, path: &str) -> String {
        format!("{}{}", self.config.profile, path)
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn configuration(&self) -> Result<ConfigurationResponse, ApiError>;

    async fn genres(&self, media_type: MediaType) -> Result<GenreList, ApiError>;
}

/// Fetches the configuration and both genre lists together. Any failure fails
/// the whole bootstrap.
pub async fn bootstrap<S>(source: S) -> Result<Catalog, ApiError>
where
    S: CatalogSource,
{
    let (configuration, tv, movie) = tokio::try_join!(
        source.configuration(),
        source.genres(MediaType::Tv),
        source.genres(MediaType::Movie),
    )?;

    let genres = GenreTable::merged([tv.genres.as_slice(), movie.genres.as_slice()]);
    info!(genres = genres.len(), "catalog ready");

    Ok(Catalog {
        config: ApiConfiguration::from(configuration),
        genres,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: u64, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    struct FakeSource {
        fail_movie_genres: bool,
    }

    #[async_trait]
    impl CatalogSource for FakeSource {
        async fn configuration(&self) -> Result<ConfigurationResponse, ApiError> {
            Ok(ConfigurationResponse {
                images: ImagesConfiguration {
                    secure_base_url: String::from("https://image.tmdb.org/t/p/"),
                },
            })
        }

        async fn genres(&self, media_type: MediaType) -> Result<GenreList, ApiError> {
            match media_type {
                MediaType::Tv => Ok(GenreList {
                    genres: vec![genre(10759, "Action & Adventure"), genre(18, "Drama (TV)")],
                }),
                MediaType::Movie if self.fail_movie_genres => Err(ApiError::Status(503)),
                _ => Ok(GenreList {
                    genres: vec![genre(28, "Action"), genre(18, "Drama")],
                }),
            }
        }
    }

    #[test]
    fn unknown_genre_ids_are_skipped() {
        let table = GenreTable::merged([[genre(28, "Action"), genre(12, "Adventure")].as_slice()]);
        assert_eq!(table.names_for(&[28, 99]), vec!["Action"]);
    }

    #[test]
    fn configuration_prefixes_use_original_size() {
        let config = ApiConfiguration::from(ConfigurationResponse {
            images: ImagesConfiguration {
                secure_base_url: String::from("https://img/t/p/"),
            },
        });
        assert_eq!(config.poster, "https://img/t/p/original");
        assert_eq!(config.backdrop, config.profile);
    }

    #[tokio::test]
    async fn bootstrap_merges_tv_then_movie_genres() {
        let catalog = bootstrap(FakeSource {
            fail_movie_genres: false,
        })
        .await
        .unwrap();

        assert_eq!(catalog.genres.len(), 3);
        assert_eq!(catalog.genres.name(10759), Some("Action & Adventure"));
        assert_eq!(catalog.genres.name(18), Some("Drama"));
        assert_eq!(
            catalog.poster_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[tokio::test]
    async fn bootstrap_fails_as_a_whole() {
        let result = bootstrap(FakeSource {
            fail_movie_genres: true,
        })
        .await;
        assert!(matches!(result, Err(ApiError::Status(503))));
    }
}
