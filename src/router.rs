use std::fmt;

use crate::media::{MediaId, MediaType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Details(MediaType, MediaId),
    Search(String),
    Explore(MediaType),
    NotFound(String),
}

impl Route {
    /// Parses an in-app path such as `/tv/1399` or `/search/alien`. Anything
    /// unrecognised becomes [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["search", query @ ..] if !query.is_empty() => {
                let query = query.join("/");
                Route::Search(decode_segment(&query))
            }
            ["explore", media] => match MediaType::browsable(media) {
                Some(media_type) => Route::Explore(media_type),
                None => Route::NotFound(trimmed.to_string()),
            },
            [media, id] => match (MediaType::browsable(media), id.parse::<MediaId>()) {
                (Some(media_type), Ok(id)) => Route::Details(media_type, id),
                _ => Route::NotFound(trimmed.to_string()),
            },
            _ => Route::NotFound(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Details(media_type, id) => write!(f, "/{media_type}/{id}"),
            Route::Search(query) => write!(f, "/search/{query}"),
            Route::Explore(media_type) => write!(f, "/explore/{media_type}"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}

/// Decodes `%20` style escapes and `+` so pasted URLs read naturally. Escapes
/// that do not form valid UTF-8 leave the segment as typed.
fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(&segment.replace('+', " ")) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/movie/550"), Route::Details(MediaType::Movie, 550));
        assert_eq!(Route::parse("/tv/1399/"), Route::Details(MediaType::Tv, 1399));
        assert_eq!(Route::parse("/explore/tv"), Route::Explore(MediaType::Tv));
        assert_eq!(
            Route::parse("/search/the%20thing"),
            Route::Search(String::from("the thing"))
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(
            Route::parse("/person/12"),
            Route::NotFound(String::from("/person/12"))
        );
        assert_eq!(
            Route::parse("/movie/abc"),
            Route::NotFound(String::from("/movie/abc"))
        );
        assert_eq!(
            Route::parse("/explore/person"),
            Route::NotFound(String::from("/explore/person"))
        );
        assert_eq!(Route::parse("/search"), Route::NotFound(String::from("/search")));
        assert_eq!(Route::parse("/a/b/c"), Route::NotFound(String::from("/a/b/c")));
    }

    #[test]
    fn renders_back_to_paths() {
        assert_eq!(Route::Home.to_string(), "/");
        assert_eq!(Route::Details(MediaType::Tv, 7).to_string(), "/tv/7");
        assert_eq!(Route::Explore(MediaType::Movie).to_string(), "/explore/movie");
        assert_eq!(Route::Search(String::from("heat")).to_string(), "/search/heat");
    }

    #[test]
    fn trailing_percent_is_kept() {
        assert_eq!(Route::parse("/search/100%"), Route::Search(String::from("100%")));
    }

    #[test]
    fn malformed_escapes_stay_literal() {
        assert_eq!(Route::parse("/search/a%+1b"), Route::Search(String::from("a% 1b")));
        assert_eq!(Route::parse("/search/c%2B%2B"), Route::Search(String::from("c++")));
        assert_eq!(Route::parse("/search/the+thing"), Route::Search(String::from("the thing")));
    }

    #[test]
    fn invalid_utf8_keeps_raw_segment() {
        assert_eq!(Route::parse("/search/caf%FF"), Route::Search(String::from("caf%FF")));
        assert_eq!(Route::parse("/search/caf%C3%A9"), Route::Search(String::from("café")));
    }
}
