use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::ImageLookup;

const API_URL: &str = "https://en.wikipedia.org/w/api.php";
const MAX_TITLES_PER_REQUEST: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub(super) struct PageImagesResponse {
    #[serde(default)]
    query: Option<PageImagesQuery>,
}

#[derive(Debug, Default, Deserialize)]
struct PageImagesQuery {
    #[serde(default)]
    normalized: Vec<TitleRewrite>,
    #[serde(default)]
    redirects: Vec<TitleRewrite>,
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct TitleRewrite {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

pub(super) fn collect_page_images(
    requested: &[String],
    response: PageImagesResponse,
) -> HashMap<String, String> {
    let Some(query) = response.query else {
        return HashMap::new();
    };

    let by_title = query
        .pages
        .into_values()
        .filter_map(|page| Some((page.title, page.thumbnail?.source)))
        .collect::<HashMap<_, _>>();
    let rewrites = query
        .normalized
        .into_iter()
        .chain(query.redirects)
        .map(|rewrite| (rewrite.from, rewrite.to))
        .collect::<HashMap<_, _>>();

    requested
        .iter()
        .filter_map(|title| {
            let mut resolved = title.as_str();
            for _ in 0..4 {
                match rewrites.get(resolved) {
                    Some(next) => resolved = next.as_str(),
                    None => break,
                }
            }
            by_title
                .get(resolved)
                .map(|url| (title.clone(), url.clone()))
        })
        .collect()
}

pub struct WikipediaLookup {
    client: Client,
}

impl WikipediaLookup {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn fetch_chunk(&self, titles: &[String], thumb_size: u32) -> Result<HashMap<String, String>> {
        let joined = titles.join("|");
        let thumb_size = thumb_size.to_string();
        let response: PageImagesResponse = self
            .client
            .get(API_URL)
            .query(&[
                ("action", "query"),
                ("titles", joined.as_str()),
                ("prop", "pageimages"),
                ("format", "json"),
                ("redirects", "1"),
                ("pithumbsize", thumb_size.as_str()),
            ])
            .send()
            .context("page image request failed")?
            .error_for_status()
            .context("page image request was rejected")?
            .json()
            .context("page image response was not valid JSON")?;

        Ok(collect_page_images(titles, response))
    }
}

impl ImageLookup for WikipediaLookup {
    fn lookup(&self, titles: &[String], thumb_size: u32) -> Result<HashMap<String, String>> {
        let mut images = HashMap::with_capacity(titles.len());
        for chunk in titles.chunks(MAX_TITLES_PER_REQUEST) {
            images.extend(self.fetch_chunk(chunk, thumb_size)?);
        }
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_pages_through_normalisation() {
        let raw = r#"{
            "batchcomplete": "",
            "query": {
                "normalized": [{"from": "zeno of Citium", "to": "Zeno of Citium"}],
                "redirects": [{"from": "Seneca", "to": "Seneca the Younger"}],
                "pages": {
                    "1": {"pageid": 1, "title": "Zeno of Citium", "thumbnail": {"source": "https://img/zeno.jpg", "width": 100}},
                    "2": {"pageid": 2, "title": "Seneca the Younger", "thumbnail": {"source": "https://img/seneca.jpg"}},
                    "3": {"pageid": 3, "title": "Herillus"}
                }
            }
        }"#;
        let response: PageImagesResponse = serde_json::from_str(raw).unwrap();
        let requested = vec![
            "zeno of Citium".to_owned(),
            "Seneca".to_owned(),
            "Herillus".to_owned(),
        ];

        let images = collect_page_images(&requested, response);
        assert_eq!(images.len(), 2);
        assert_eq!(images["zeno of Citium"], "https://img/zeno.jpg");
        assert_eq!(images["Seneca"], "https://img/seneca.jpg");
    }

    #[test]
    fn missing_query_yields_nothing() {
        let response: PageImagesResponse = serde_json::from_str(r#"{"error": {}}"#).unwrap();
        assert!(collect_page_images(&["Plato".to_owned()], response).is_empty());
    }
}
