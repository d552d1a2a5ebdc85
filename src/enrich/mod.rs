mod wikipedia;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::Result;
use log::{debug, warn};

use crate::lineage::LineageGraph;

pub use wikipedia::WikipediaLookup;

pub const THUMBNAIL_SIZE: u32 = 100;
pub const PORTRAIT_SIZE: u32 = 500;

pub trait ImageLookup: Send + Sync {
    fn lookup(&self, titles: &[String], thumb_size: u32) -> Result<HashMap<String, String>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Portrait {
    pub node: usize,
    pub url: Option<String>,
}

pub fn wiki_title(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(segment)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| segment.to_owned());
    let title = decoded.replace('_', " ").trim().to_owned();
    (!title.is_empty()).then_some(title)
}

pub fn spawn_thumbnail_fetch(
    lookup: Arc<dyn ImageLookup>,
    graph: &LineageGraph,
) -> Option<Receiver<HashMap<usize, String>>> {
    let wanted = graph
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| Some((index, wiki_title(node.wiki.as_deref()?)?)))
        .collect::<Vec<_>>();
    if wanted.is_empty() {
        return None;
    }

    let mut titles = wanted.iter().map(|(_, title)| title.clone()).collect::<Vec<_>>();
    titles.sort();
    titles.dedup();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || match lookup.lookup(&titles, THUMBNAIL_SIZE) {
        Ok(images) => {
            let thumbnails = wanted
                .into_iter()
                .filter_map(|(index, title)| Some((index, images.get(&title)?.clone())))
                .collect::<HashMap<_, _>>();
            debug!("resolved {} of {} thumbnails", thumbnails.len(), titles.len());
            let _ = tx.send(thumbnails);
        }
        Err(error) => warn!("failed to fetch thumbnails: {error:#}"),
    });

    Some(rx)
}

pub fn spawn_portrait_fetch(
    lookup: Arc<dyn ImageLookup>,
    node: usize,
    title: String,
) -> Receiver<Portrait> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let url = match lookup.lookup(std::slice::from_ref(&title), PORTRAIT_SIZE) {
            Ok(mut images) => images.remove(&title),
            Err(error) => {
                warn!("failed to fetch image for {title}: {error:#}");
                None
            }
        };
        let _ = tx.send(Portrait { node, url });
    });

    rx
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::bail;

    use super::*;
    use crate::lineage::test_node;

    struct FixedLookup;

    impl ImageLookup for FixedLookup {
        fn lookup(&self, titles: &[String], thumb_size: u32) -> Result<HashMap<String, String>> {
            Ok(titles
                .iter()
                .filter(|title| title.starts_with('Z'))
                .map(|title| (title.clone(), format!("img://{title}/{thumb_size}")))
                .collect())
        }
    }

    struct FailingLookup;

    impl ImageLookup for FailingLookup {
        fn lookup(&self, _titles: &[String], _thumb_size: u32) -> Result<HashMap<String, String>> {
            bail!("offline")
        }
    }

    fn graph_with_wikis() -> LineageGraph {
        let mut zeno = test_node("zeno", 0);
        zeno.wiki = Some("https://en.wikipedia.org/wiki/Zeno_of_Citium".into());
        let mut plato = test_node("plato", 0);
        plato.wiki = Some("https://en.wikipedia.org/wiki/Plato".into());
        LineageGraph::new(vec![zeno, plato, test_node("anon", 1)], Vec::new()).unwrap()
    }

    #[test]
    fn titles_come_from_the_last_segment() {
        assert_eq!(
            wiki_title("https://en.wikipedia.org/wiki/Zeno_of_Citium").as_deref(),
            Some("Zeno of Citium")
        );
        assert_eq!(
            wiki_title("https://en.wikipedia.org/wiki/Polemon_(scholarch)/").as_deref(),
            Some("Polemon (scholarch)")
        );
        assert_eq!(
            wiki_title("https://fr.wikipedia.org/wiki/%C3%89pict%C3%A8te#Vie").as_deref(),
            Some("Épictète")
        );
        assert_eq!(wiki_title(""), None);
    }

    #[test]
    fn thumbnails_map_back_to_node_indices() {
        let rx = spawn_thumbnail_fetch(Arc::new(FixedLookup), &graph_with_wikis()).unwrap();
        let thumbnails = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(thumbnails.len(), 1);
        assert_eq!(thumbnails[&0], "img://Zeno of Citium/100");
    }

    #[test]
    fn graph_without_wikis_spawns_nothing() {
        let graph = LineageGraph::new(vec![test_node("anon", 0)], Vec::new()).unwrap();
        assert!(spawn_thumbnail_fetch(Arc::new(FixedLookup), &graph).is_none());
    }

    #[test]
    fn failed_thumbnail_lookup_closes_the_channel() {
        let rx = spawn_thumbnail_fetch(Arc::new(FailingLookup), &graph_with_wikis()).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }

    #[test]
    fn portrait_failure_still_reports_the_node() {
        let rx = spawn_portrait_fetch(Arc::new(FailingLookup), 4, "Plato".into());
        let portrait = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(portrait, Portrait { node: 4, url: None });

        let rx = spawn_portrait_fetch(Arc::new(FixedLookup), 2, "Zeno".into());
        let portrait = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(portrait.url.as_deref(), Some("img://Zeno/500"));
    }
}
