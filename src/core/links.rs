use crate::core::catalog::PageCatalog;
use crate::domain::model::{PageEntry, Region, RelatedLinks};
use std::sync::Arc;

pub const NEARBY_LIMIT: usize = 6;
pub const CROSS_REGION_LIMIT: usize = 4;

/// Picks the internal links shown at the bottom of a city page.
#[derive(Debug, Clone)]
pub struct RelatedLinksSelector {
    catalog: Arc<PageCatalog>,
}

impl RelatedLinksSelector {
    pub fn new(catalog: Arc<PageCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PageCatalog {
        &self.catalog
    }

    /// Up to six pages from the same region, excluding the current city,
    /// in authored order.
    pub fn nearby(&self, current_city: &str, region: Region) -> Vec<PageEntry> {
        self.catalog
            .region_pages(region)
            .unwrap_or_default()
            .iter()
            .filter(|page| page.name != current_city)
            .take(NEARBY_LIMIT)
            .cloned()
            .collect()
    }

    /// The lead page of each other region, up to four.
    pub fn cross_region(&self, region: Region) -> Vec<PageEntry> {
        self.catalog
            .regions()
            .filter(|(other, _)| *other != region)
            .filter_map(|(_, pages)| pages.first())
            .take(CROSS_REGION_LIMIT)
            .cloned()
            .collect()
    }

    pub fn services(&self) -> Vec<PageEntry> {
        self.catalog.services().to_vec()
    }

    pub fn select(&self, current_city: &str, region: Region) -> RelatedLinks {
        let links = RelatedLinks {
            nearby: self.nearby(current_city, region),
            cross_region: self.cross_region(region),
            services: self.services(),
        };
        tracing::debug!(
            "Related links for {} ({}): {} nearby, {} cross-region, {} services",
            current_city,
            region,
            links.nearby.len(),
            links.cross_region.len(),
            links.services.len()
        );
        links
    }

    /// String-keyed variant for page definitions that carry a raw slug.
    ///
    /// An unknown slug yields empty nearby and cross-region lists. Use
    /// `slug.parse::<Region>()` where a typo should be an error instead.
    pub fn select_slug(&self, current_city: &str, region_slug: &str) -> RelatedLinks {
        match region_slug.parse::<Region>() {
            Ok(region) => self.select(current_city, region),
            Err(e) => {
                tracing::warn!("⚠️ {}; rendering services only for {}", e, current_city);
                RelatedLinks {
                    nearby: Vec::new(),
                    cross_region: Vec::new(),
                    services: self.services(),
                }
            }
        }
    }
}
