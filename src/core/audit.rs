use crate::core::catalog::PageCatalog;
use crate::domain::model::Region;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A city/service page as declared by the site, with the raw region slug it
/// passes to its related-links block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDefinition {
    pub name: String,
    pub route: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PagesFile {
    #[serde(default)]
    pages: Vec<PageDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AuditFinding {
    /// The slug does not name any region; the page renders no nearby links.
    UnknownRegion { page: String, slug: String },
    /// Known region, but the catalog has no table for it.
    EmptyRegion { page: String, region: Region },
}

pub fn load_page_definitions<P: AsRef<Path>>(path: P) -> Result<Vec<PageDefinition>> {
    let content = std::fs::read_to_string(path)?;
    parse_page_definitions(&content)
}

pub fn parse_page_definitions(content: &str) -> Result<Vec<PageDefinition>> {
    let file: PagesFile = toml::from_str(content)?;
    Ok(file.pages)
}

pub fn audit_pages(catalog: &PageCatalog, pages: &[PageDefinition]) -> Vec<AuditFinding> {
    let findings: Vec<AuditFinding> = pages
        .iter()
        .filter_map(|page| match page.region.parse::<Region>() {
            Err(_) => Some(AuditFinding::UnknownRegion {
                page: page.name.clone(),
                slug: page.region.clone(),
            }),
            Ok(region) if catalog.region_pages(region).map_or(true, <[_]>::is_empty) => {
                Some(AuditFinding::EmptyRegion {
                    page: page.name.clone(),
                    region,
                })
            }
            Ok(_) => None,
        })
        .collect();

    tracing::info!(
        "🔍 Audited {} page definitions, {} findings",
        pages.len(),
        findings.len()
    );
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PageEntry;

    #[test]
    fn test_audit_flags_unknown_slugs() {
        let pages = parse_page_definitions(
            r#"
[[pages]]
name = "Calabasas"
route = "/calabasas"
region = "los-angeles"

[[pages]]
name = "California Employers"
route = "/california"
region = "california"

[[pages]]
name = "SoCal Employers"
route = "/southern-california"
region = "southern-california"
"#,
        )
        .unwrap();

        let findings = audit_pages(&PageCatalog::builtin(), &pages);

        assert_eq!(
            findings,
            vec![
                AuditFinding::UnknownRegion {
                    page: "California Employers".to_string(),
                    slug: "california".to_string(),
                },
                AuditFinding::UnknownRegion {
                    page: "SoCal Employers".to_string(),
                    slug: "southern-california".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_audit_flags_regions_without_pages() {
        let catalog = PageCatalog::new(
            vec![
                (Region::Ventura, vec![PageEntry::new("Ventura", "ventura", "")]),
                (Region::BayArea, vec![]),
            ],
            vec![],
        )
        .unwrap();
        let pages = vec![
            PageDefinition {
                name: "Oakland".to_string(),
                route: "/oakland".to_string(),
                region: "bay-area".to_string(),
            },
            PageDefinition {
                name: "Fresno".to_string(),
                route: "/fresno".to_string(),
                region: "central-valley".to_string(),
            },
            PageDefinition {
                name: "Oxnard".to_string(),
                route: "/oxnard".to_string(),
                region: "ventura".to_string(),
            },
        ];

        let findings = audit_pages(&catalog, &pages);

        assert_eq!(findings.len(), 2);
        assert!(matches!(
            findings[1],
            AuditFinding::EmptyRegion { region: Region::CentralValley, .. }
        ));
    }
}
