use crate::domain::model::{PageEntry, Region};
use crate::utils::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read-only lookup tables behind the related-links lists.
///
/// Regions keep the order they were declared in; the cross-region list
/// depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCatalog {
    regions: Vec<(Region, Vec<PageEntry>)>,
    services: Vec<PageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    regions: Vec<RegionTable>,
    #[serde(default)]
    services: Vec<PageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionTable {
    region: Region,
    #[serde(default)]
    pages: Vec<PageEntry>,
}

impl PageCatalog {
    pub fn new(regions: Vec<(Region, Vec<PageEntry>)>, services: Vec<PageEntry>) -> Result<Self> {
        for (i, (region, _)) in regions.iter().enumerate() {
            if regions[..i].iter().any(|(seen, _)| seen == region) {
                return Err(SiteError::ConfigError {
                    message: format!("Region '{}' is declared more than once", region),
                });
            }
        }
        Ok(Self { regions, services })
    }

    /// Loads a catalog from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(
            file.regions
                .into_iter()
                .map(|table| (table.region, table.pages))
                .collect(),
            file.services,
        )
    }

    pub fn region_pages(&self, region: Region) -> Option<&[PageEntry]> {
        self.regions
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, pages)| pages.as_slice())
    }

    pub fn regions(&self) -> impl Iterator<Item = (Region, &[PageEntry])> {
        self.regions.iter().map(|(r, pages)| (*r, pages.as_slice()))
    }

    pub fn services(&self) -> &[PageEntry] {
        &self.services
    }

    /// Writes every page as `kind,region,name,route,description` rows.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["kind", "region", "name", "route", "description"])?;

        for (region, pages) in self.regions() {
            for page in pages {
                csv_writer.write_record([
                    "city",
                    region.slug(),
                    page.name.as_str(),
                    page.route.as_str(),
                    page.description.as_str(),
                ])?;
            }
        }
        for page in &self.services {
            csv_writer.write_record([
                "service",
                "",
                page.name.as_str(),
                page.route.as_str(),
                page.description.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// The site's own page tables.
    pub fn builtin() -> Self {
        let table = |rows: &[(&str, &str, &str)]| -> Vec<PageEntry> {
            rows.iter()
                .map(|(name, route, description)| PageEntry::new(name, route, description))
                .collect()
        };

        Self {
            regions: vec![
                (
                    Region::LosAngeles,
                    table(&[
                        ("Calabasas", "calabasas", "Employment defense for Calabasas businesses"),
                        ("Los Angeles", "los-angeles", "Employer-side counsel across Los Angeles"),
                        ("Los Angeles Port", "los-angeles-port", "Logistics and port employer defense"),
                        ("Long Beach", "long-beach", "Wage and hour defense in Long Beach"),
                        ("Pasadena", "pasadena", "Workplace compliance for Pasadena employers"),
                        ("Glendale", "glendale", "Employment litigation defense in Glendale"),
                        ("Torrance", "torrance", "South Bay employer representation"),
                        ("Santa Monica", "santa-monica", "Tech and hospitality employer defense"),
                        ("Burbank", "burbank", "Entertainment industry employment counsel"),
                        ("Santa Clarita", "santa-clarita", "Employment defense in Santa Clarita Valley"),
                        ("Beverly Hills", "beverly-hills", "Executive and employer advisory services"),
                    ]),
                ),
                (
                    Region::OrangeCounty,
                    table(&[
                        ("Orange County", "orange-county", "Employer defense throughout Orange County"),
                        ("Irvine", "irvine", "Employment counsel for Irvine companies"),
                        ("Anaheim", "anaheim", "Hospitality and retail employer defense"),
                        ("Santa Ana", "santa-ana", "Wage and hour litigation in Santa Ana"),
                        ("Newport Beach", "newport-beach", "Employment advisory in Newport Beach"),
                        ("Huntington Beach", "huntington-beach", "Workplace investigations and defense"),
                        ("Costa Mesa", "costa-mesa", "PAGA defense for Costa Mesa employers"),
                    ]),
                ),
                (
                    Region::InlandEmpire,
                    table(&[
                        ("Inland Empire", "inland-empire", "Warehouse and logistics employer defense"),
                        ("Riverside", "riverside", "Employment litigation in Riverside"),
                        ("San Bernardino", "san-bernardino", "Employer counsel in San Bernardino"),
                        ("Ontario", "ontario", "Distribution center compliance and defense"),
                        ("Rancho Cucamonga", "rancho-cucamonga", "Employment defense in Rancho Cucamonga"),
                        ("Temecula", "temecula", "Employer representation in Temecula Valley"),
                    ]),
                ),
                (
                    Region::SanDiego,
                    table(&[
                        ("San Diego", "san-diego", "Employer-side counsel across San Diego"),
                        ("Carlsbad", "carlsbad", "Life sciences employer defense"),
                        ("Chula Vista", "chula-vista", "Wage and hour defense in Chula Vista"),
                        ("Oceanside", "oceanside", "Employment counsel in North County"),
                        ("Escondido", "escondido", "Agricultural and retail employer defense"),
                    ]),
                ),
                (
                    Region::BayArea,
                    table(&[
                        ("San Francisco", "san-francisco", "Employer defense in San Francisco"),
                        ("San Jose", "san-jose", "Tech employer litigation and advisory"),
                        ("Oakland", "oakland", "Employment defense in the East Bay"),
                        ("Palo Alto", "palo-alto", "Startup and executive employment counsel"),
                        ("Fremont", "fremont", "Manufacturing employer compliance"),
                    ]),
                ),
                (
                    Region::CentralValley,
                    table(&[
                        ("Fresno", "fresno", "Agricultural employer defense in Fresno"),
                        ("Sacramento", "sacramento", "Employment counsel in the capital region"),
                        ("Bakersfield", "bakersfield", "Energy and agriculture employer defense"),
                        ("Stockton", "stockton", "Logistics employer representation"),
                        ("Modesto", "modesto", "Wage and hour defense in Modesto"),
                    ]),
                ),
                (
                    Region::Ventura,
                    table(&[
                        ("Ventura", "ventura", "Employer defense across Ventura County"),
                        ("Oxnard", "oxnard", "Agricultural and port employer counsel"),
                        ("Thousand Oaks", "thousand-oaks", "Employment advisory in Thousand Oaks"),
                        ("Simi Valley", "simi-valley", "Employment defense in Simi Valley"),
                        ("Camarillo", "camarillo", "Workplace compliance for Camarillo employers"),
                    ]),
                ),
            ],
            services: table(&[
                ("Wage & Hour Defense", "wage-hour-defense", "Overtime, meal and rest break claims"),
                ("PAGA Defense", "paga-defense", "Private Attorneys General Act representative actions"),
                ("Class Action Defense", "class-action-defense", "Employment class and collective actions"),
                ("Wrongful Termination Defense", "wrongful-termination-defense", "Retaliation and termination claims"),
                ("Discrimination & Harassment Defense", "discrimination-harassment-defense", "FEHA and Title VII claims"),
                ("Workplace Investigations", "workplace-investigations", "Independent internal investigations"),
            ]),
        }
    }
}
