use crate::domain::model::{PageEntry, RelatedLinks};
use htmlize::{escape_attribute, escape_text};

/// Related-link components navigate by hash fragment; page components go
/// through the app router with real paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    #[default]
    Hash,
    Path,
}

impl PageEntry {
    pub fn href(&self, style: LinkStyle) -> String {
        let slug = self.route.trim_start_matches(['#', '/']);
        match style {
            LinkStyle::Hash => format!("#{}", slug),
            LinkStyle::Path => format!("/{}", slug),
        }
    }
}

fn render_list(out: &mut String, title: &str, pages: &[PageEntry], style: LinkStyle) {
    if pages.is_empty() {
        return;
    }
    out.push_str("  <div class=\"related-links__group\">\n");
    out.push_str(&format!("    <h3>{}</h3>\n", escape_text(title)));
    out.push_str("    <ul>\n");
    for page in pages {
        out.push_str(&format!(
            "      <li><a href=\"{}\" title=\"{}\">{}</a></li>\n",
            escape_attribute(page.href(style)),
            escape_attribute(&page.description),
            escape_text(&page.name)
        ));
    }
    out.push_str("    </ul>\n");
    out.push_str("  </div>\n");
}

/// Renders the three link groups as an HTML fragment. Empty groups are left out.
pub fn render_related_links(links: &RelatedLinks, style: LinkStyle) -> String {
    let mut out = String::from("<nav class=\"related-links\">\n");
    render_list(&mut out, "Nearby Locations", &links.nearby, style);
    render_list(&mut out, "Other Regions We Serve", &links.cross_region, style);
    render_list(&mut out, "Our Services", &links.services, style);
    out.push_str("</nav>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_styles() {
        let page = PageEntry::new("Long Beach", "long-beach", "");
        assert_eq!(page.href(LinkStyle::Hash), "#long-beach");
        assert_eq!(page.href(LinkStyle::Path), "/long-beach");

        let hashed = PageEntry::new("Long Beach", "#long-beach", "");
        assert_eq!(hashed.href(LinkStyle::Path), "/long-beach");
    }

    #[test]
    fn test_render_escapes_and_skips_empty_groups() {
        let links = RelatedLinks {
            nearby: vec![PageEntry::new("Wage & Hour", "wage-hour", "Say \"hi\"")],
            cross_region: vec![],
            services: vec![PageEntry::new("PAGA Defense", "paga-defense", "p")],
        };
        let html = render_related_links(&links, LinkStyle::Hash);

        assert!(html.contains("Wage &amp; Hour"));
        assert!(html.contains("href=\"#wage-hour\""));
        assert!(html.contains("&quot;hi&quot;"));
        assert!(!html.contains("Other Regions We Serve"));
        assert!(html.contains("Our Services"));
    }

    #[test]
    fn test_render_fragment_layout() {
        let links = RelatedLinks {
            nearby: vec![],
            cross_region: vec![],
            services: vec![PageEntry::new("PAGA Defense", "paga-defense", "p")],
        };
        let expected = [
            "<nav class=\"related-links\">",
            "  <div class=\"related-links__group\">",
            "    <h3>Our Services</h3>",
            "    <ul>",
            "      <li><a href=\"/paga-defense\" title=\"p\">PAGA Defense</a></li>",
            "    </ul>",
            "  </div>",
            "</nav>",
            "",
        ]
        .join("\n");
        assert_eq!(render_related_links(&links, LinkStyle::Path), expected);
    }
}
