//! Overview aggregates, search and row view models

use crate::notes::Note;
use crate::shopify::ProductSummary;
use serde::Serialize;

/// Counts shown at the top of the overview page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total_products: usize,
    pub total_notes: usize,
    pub products_with_notes: usize,
    pub products_without_notes: usize,
}

/// Every product of the shop, with their notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overview {
    products: Vec<ProductSummary>,
}

impl Overview {
    pub fn new(products: Vec<ProductSummary>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    /// Products carrying at least one note, in catalog order
    pub fn products_with_notes(&self) -> impl Iterator<Item = &ProductSummary> {
        self.products.iter().filter(|p| !p.notes.is_empty())
    }

    /// True when no product has a note yet (the page shows its empty state)
    pub fn is_empty(&self) -> bool {
        self.products_with_notes().next().is_none()
    }

    pub fn stats(&self) -> OverviewStats {
        let with_notes = self.products_with_notes().count();
        OverviewStats {
            total_products: self.products.len(),
            total_notes: self.products.iter().map(|p| p.notes.len()).sum(),
            products_with_notes: with_notes,
            products_without_notes: self.products.len() - with_notes,
        }
    }

    /// Products with notes whose title contains `query`, ignoring case.
    ///
    /// A blank query matches every product with notes.
    pub fn search(&self, query: &str) -> Vec<&ProductSummary> {
        let needle = query.trim().to_lowercase();
        self.products_with_notes()
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Search results rendered as rows for `shop_domain`
    pub fn rows(&self, shop_domain: &str, query: &str) -> Vec<ProductRow> {
        self.search(query)
            .into_iter()
            .map(|p| ProductRow::new(p, shop_domain))
            .collect()
    }
}

/// A note with its 1-based position in the product's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedNote {
    pub position: usize,
    #[serde(flatten)]
    pub note: Note,
}

/// One product line of the overview table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub product_id: String,
    pub numeric_id: String,
    pub title: String,
    pub admin_url: String,
    pub modal_id: String,
    pub badge_label: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub notes: Vec<NumberedNote>,
}

impl ProductRow {
    pub fn new(product: &ProductSummary, shop_domain: &str) -> Self {
        let numeric = product.id.numeric().to_string();
        let count = product.notes.len();

        Self {
            product_id: product.id.to_string(),
            admin_url: format!("https://{}/admin/products/{}", shop_domain, numeric),
            modal_id: format!("modal-{}", numeric),
            badge_label: if count > 0 {
                format!("Notes: {}", count)
            } else {
                "Notes: No notes".to_string()
            },
            image_url: product.image.as_ref().map(|i| i.url.clone()),
            image_alt: product
                .image
                .as_ref()
                .and_then(|i| i.alt_text.clone())
                .unwrap_or_else(|| product.title.clone()),
            title: product.title.clone(),
            notes: product
                .notes
                .iter()
                .enumerate()
                .map(|(i, note)| NumberedNote {
                    position: i + 1,
                    note: note.clone(),
                })
                .collect(),
            numeric_id: numeric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteList;
    use crate::shopify::ProductImage;

    fn product(id: u32, title: &str, notes: &str) -> ProductSummary {
        ProductSummary {
            id: id.to_string().parse().unwrap(),
            title: title.to_string(),
            image: None,
            notes: NoteList::parse(Some(notes)),
        }
    }

    fn one_note() -> &'static str {
        r#"[{"id":1,"title":"t","description":"d"}]"#
    }

    fn sample() -> Overview {
        Overview::new(vec![
            product(1, "Red Shirt", one_note()),
            product(2, "Blue Hat", one_note()),
            product(
                3,
                "Green Scarf",
                r#"[{"id":1,"title":"a","description":"a"},{"id":2,"title":"b","description":"b"}]"#,
            ),
            product(4, "Shirt Without Notes", "[]"),
        ])
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            OverviewStats {
                total_products: 4,
                total_notes: 4,
                products_with_notes: 3,
                products_without_notes: 1,
            }
        );
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let overview = Overview::new(vec![
            product(1, "Red Shirt", one_note()),
            product(2, "Blue Hat", one_note()),
        ]);
        let titles: Vec<&str> = overview.search("shirt").iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Red Shirt"]);
    }

    #[test]
    fn test_search_skips_products_without_notes() {
        let titles: Vec<String> = sample().search("SHIRT").iter().map(|p| p.title.clone()).collect();
        assert_eq!(titles, vec!["Red Shirt".to_string()]);
    }

    #[test]
    fn test_blank_search_returns_all_with_notes() {
        assert_eq!(sample().search("  ").len(), 3);
    }

    #[test]
    fn test_empty_state() {
        assert!(Overview::new(vec![product(1, "Hat", "[]")]).is_empty());
        assert!(!sample().is_empty());
    }

    #[test]
    fn test_row_links_and_labels() {
        let mut p = product(42, "Green Scarf", one_note());
        p.image = Some(ProductImage {
            url: "https://cdn/scarf.png".into(),
            alt_text: None,
        });
        let row = ProductRow::new(&p, "demo.myshopify.com");

        assert_eq!(row.numeric_id, "42");
        assert_eq!(row.admin_url, "https://demo.myshopify.com/admin/products/42");
        assert_eq!(row.modal_id, "modal-42");
        assert_eq!(row.badge_label, "Notes: 1");
        assert_eq!(row.image_alt, "Green Scarf");
        assert_eq!(row.notes[0].position, 1);
    }
}
