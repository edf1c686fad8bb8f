use crate::movie::MovieSummary;

/// One page of list or search results.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogPage {
    #[cfg_attr(feature = "serde", serde(rename = "page"))]
    pub page_number: u32,
    #[cfg_attr(feature = "serde", serde(rename = "results", default))]
    pub items: Vec<MovieSummary>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_pages: u32,
    #[cfg_attr(feature = "serde", serde(rename = "total_results", default))]
    pub total_items: u64,
}

impl CatalogPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
