//! Query parameter types for API handlers.

use catalog_core::listing::{
    clamp_page, clamp_per_page, non_empty, parse_int_param, ProductListing, SortColumn,
    SortDirection,
};
/// Raw `GET /api/products` query parameters.
///
/// Everything is read as text so malformed numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ProductListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl ProductListParams {
    /// Collect recognised keys from decoded query pairs. A repeated key
    /// keeps its last value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "per_page" => &mut params.per_page,
                "q" => &mut params.q,
                "category" => &mut params.category,
                "sort_by" => &mut params.sort_by,
                "sort_dir" => &mut params.sort_dir,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }

    /// Normalise into a [`ProductListing`]: clamp paging, apply the sort
    /// allow-list and drop empty filters.
    pub fn into_listing(self) -> ProductListing {
        ProductListing {
            search: non_empty(self.q.as_deref()),
            category: non_empty(self.category.as_deref()),
            sort_by: SortColumn::parse(self.sort_by.as_deref()),
            sort_dir: SortDirection::parse(self.sort_dir.as_deref()),
            page: clamp_page(parse_int_param(self.page.as_deref())),
            per_page: clamp_per_page(parse_int_param(self.per_page.as_deref())),
        }
    }
}
