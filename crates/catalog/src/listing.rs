//! Product list filtering (admin table, storefront grid) and dashboard counts.

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProductStatus),
}

impl StatusFilter {
    fn admits(&self, status: ProductStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Text field a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search_query: Option<String>,
    pub status: StatusFilter,
    pub search_fields: Vec<SearchField>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search_query: None,
            status: StatusFilter::All,
            search_fields: vec![SearchField::Name, SearchField::Description],
        }
    }
}

impl ProductFilter {
    /// What the public storefront shows.
    pub fn storefront() -> Self {
        Self {
            status: StatusFilter::Only(ProductStatus::Visible),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_fields(mut self, fields: Vec<SearchField>) -> Self {
        self.search_fields = fields;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if !product.exists() || !self.status.admits(product.status()) {
            return false;
        }
        let Some(query) = self.normalized_query() else {
            return true;
        };
        self.search_fields.iter().any(|field| {
            let haystack = match field {
                SearchField::Name => product.name(),
                SearchField::Description => product.description(),
            };
            haystack.to_lowercase().contains(&query)
        })
    }

    /// Matching products, newest first.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut matched: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id_typed().cmp(&a.id_typed()))
        });
        matched
    }

    fn normalized_query(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub visible: usize,
    pub private: usize,
}

impl DashboardStats {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        products
            .into_iter()
            .filter(|p| p.exists())
            .fold(Self::default(), |mut stats, product| {
                stats.total += 1;
                match product.status() {
                    ProductStatus::Visible => stats.visible += 1,
                    ProductStatus::Private => stats.private += 1,
                }
                stats
            })
    }
}
