//! Product catalog queries: filtering, search, sorting, pagination, and scored creation.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::concept::ProductConcept;
use crate::domain::product::{Product, ProductDraft, ProductId, DEFAULT_PRODUCT_STATUS};
use crate::domain::trend::TrendRecord;
use crate::errors::DomainError;
use crate::intelligence::score_concept;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Name,
    MarketScore,
    CreatedDate,
}

impl ProductSort {
    /// Unknown sort keys fall back to sorting by name.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "market_score" => Self::MarketScore,
            "created_date" => Self::CreatedDate,
            _ => Self::Name,
        }
    }

    fn compare(&self, left: &Product, right: &Product) -> Ordering {
        match self {
            Self::Name => left.name.cmp(&right.name),
            Self::MarketScore => right.market_score.total_cmp(&left.market_score),
            // Newest first; products without a date sort last.
            Self::CreatedDate => right.created_date.cmp(&left.created_date),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self { default_page_size: 10, max_page_size: 100 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: ProductSort,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

pub fn list_products(
    products: &[Product],
    query: &ProductQuery,
    limits: PageLimits,
) -> Result<ProductPage, DomainError> {
    let page = query.page.unwrap_or(1);
    if page == 0 {
        return Err(DomainError::invalid_field("page", "must be at least 1"));
    }
    let per_page = query.limit.unwrap_or(limits.default_page_size);
    if per_page == 0 || per_page > limits.max_page_size {
        return Err(DomainError::invalid_field(
            "limit",
            format!("must be within 1..={}, got {per_page}", limits.max_page_size),
        ));
    }

    let category = query.category.as_deref().map(str::to_lowercase);
    let search = query.search.as_deref().map(str::to_lowercase);

    let mut matching: Vec<&Product> = products
        .iter()
        .filter(|product| {
            category.as_deref().map_or(true, |wanted| product.category.to_lowercase() == wanted)
        })
        .filter(|product| {
            search.as_deref().map_or(true, |needle| {
                product.name.to_lowercase().contains(needle)
                    || product.ingredients.to_lowercase().contains(needle)
            })
        })
        .collect();
    matching.sort_by(|left, right| query.sort_by.compare(left, right));

    let total_items = matching.len();
    let total_pages = total_items.div_ceil(per_page);
    let data = matching
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect();

    Ok(ProductPage {
        data,
        pagination: Pagination {
            current_page: page,
            per_page,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    })
}

/// Scores a draft against the trend records and assigns the next free id.
///
/// The returned product is not stored anywhere; persisting it is the caller's concern.
pub fn create_product(
    products: &[Product],
    trends: &[TrendRecord],
    draft: ProductDraft,
    created_date: NaiveDate,
) -> Result<Product, DomainError> {
    draft.validate()?;

    let concept = ProductConcept::from_ingredient_list(
        &draft.ingredients,
        draft.category.clone(),
        draft.region.clone(),
        draft.target_demographics,
    );
    let market_score = score_concept(&concept, trends);
    let next_id = products
        .iter()
        .map(|product| product.id.0)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
        .ok_or_else(|| DomainError::InvariantViolation("product id space is exhausted".into()))?;

    Ok(Product {
        id: ProductId(next_id),
        name: draft.name,
        category: draft.category,
        market_score,
        status: DEFAULT_PRODUCT_STATUS.to_string(),
        created_date: Some(created_date),
        target_demographics: draft.target_demographics,
        region: draft.region,
        ingredients: draft.ingredients,
        flavor_profile: draft.flavor_profile,
    })
}
