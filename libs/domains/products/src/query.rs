//! Translation of `/products` query parameters into a catalog filter.
//!
//! ```text
//! ?category=toys&rating=4&price=50
//!        │
//!        ▼  ProductFilter::try_from(ProductQuery)
//! ProductFilter { category: "toys", min_rating: 4.0, max_price: 50.0 }
//!        │
//!        ├─▶ to_document()  → { category: "toys", rating: { $gte: 4.0 }, price: { $lte: 50.0 } }
//!        └─▶ matches(&p)    → same predicate evaluated in memory
//! ```

use mongodb::bson::{Document, doc};

use crate::error::ProductError;
use crate::models::{Product, ProductFilter, ProductQuery};

/// Empty strings count as "not supplied".
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_number(param: &'static str, raw: Option<String>) -> Result<Option<f64>, ProductError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ProductError::InvalidQuery { param, value: raw }),
    }
}

impl TryFrom<ProductQuery> for ProductFilter {
    type Error = ProductError;

    fn try_from(query: ProductQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            category: present(query.category),
            min_rating: parse_number("rating", query.rating)?,
            max_price: parse_number("price", query.price)?,
        })
    }
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.min_rating.is_none() && self.max_price.is_none()
    }

    /// MongoDB filter document; `{}` when nothing is constrained.
    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};

        if let Some(ref category) = self.category {
            filter.insert("category", category);
        }

        if let Some(min) = self.min_rating {
            filter.insert("rating", doc! { "$gte": min });
        }

        if let Some(max) = self.max_price {
            filter.insert("price", doc! { "$lte": max });
        }

        filter
    }

    /// In-memory equivalent of [`Self::to_document`]. A constrained field that
    /// is missing on the product does not match, as in MongoDB.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| product.category.as_deref() == Some(c));

        let rating_ok = self
            .min_rating
            .is_none_or(|min| product.rating.is_some_and(|r| r >= min));

        let price_ok = self
            .max_price
            .is_none_or(|max| product.price.is_some_and(|p| p <= max));

        category_ok && rating_ok && price_ok
    }
}
