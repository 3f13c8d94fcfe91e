use serde::{Deserialize, Serialize};
use std::fmt;

/// A single catalog entry, mirroring the remote service's JSON shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// The full collection of products known to the client. Raw order carries
/// no meaning; display always goes through the derived view.
pub type Catalog = Vec<Product>;

impl Product {
    pub fn new(id: u64, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_rating(mut self, rate: f64, count: u64) -> Self {
        self.rating = Rating { rate, count };
        self
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self { rate: 0.0, count: 0 }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} (${:.2})", self.id, self.title, self.price)
    }
}

/// Allocate an id for a product created without one. The original tool
/// picked a small random number; a monotonic successor avoids the
/// collision risk while keeping ids short and human-readable.
pub fn next_id(catalog: &[Product]) -> u64 {
    catalog.iter().map(|p| p.id).max().unwrap_or(0) + 1
}
