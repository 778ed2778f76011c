use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A menu item in the catalog.
///
/// Admin edits replace the whole record by id; a product embedded in a cart
/// line or an order snapshot is an independent copy and is not affected by
/// later edits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: Uuid,

    /// Display name.
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Sale price. Always the amount charged.
    #[validate(custom = "validate_non_negative_amount")]
    pub price: Decimal,

    /// Pre-discount price, display only. Never affects totals.
    pub original_price: Option<Decimal>,

    /// Category this product is listed under. Orphaned references are
    /// tolerated; the presentation layer renders them as unknown.
    pub category_id: Uuid,

    /// Serving descriptor, e.g. "2 pessoas".
    pub serves: Option<String>,

    /// Volume descriptor, e.g. "350ml".
    pub volume: Option<String>,

    /// Whether the product can currently be ordered.
    pub is_available: bool,

    /// Whether the product is highlighted on the storefront.
    pub is_featured: bool,

    /// Free-form marketing tags, searchable.
    pub tags: Vec<String>,

    /// Display position within its category. Unique-ish, not enforced.
    pub position: i32,
}

impl Product {
    /// Creates a new available, non-featured product with a generated id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        category_id: Uuid,
        position: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            price,
            original_price: None,
            category_id,
            serves: None,
            volume: None,
            is_available: true,
            is_featured: false,
            tags: Vec::new(),
            position,
        }
    }

    /// Case-insensitive match against name, description, and tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }
}

/// A menu category.
///
/// Deleting a category does not cascade to its products.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Unique identifier for the category.
    pub id: Uuid,

    /// Display name.
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,

    /// Display position in the menu.
    pub position: i32,
}

impl Category {
    /// Creates a new category with a generated id.
    pub fn new(name: impl Into<String>, position: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
        }
    }
}

pub(crate) fn validate_non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}
