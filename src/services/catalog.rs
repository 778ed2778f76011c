use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{Category, Product},
    errors::ServiceError,
};

/// The menu: categories and products, with the read paths the storefront
/// renders from and the admin paths that edit them.
///
/// Display ordering lives in each record's integer `position`. Reordering is
/// driven from outside (a sortable-list collaborator hands back an ordered id
/// list); this service only persists the resulting positions.
#[derive(Debug, Default)]
pub struct CatalogService {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl CatalogService {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with an existing menu.
    pub fn with_menu(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            products,
            categories,
        }
    }

    // ==================== Read paths ====================

    /// All categories, sorted by display position.
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by_key(|c| c.position);
        categories
    }

    /// Exact-match category lookup.
    pub fn category(&self, category_id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Exact-match product lookup.
    pub fn product(&self, product_id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Products listed under a category, sorted by display position.
    /// Includes unavailable products; availability filtering is a display
    /// choice.
    pub fn products_in_category(&self, category_id: Uuid) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect();
        products.sort_by_key(|p| p.position);
        products
    }

    /// All products currently orderable.
    pub fn available_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_available).collect()
    }

    /// Available products flagged as featured.
    pub fn featured_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_available && p.is_featured)
            .collect()
    }

    /// Case-insensitive search over name, description, and tags of available
    /// products.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_available && p.matches(query))
            .collect()
    }

    // ==================== Admin paths ====================

    /// Adds a product to the catalog.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_product(&mut self, product: Product) -> Result<Uuid, ServiceError> {
        product.validate()?;
        let id = product.id;
        self.products.push(product);
        info!("Product added to catalog");
        Ok(id)
    }

    /// Replaces the whole product record with the same id.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn update_product(&mut self, product: Product) -> Result<(), ServiceError> {
        product.validate()?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product.id)))?;
        *slot = product;
        info!("Product updated");
        Ok(())
    }

    /// Removes a product, returning it if it existed.
    pub fn remove_product(&mut self, product_id: Uuid) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == product_id)?;
        Some(self.products.remove(index))
    }

    /// Adds a category.
    pub fn add_category(&mut self, category: Category) -> Result<Uuid, ServiceError> {
        category.validate()?;
        let id = category.id;
        self.categories.push(category);
        Ok(id)
    }

    /// Replaces the whole category record with the same id.
    pub fn update_category(&mut self, category: Category) -> Result<(), ServiceError> {
        category.validate()?;
        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Category {} not found", category.id))
            })?;
        *slot = category;
        Ok(())
    }

    /// Removes a category, returning it if it existed. Products referencing
    /// it keep their `category_id` (no cascade).
    pub fn remove_category(&mut self, category_id: Uuid) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == category_id)?;
        Some(self.categories.remove(index))
    }

    /// Persists product positions from an externally produced id ordering.
    /// Ids not in the catalog are skipped; products not in the list keep
    /// their position.
    pub fn reorder_products(&mut self, ordered_ids: &[Uuid]) {
        for (index, id) in ordered_ids.iter().enumerate() {
            if let Some(product) = self.products.iter_mut().find(|p| p.id == *id) {
                product.position = index as i32 + 1;
            }
        }
    }

    /// Persists category positions from an externally produced id ordering.
    pub fn reorder_categories(&mut self, ordered_ids: &[Uuid]) {
        for (index, id) in ordered_ids.iter().enumerate() {
            if let Some(category) = self.categories.iter_mut().find(|c| c.id == *id) {
                category.position = index as i32 + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seeded() -> (CatalogService, Uuid, Uuid) {
        let drinks = Category::new("Bebidas", 2);
        let burgers = Category::new("Hambúrgueres", 1);
        let drinks_id = drinks.id;
        let burgers_id = burgers.id;

        let mut catalog = CatalogService::with_menu(vec![drinks, burgers], Vec::new());

        let mut soda = Product::new("Coca-Cola Lata 350ml", "Refrigerante gelado", dec!(6.90), drinks_id, 2);
        soda.volume = Some("350ml".to_string());
        let mut italian_soda = Product::new(
            "Soda Italiana",
            "Bebida refrescante com xarope aromatizado",
            dec!(12.90),
            drinks_id,
            1,
        );
        italian_soda.is_featured = true;
        let mut burger = Product::new(
            "X-Burguer Artesanal",
            "Blend especial com molho da casa",
            dec!(24.90),
            burgers_id,
            1,
        );
        burger.tags = vec!["promoção".to_string()];

        catalog.add_product(soda).unwrap();
        catalog.add_product(italian_soda).unwrap();
        catalog.add_product(burger).unwrap();

        (catalog, drinks_id, burgers_id)
    }

    #[test]
    fn test_categories_sorted_by_position() {
        let (catalog, _, _) = seeded();
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Hambúrgueres", "Bebidas"]);
    }

    #[test]
    fn test_products_in_category_sorted_by_position() {
        let (catalog, drinks_id, _) = seeded();
        let names: Vec<&str> = catalog
            .products_in_category(drinks_id)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Soda Italiana", "Coca-Cola Lata 350ml"]);
    }

    #[test]
    fn test_featured_excludes_unavailable() {
        let (mut catalog, _, _) = seeded();
        assert_eq!(catalog.featured_products().len(), 1);

        let mut featured = catalog.featured_products()[0].clone();
        featured.is_available = false;
        catalog.update_product(featured).unwrap();
        assert!(catalog.featured_products().is_empty());
    }

    #[test]
    fn test_search_over_name_description_tags() {
        let (catalog, _, _) = seeded();
        assert_eq!(catalog.search("soda").len(), 1);
        assert_eq!(catalog.search("refrescante").len(), 1);
        assert_eq!(catalog.search("promo").len(), 1);
        assert!(catalog.search("pizza").is_empty());
    }

    #[test]
    fn test_update_product_replaces_whole_record() {
        let (mut catalog, drinks_id, _) = seeded();
        let mut edited = catalog.products_in_category(drinks_id)[0].clone();
        let id = edited.id;
        edited.price = dec!(13.90);
        edited.name = "Soda Italiana 300ml".to_string();

        catalog.update_product(edited).unwrap();
        let stored = catalog.product(id).unwrap();
        assert_eq!(stored.price, dec!(13.90));
        assert_eq!(stored.name, "Soda Italiana 300ml");
    }

    #[test]
    fn test_update_unknown_product_not_found() {
        let (mut catalog, _, _) = seeded();
        let stray = Product::new("Stray", "", dec!(1.00), Uuid::new_v4(), 1);
        assert!(matches!(
            catalog.update_product(stray),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_category_does_not_cascade() {
        let (mut catalog, drinks_id, _) = seeded();
        assert!(catalog.remove_category(drinks_id).is_some());
        assert!(catalog.category(drinks_id).is_none());
        // Orphaned products stay in the catalog with the old category id.
        assert_eq!(catalog.products_in_category(drinks_id).len(), 2);
    }

    #[test]
    fn test_reorder_products_by_list_index() {
        let (mut catalog, drinks_id, _) = seeded();
        let ids: Vec<Uuid> = catalog
            .products_in_category(drinks_id)
            .iter()
            .map(|p| p.id)
            .collect();

        // Reverse the current display order; include an unknown id.
        let reordered = vec![ids[1], Uuid::new_v4(), ids[0]];
        catalog.reorder_products(&reordered);

        let names: Vec<&str> = catalog
            .products_in_category(drinks_id)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Coca-Cola Lata 350ml", "Soda Italiana"]);
    }

    #[test]
    fn test_reorder_categories() {
        let (mut catalog, drinks_id, burgers_id) = seeded();
        catalog.reorder_categories(&[drinks_id, burgers_id]);
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bebidas", "Hambúrgueres"]);
    }
}
