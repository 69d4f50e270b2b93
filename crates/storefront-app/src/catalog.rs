use storefront_client::StorefrontClient;
use storefront_core::Product;

/// Products fetched once when a session starts.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Fetches the catalog. A failed fetch is logged and yields an empty
    /// catalog so the session stays usable.
    pub async fn load(client: &StorefrontClient) -> Self {
        match client.list_products().await {
            Ok(products) => Self::new(products),
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch products");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolves an id typed by the user.
    #[must_use]
    pub fn find(&self, raw_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.matches(raw_id))
    }
}
