//! Product catalog commands.

use embermart_client::api::types::ProductQuery;
use embermart_client::{ApiClient, ClientError};
use embermart_core::ProductId;

/// List products, honoring the optional filters.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn list(
    api: &ApiClient,
    category: Option<String>,
    available: bool,
    page: Option<u32>,
) -> Result<(), ClientError> {
    let query = ProductQuery {
        page,
        category,
        available: available.then_some(true),
    };
    let listing = api.list_products(&query).await?;

    if listing.items.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    println!(
        "{} product(s) (page {} of {}):",
        listing.total,
        listing.page,
        listing.total.div_ceil(u64::from(listing.page_size.max(1)))
    );
    for product in &listing.items {
        let stock = if product.available && product.stock > 0 {
            format!("{} in stock", product.stock)
        } else {
            "unavailable".to_string()
        };
        println!(
            "  #{:<5} {:<45} {:>10}  [{}] {}",
            product.id,
            product.name,
            product.unit_price().display(),
            product.category,
            stock
        );
    }
    Ok(())
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns an error if the product is not found or the request fails.
pub async fn show(api: &ApiClient, id: i64) -> Result<(), ClientError> {
    let product = api.get_product(ProductId::new(id)).await?;
    println!("#{} {}", product.id, product.name);
    println!("  Category: {}", product.category);
    println!("  Price:    {}", product.unit_price().display());
    println!("  Stock:    {}", product.stock);
    println!("  {}", product.description);
    Ok(())
}
