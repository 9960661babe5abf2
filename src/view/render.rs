use crate::core::catalog::Product;

/// One row per product: id, like mark, price, category, title.
pub fn list(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products to show.\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{:<13}  {}  {:>9}  {:<18}  {}\n",
        "ID", " ", "PRICE", "CATEGORY", "TITLE"
    ));
    for product in products {
        let mark = if product.is_liked { "♥" } else { " " };
        out.push_str(&format!(
            "{:<13}  {}  {:>9.2}  {:<18}  {}\n",
            product.id,
            mark,
            product.price,
            truncate(&product.category, 18),
            truncate(&product.title, 48),
        ));
    }
    out.push_str(&format!("\n{} product(s)\n", products.len()));
    out
}

/// Full single-product view.
pub fn detail(product: &Product) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", product.title));
    out.push_str(&format!("Product #{}\n\n", product.id));
    out.push_str(&format!("Category: {}\n", product.category));
    out.push_str(&format!("Price:    {:.2}\n", product.price));
    out.push_str(&format!(
        "Liked:    {}\n",
        if product.is_liked { "yes" } else { "no" }
    ));
    out.push_str(&format!("Image:    {}\n", product.image));
    out.push_str(&format!("\n{}\n", product.description));
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
