use std::fmt;

use crate::core::catalog::{NewProduct, Product};

/// Raw product form: every field arrives as text, the way it leaves a prompt
/// or a flag. Validation turns it into a [`NewProduct`].
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
}

/// Per-field validation failures. Presence and numeric checks only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category.is_none()
    }

    fn fields(&self) -> impl Iterator<Item = (&'static str, &String)> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("price", &self.price),
            ("image", &self.image),
            ("category", &self.category),
        ]
        .into_iter()
        .filter_map(|(name, slot)| slot.as_ref().map(|msg| (name, msg)))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, message) in self.fields() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "  {name}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl ProductForm {
    /// Prefill the form from an existing record, for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }

    /// Check the form and produce the create/update input.
    ///
    /// Text fields must be non-empty after trimming; the price must parse and
    /// be strictly greater than zero. The submitted values keep whatever
    /// whitespace the user typed, matching what a form would send.
    pub fn validate(&self) -> Result<NewProduct, FormErrors> {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.title = Some("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.description = Some("Description is required".to_string());
        }
        let price = match self.price.trim().parse::<f64>() {
            Ok(value) if value > 0.0 => Some(value),
            _ => {
                errors.price = Some("Price must be greater than 0".to_string());
                None
            }
        };
        if self.image.trim().is_empty() {
            errors.image = Some("Image URL is required".to_string());
        }
        if self.category.trim().is_empty() {
            errors.category = Some("Category is required".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewProduct {
            title: self.title.clone(),
            description: self.description.clone(),
            price: price.unwrap_or_default(),
            image: self.image.clone(),
            category: self.category.clone(),
        })
    }
}
