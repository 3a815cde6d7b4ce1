//! # Validation Module
//!
//! Entry validation for Tienda Inventory.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── Shows/hides the save button based on is_entry_valid               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: View-model (tienda-state)                                    │
//! │  └── THIS MODULE: re-run on every keystroke via update_ui_state        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL columns only; blankness is NOT enforced here             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The outcome is a single boolean on [`ProductUiState`], not a structured
//! error: the screens only need to enable or disable the save action.

use crate::types::ProductDetails;

/// Validates in-progress product entry fields.
///
/// ## Rule
/// Valid iff name, material, price and quantity are all non-blank (contain
/// at least one non-whitespace character).
///
/// Note this deliberately does NOT check that price/quantity parse as
/// numbers: a non-numeric value passes validation and becomes 0.0 / 0 at
/// conversion time ([`ProductDetails::to_product`]).
///
/// ## Example
/// ```rust
/// use tienda_core::{validate_input, ProductDetails};
///
/// let mut details = ProductDetails {
///     id: 0,
///     name: "Camisa".to_string(),
///     material: "algodon".to_string(),
///     price: "10.0".to_string(),
///     quantity: "20".to_string(),
/// };
/// assert!(validate_input(&details));
///
/// details.material.clear();
/// assert!(!validate_input(&details));
/// ```
pub fn validate_input(details: &ProductDetails) -> bool {
    !details.name.trim().is_empty()
        && !details.material.trim().is_empty()
        && !details.price.trim().is_empty()
        && !details.quantity.trim().is_empty()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductDetails {
        ProductDetails {
            id: 1,
            name: "Camisa".to_string(),
            material: "algodon".to_string(),
            price: "10.0".to_string(),
            quantity: "20".to_string(),
        }
    }

    #[test]
    fn test_all_fields_filled_is_valid() {
        assert!(validate_input(&filled()));
    }

    #[test]
    fn test_any_blank_field_is_invalid() {
        for blank in ["name", "material", "price", "quantity"] {
            let mut details = filled();
            match blank {
                "name" => details.name.clear(),
                "material" => details.material.clear(),
                "price" => details.price.clear(),
                _ => details.quantity.clear(),
            }
            assert!(!validate_input(&details), "blank {blank} should fail");
        }
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let mut details = filled();
        details.material = "   ".to_string();
        assert!(!validate_input(&details));
    }

    #[test]
    fn test_non_numeric_text_still_validates() {
        // Parseability is checked nowhere: "abc" is a valid *entry*,
        // it just converts to 0.0 at commit time.
        let mut details = filled();
        details.price = "abc".to_string();
        details.quantity = "many".to_string();
        assert!(validate_input(&details));
    }
}
