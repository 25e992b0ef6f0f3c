//! Catalog actions
//!
//! Controls in the rendered catalog carry a `data-action` attribute plus the
//! data the action needs. A single dispatcher decodes them here instead of
//! binding a handler per control on every render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{DomainError, DomainResult, MAX_ADD_QUANTITY};

/// `data-action` values emitted by the HTML renderer
pub mod names {
    pub const SEARCH: &str = "search";
    pub const GO_TO_PAGE: &str = "go-to-page";
    pub const PREVIOUS_PAGE: &str = "previous-page";
    pub const NEXT_PAGE: &str = "next-page";
    pub const ADD_TO_CART: &str = "add-to-cart";
}

/// A user interaction with the catalog page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CatalogAction {
    Search {
        #[serde(default)]
        term: String,
    },
    GoToPage {
        page: usize,
    },
    PreviousPage,
    NextPage,
    AddToCart {
        product_id: String,
        #[serde(default = "default_quantity")]
        quantity: u32,
        #[serde(default)]
        size: String,
    },
}

fn default_quantity() -> u32 {
    1
}

impl CatalogAction {
    /// Decode an action from a control's `data-*` attributes.
    ///
    /// `value` is the current value of the control, used by the search box.
    pub fn from_dataset(
        dataset: &BTreeMap<String, String>,
        value: Option<&str>,
    ) -> DomainResult<Self> {
        let action = dataset
            .get("action")
            .ok_or_else(|| DomainError::Validation("missing data-action".into()))?;

        match action.as_str() {
            names::SEARCH => Ok(Self::Search {
                term: value.unwrap_or_default().to_string(),
            }),
            names::GO_TO_PAGE => {
                let page = dataset
                    .get("page")
                    .and_then(|p| p.parse::<usize>().ok())
                    .ok_or_else(|| {
                        DomainError::Validation("go-to-page needs a numeric data-page".into())
                    })?;
                Ok(Self::GoToPage { page })
            }
            names::PREVIOUS_PAGE => Ok(Self::PreviousPage),
            names::NEXT_PAGE => Ok(Self::NextPage),
            names::ADD_TO_CART => {
                let product_id = dataset
                    .get("id")
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| DomainError::Validation("add-to-cart needs data-id".into()))?
                    .clone();
                let quantity = match dataset.get("quantity") {
                    Some(q) => q.parse::<u32>().map_err(|_| {
                        DomainError::Validation(format!("invalid data-quantity: {}", q))
                    })?,
                    None => default_quantity(),
                };
                let action = Self::AddToCart {
                    product_id,
                    quantity,
                    size: dataset.get("size").cloned().unwrap_or_default(),
                };
                action
                    .validate()
                    .map_err(|e| DomainError::Validation(e.to_string()))?;
                Ok(action)
            }
            other => Err(DomainError::Validation(format!(
                "unknown data-action: {}",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Search { .. } => names::SEARCH,
            Self::GoToPage { .. } => names::GO_TO_PAGE,
            Self::PreviousPage => names::PREVIOUS_PAGE,
            Self::NextPage => names::NEXT_PAGE,
            Self::AddToCart { .. } => names::ADD_TO_CART,
        }
    }
}

impl Validate for CatalogAction {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Self::AddToCart {
            product_id,
            quantity,
            size,
        } = self
        {
            if product_id.is_empty() {
                errors.add("product_id", invalid("length", "product_id is required"));
            }
            if !(1..=MAX_ADD_QUANTITY).contains(quantity) {
                errors.add(
                    "quantity",
                    invalid("range", "quantity must be between 1 and 999"),
                );
            }
            if size.chars().count() > 32 {
                errors.add("size", invalid("length", "size is at most 32 characters"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn decodes_page_button() {
        let action =
            CatalogAction::from_dataset(&dataset(&[("action", "go-to-page"), ("page", "3")]), None)
                .unwrap();
        assert_eq!(action, CatalogAction::GoToPage { page: 3 });
    }

    #[test]
    fn decodes_add_to_cart_with_default_quantity() {
        let action =
            CatalogAction::from_dataset(&dataset(&[("action", "add-to-cart"), ("id", "a")]), None)
                .unwrap();
        assert_eq!(
            action,
            CatalogAction::AddToCart {
                product_id: "a".into(),
                quantity: 1,
                size: String::new()
            }
        );
    }

    #[test]
    fn search_takes_the_control_value() {
        let action =
            CatalogAction::from_dataset(&dataset(&[("action", "search")]), Some("Phone")).unwrap();
        assert_eq!(action, CatalogAction::Search { term: "Phone".into() });
    }

    #[test]
    fn rejects_unknown_or_incomplete_actions() {
        assert!(CatalogAction::from_dataset(&dataset(&[]), None).is_err());
        assert!(CatalogAction::from_dataset(&dataset(&[("action", "explode")]), None).is_err());
        assert!(
            CatalogAction::from_dataset(&dataset(&[("action", "go-to-page"), ("page", "x")]), None)
                .is_err()
        );
        assert!(CatalogAction::from_dataset(&dataset(&[("action", "add-to-cart")]), None).is_err());
    }

    #[test]
    fn search_value_is_trimmed_downstream() {
        let action =
            CatalogAction::from_dataset(&dataset(&[("action", "search")]), Some(" phone")).unwrap();
        let CatalogAction::Search { term } = action else {
            panic!("expected a search action");
        };
        assert_eq!(crate::domain::SearchTerm::new(term).as_str(), "phone");
    }

    #[test]
    fn add_to_cart_quantity_is_bounded() {
        let over = dataset(&[("action", "add-to-cart"), ("id", "a"), ("quantity", "5000")]);
        assert!(matches!(
            CatalogAction::from_dataset(&over, None),
            Err(DomainError::Validation(_))
        ));
        let zero = dataset(&[("action", "add-to-cart"), ("id", "a"), ("quantity", "0")]);
        assert!(CatalogAction::from_dataset(&zero, None).is_err());

        let json: CatalogAction = serde_json::from_value(
            serde_json::json!({"action": "add_to_cart", "product_id": "a", "quantity": 1000}),
        )
        .unwrap();
        let errors = json.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
        assert!(CatalogAction::NextPage.validate().is_ok());
    }

    #[test]
    fn json_form_uses_snake_case_tags() {
        let action: CatalogAction =
            serde_json::from_value(serde_json::json!({"action": "next_page"})).unwrap();
        assert_eq!(action, CatalogAction::NextPage);

        let action: CatalogAction = serde_json::from_value(
            serde_json::json!({"action": "add_to_cart", "product_id": "b"}),
        )
        .unwrap();
        assert_eq!(action.name(), names::ADD_TO_CART);
    }
}
