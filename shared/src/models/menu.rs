//! Menu Item Model

use crate::types::LocalizedText;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Food/drink catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: LocalizedText,
    pub category: String,
    pub price: Decimal,
    /// Emoji or icon placeholder
    #[serde(default)]
    pub image: String,
    pub available: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<u32>,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: LocalizedText,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            category: category.into(),
            price,
            image: String::new(),
            available: true,
            is_popular: false,
            stock: None,
            description: None,
            preparation_time: None,
        }
    }
}
