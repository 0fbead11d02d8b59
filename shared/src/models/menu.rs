//! In-room dining menu

use serde::{Deserialize, Serialize};

/// Menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// One line of a food order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodOrderLine {
    pub item: MenuItem,
    pub quantity: u32,
}

/// "2x Club Sandwich, 1x Espresso"
pub fn order_summary(lines: &[FoodOrderLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.item.name))
        .collect::<Vec<_>>()
        .join(", ")
}
