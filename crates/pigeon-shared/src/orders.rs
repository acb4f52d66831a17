use chrono::NaiveDateTime;

use crate::{catalog::Product, errors::ConversionError, id::RecordId, uac::UserProfile};

#[derive(
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Returns `true` if the order status is [`Pending`].
    ///
    /// [`Pending`]: OrderStatus::Pending
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(rename = "produit", default)]
    pub product: Option<Product>,
    #[serde(rename = "quantite")]
    pub quantity: u32,
    #[serde(default)]
    pub order_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// Number of units to order, at least one
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: u32 = 1;

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ConversionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value < Self::MIN {
            return Err(ConversionError::BelowMinimum {
                min: Self::MIN.into(),
                actual: value.into(),
            });
        }
        Ok(Self(value))
    }
}
