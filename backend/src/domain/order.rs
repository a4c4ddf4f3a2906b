//! Laundry orders and their status lifecycle.
//!
//! An order moves `PENDING -> INPROGRESS -> COMPLETE` and never backwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::student::BagNumber;

/// Smallest accepted number of clothes in one order.
pub const MIN_CLOTHES: i64 = 1;
/// Largest accepted number of clothes in one order.
pub const MAX_CLOTHES: i64 = 50;

/// Validation errors for order inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("Number of clothes must be between 1 and 50")]
    ClothesOutOfRange,
    #[error("Invalid status")]
    UnknownStatus,
    #[error("Invalid status transition")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },
}

/// Database identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i32);

impl OrderId {
    /// Wrap a raw database identifier.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of garments in an order, always within `1..=50`.
///
/// # Examples
/// ```
/// use laundry_backend::domain::ClothesCount;
///
/// assert_eq!(ClothesCount::new(50).map(|c| c.get()), Ok(50));
/// assert!(ClothesCount::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClothesCount(i32);

impl ClothesCount {
    /// Validate a raw count against `MIN_CLOTHES..=MAX_CLOTHES`.
    pub fn new(value: i64) -> Result<Self, OrderValidationError> {
        if !(MIN_CLOTHES..=MAX_CLOTHES).contains(&value) {
            return Err(OrderValidationError::ClothesOutOfRange);
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| OrderValidationError::ClothesOutOfRange)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    #[serde(rename = "INPROGRESS")]
    InProgress,
    Complete,
}

impl OrderStatus {
    /// Canonical stored and serialised spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "INPROGRESS",
            Self::Complete => "COMPLETE",
        }
    }

    /// Parse a status requested by a caller, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use laundry_backend::domain::OrderStatus;
    ///
    /// assert_eq!(OrderStatus::parse_requested("InProgress"), Ok(OrderStatus::InProgress));
    /// assert!(OrderStatus::parse_requested("done").is_err());
    /// ```
    pub fn parse_requested(raw: &str) -> Result<Self, OrderValidationError> {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            _ => Err(OrderValidationError::UnknownStatus),
        }
    }

    /// Parse the canonical stored spelling.
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(Self::Pending),
            "INPROGRESS" => Some(Self::InProgress),
            "COMPLETE" => Some(Self::Complete),
            _ => None,
        }
    }

    /// Whether `self -> next` is a legal step. Re-submitting the current
    /// state is not.
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::InProgress) | (Self::InProgress, Self::Complete) => true,
            (Self::Pending, Self::Pending | Self::Complete)
            | (Self::InProgress, Self::Pending | Self::InProgress)
            | (Self::Complete, _) => false,
        }
    }

    /// Checked transition.
    pub fn transition_to(self, next: Self) -> Result<Self, OrderValidationError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(OrderValidationError::IllegalTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted laundry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(value_type = i32, example = 1)]
    pub id: OrderId,
    #[schema(value_type = String, example = "B-12")]
    pub bag_no: BagNumber,
    #[schema(value_type = i32, example = 3)]
    pub number_of_clothes: ClothesCount,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub bag_no: BagNumber,
    pub number_of_clothes: ClothesCount,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// A fresh order always starts out pending.
    pub fn pending(bag_no: BagNumber, number_of_clothes: ClothesCount, now: DateTime<Utc>) -> Self {
        Self {
            bag_no,
            number_of_clothes,
            status: OrderStatus::Pending,
            created_at: now,
        }
    }
}

/// Order listing entry joined with the owning student's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentOrder {
    #[serde(flatten)]
    pub order: Order,
    #[schema(example = "Asha Verma")]
    pub student_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use OrderStatus::{Complete, InProgress, Pending};

    #[rstest]
    #[case(Pending, InProgress, true)]
    #[case(InProgress, Complete, true)]
    #[case(Pending, Pending, false)]
    #[case(Pending, Complete, false)]
    #[case(InProgress, Pending, false)]
    #[case(InProgress, InProgress, false)]
    #[case(Complete, Pending, false)]
    #[case(Complete, InProgress, false)]
    #[case(Complete, Complete, false)]
    fn transition_table(#[case] from: OrderStatus, #[case] to: OrderStatus, #[case] allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
        assert_eq!(from.transition_to(to).is_ok(), allowed);
    }

    #[rstest]
    #[case("pending", Pending)]
    #[case("PENDING", Pending)]
    #[case("inProgress", InProgress)]
    #[case("Complete", Complete)]
    fn requested_status_is_case_insensitive(#[case] raw: &str, #[case] expected: OrderStatus) {
        assert_eq!(OrderStatus::parse_requested(raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("in progress")]
    #[case("in_progress")]
    #[case("cancelled")]
    fn unknown_status_rejected(#[case] raw: &str) {
        let err = OrderStatus::parse_requested(raw).expect_err("unknown status");
        assert_eq!(err.to_string(), "Invalid status");
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(50, true)]
    #[case(51, false)]
    #[case(-3, false)]
    #[case(i64::MAX, false)]
    fn clothes_count_bounds(#[case] value: i64, #[case] accepted: bool) {
        assert_eq!(ClothesCount::new(value).is_ok(), accepted);
    }

    #[rstest]
    fn stored_spelling_round_trips() {
        for status in [Pending, InProgress, Complete] {
            assert_eq!(OrderStatus::from_stored(status.as_str()), Some(status));
        }
        assert_eq!(
            serde_json::to_value(InProgress).expect("serialise status"),
            serde_json::json!("INPROGRESS")
        );
    }

    #[rstest]
    fn listing_flattens_order_fields() {
        let at = chrono::DateTime::<Utc>::UNIX_EPOCH;
        let entry = StudentOrder {
            order: Order {
                id: OrderId::new(7),
                bag_no: BagNumber::parse("G-4").expect("valid bag"),
                number_of_clothes: ClothesCount::new(3).expect("in range"),
                status: Pending,
                created_at: at,
                updated_at: at,
            },
            student_name: "Ravi".into(),
        };
        let json = serde_json::to_value(&entry).expect("serialise listing");
        assert_eq!(json["id"], 7);
        assert_eq!(json["bagNo"], "G-4");
        assert_eq!(json["numberOfClothes"], 3);
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["studentName"], "Ravi");
    }
}
