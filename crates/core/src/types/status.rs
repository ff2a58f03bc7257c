//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are created `pending` and moved to `approved` or `rejected` by
/// the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// User role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Shopper account.
    #[default]
    Customer,
    /// Full access to store management features.
    Admin,
    /// Full access including admin user management.
    SuperAdmin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
            Self::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Product review rating.
///
/// The catalog only surfaces well-reviewed items, so ratings are
/// constrained to 4, 4.5, or 5 stars. Serialized as the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rating {
    Four,
    FourHalf,
    #[default]
    Five,
}

impl Rating {
    /// Numeric star value.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Four => 4.0,
            Self::FourHalf => 4.5,
            Self::Five => 5.0,
        }
    }

    /// Map a raw backend value onto the allowed scale.
    ///
    /// Anything outside the three supported values collapses to the
    /// nearest allowed rating.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value < 4.25 {
            Self::Four
        } else if value < 4.75 {
            Self::FourHalf
        } else {
            Self::Five
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::Rejected,
        ] {
            assert_eq!(OrderStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn test_order_status_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn test_user_role_rejects_unknown() {
        assert!(UserRole::from_str("moderator").is_err());
    }

    #[test]
    fn test_rating_serializes_as_number() {
        let json = serde_json::to_string(&Rating::FourHalf).unwrap();
        assert_eq!(json, "4.5");
    }

    #[test]
    fn test_rating_deserializes_integer() {
        let rating: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(rating, Rating::Four);
    }

    #[test]
    fn test_rating_clamps_out_of_scale() {
        assert_eq!(Rating::from_value(1.0), Rating::Four);
        assert_eq!(Rating::from_value(4.6), Rating::FourHalf);
        assert_eq!(Rating::from_value(9.0), Rating::Five);
    }
}
