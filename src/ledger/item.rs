use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Replaces NaN/infinite values with 0 so arithmetic stays well-defined.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn fresh_id() -> Uuid {
    Uuid::new_v4()
}

/// A single income row. `amount` is always numeric in the model; formatted
/// text lives only at the edit surface.
///
/// Ids identify rows across edits within a session and are not part of the
/// persisted document, which keeps the legacy `{description, amount}`
/// wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeItem {
    #[serde(skip, default = "fresh_id")]
    pub id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
}

impl IncomeItem {
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        Self {
            id: fresh_id(),
            description: description.into(),
            amount,
        }
    }

    pub fn empty() -> Self {
        Self::new("", 0.0)
    }
}

/// A single expense row with the percentage that derives its "second floor"
/// share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseItem {
    #[serde(skip, default = "fresh_id")]
    pub id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub percentage: f64,
}

impl ExpenseItem {
    pub fn new(description: impl Into<String>, amount: f64, percentage: f64) -> Self {
        Self {
            id: fresh_id(),
            description: description.into(),
            amount,
            percentage,
        }
    }

    pub fn empty() -> Self {
        Self::new("", 0.0, 0.0)
    }

    /// The secondary amount derived from this expense:
    /// `amount × percentage / 100`.
    pub fn second_floor(&self) -> f64 {
        finite_or_zero(self.amount) * finite_or_zero(self.percentage) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_floor_is_percentage_share() {
        let item = ExpenseItem::new("Arriendo", 40_000.0, 10.0);
        assert!((item.second_floor() - 4_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn second_floor_treats_non_finite_as_zero() {
        let item = ExpenseItem::new("Luz", f64::NAN, 50.0);
        assert_eq!(item.second_floor(), 0.0);
    }

    #[test]
    fn ids_survive_serde_roundtrip_as_fresh_values() {
        let item = IncomeItem::new("Sueldo", 100.0);
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("id"), "ids must stay out of the document");
        let back: IncomeItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.description, "Sueldo");
        assert_ne!(back.id, item.id);
    }
}
