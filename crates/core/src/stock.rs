//! Low-stock classification shared by alerting and reporting.

use serde::{Deserialize, Serialize};

/// Threshold applied when a product has no `min_stock` configured.
pub const DEFAULT_MIN_STOCK: i64 = 5;

/// Severity of a low-stock condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// Out of stock.
    Critical,
    /// At or below the minimum but not empty.
    Warning,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
        }
    }
}

/// Effective minimum for a product, applying [`DEFAULT_MIN_STOCK`].
pub fn effective_min_stock(min_stock: Option<i64>) -> i64 {
    min_stock.unwrap_or(DEFAULT_MIN_STOCK)
}

/// Classify a stock level against its minimum.
///
/// Returns `None` when the quantity is above the minimum.
pub fn classify(quantity: i64, min_stock: Option<i64>) -> Option<StockStatus> {
    let min = effective_min_stock(min_stock);
    if quantity > min {
        None
    } else if quantity <= 0 {
        Some(StockStatus::Critical)
    } else {
        Some(StockStatus::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stock_is_critical() {
        assert_eq!(classify(0, Some(5)), Some(StockStatus::Critical));
    }

    #[test]
    fn stock_below_minimum_is_warning() {
        assert_eq!(classify(3, Some(5)), Some(StockStatus::Warning));
    }

    #[test]
    fn stock_equal_to_minimum_is_warning() {
        assert_eq!(classify(5, Some(5)), Some(StockStatus::Warning));
    }

    #[test]
    fn stock_above_minimum_has_no_alert() {
        assert_eq!(classify(6, Some(5)), None);
    }

    #[test]
    fn missing_minimum_uses_default() {
        assert_eq!(classify(5, None), Some(StockStatus::Warning));
        assert_eq!(classify(6, None), None);
    }

    #[test]
    fn zero_minimum_only_alerts_when_empty() {
        assert_eq!(classify(0, Some(0)), Some(StockStatus::Critical));
        assert_eq!(classify(1, Some(0)), None);
    }
}
