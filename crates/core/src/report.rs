//! Report summary aggregation.
//!
//! Pure logic -- the caller fetches orders, line items, products, clients and
//! inventory and passes them in together with the current instant. Every
//! metric is independent; malformed rows are skipped rather than failing the
//! whole summary.

use std::collections::HashMap;

use chrono::{Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::records::{Client, InventoryItem, Order, OrderItem, Product};
use crate::stock::{classify, effective_min_stock, StockStatus};
use crate::types::{DbId, Timestamp};

/// Default number of entries in the top-products and top-clients rankings.
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Upper bound for a caller-supplied ranking size.
pub const MAX_TOP_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// Metric selection
// ---------------------------------------------------------------------------

/// One independently computable section of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Sales,
    Orders,
    TopProducts,
    TopClients,
    InventoryAlerts,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Sales,
        Metric::Orders,
        Metric::TopProducts,
        Metric::TopClients,
        Metric::InventoryAlerts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Orders => "orders",
            Self::TopProducts => "top_products",
            Self::TopClients => "top_clients",
            Self::InventoryAlerts => "inventory_alerts",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(Metric::as_str).collect();
                CoreError::Validation(format!(
                    "Unknown metric: '{s}'. Valid metrics: {}",
                    valid.join(", ")
                ))
            })
    }

    /// Parse a comma-separated list such as `"sales,top_clients"`.
    ///
    /// Blank entries are ignored; unknown names are a validation error.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, CoreError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }
}

/// Inclusive calendar-date window. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(CoreError::Validation(format!(
                "start_date ({start}) must not be after end_date ({end})"
            ))),
            _ => Ok(()),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}

/// Which sections to compute and how.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// `None` computes every metric.
    pub metrics: Option<Vec<Metric>>,
    /// Restricts the rankings to orders created inside the window.
    pub date_range: Option<DateRange>,
    pub top_limit: usize,
}

impl ReportRequest {
    fn wants(&self, metric: Metric) -> bool {
        self.metrics
            .as_ref()
            .map_or(true, |metrics| metrics.contains(&metric))
    }
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            metrics: None,
            date_range: None,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Borrowed raw collections the summary is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportInput<'a> {
    pub orders: &'a [Order],
    pub order_items: &'a [OrderItem],
    pub products: &'a [Product],
    pub clients: &'a [Client],
    pub inventory: &'a [InventoryItem],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesSummary {
    pub today: f64,
    pub yesterday: f64,
    pub month: f64,
    pub year: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
    pub today: u64,
    pub month: u64,
    pub year: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub product_id: DbId,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopClient {
    pub client_id: DbId,
    pub name: String,
    pub total: f64,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryAlertRow {
    pub product_id: DbId,
    pub name: String,
    pub stock: i64,
    pub min_stock: i64,
    pub status: StockStatus,
}

/// The computed summary. Sections that were not requested are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<SalesSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<OrderCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_products: Option<Vec<TopProduct>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_clients: Option<Vec<TopClient>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_alerts: Option<Vec<InventoryAlertRow>>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute the requested sections.
///
/// Calendar boundaries (today, yesterday, month, year) are taken in the
/// business time zone `offset`.
pub fn summarize(
    input: &ReportInput<'_>,
    request: &ReportRequest,
    now: Timestamp,
    offset: FixedOffset,
) -> ReportSummary {
    let today = now.with_timezone(&offset).date_naive();
    let local_date = |ts: Timestamp| ts.with_timezone(&offset).date_naive();

    ReportSummary {
        sales: request
            .wants(Metric::Sales)
            .then(|| sales(input.orders, today, local_date)),
        orders: request
            .wants(Metric::Orders)
            .then(|| order_counts(input.orders, today, local_date)),
        top_products: request
            .wants(Metric::TopProducts)
            .then(|| top_products(input, request, local_date)),
        top_clients: request
            .wants(Metric::TopClients)
            .then(|| top_clients(input, request, local_date)),
        inventory_alerts: request
            .wants(Metric::InventoryAlerts)
            .then(|| inventory_alerts(input.inventory, input.products)),
    }
}

/// Calendar buckets an order date falls into relative to `today`.
struct Buckets {
    today: bool,
    yesterday: bool,
    month: bool,
    year: bool,
}

fn buckets(date: NaiveDate, today: NaiveDate) -> Buckets {
    let not_future = date <= today;
    let year = not_future && date.year() == today.year();
    Buckets {
        today: date == today,
        yesterday: today.pred_opt() == Some(date),
        month: year && date.month() == today.month(),
        year,
    }
}

fn sales(
    orders: &[Order],
    today: NaiveDate,
    local_date: impl Fn(Timestamp) -> NaiveDate,
) -> SalesSummary {
    let mut summary = SalesSummary::default();
    for order in orders.iter().filter(|o| o.total.is_finite()) {
        let b = buckets(local_date(order.created_at), today);
        if b.today {
            summary.today += order.total;
        }
        if b.yesterday {
            summary.yesterday += order.total;
        }
        if b.month {
            summary.month += order.total;
        }
        if b.year {
            summary.year += order.total;
        }
    }
    summary
}

fn order_counts(
    orders: &[Order],
    today: NaiveDate,
    local_date: impl Fn(Timestamp) -> NaiveDate,
) -> OrderCounts {
    let mut counts = OrderCounts::default();
    for order in orders {
        let b = buckets(local_date(order.created_at), today);
        counts.today += u64::from(b.today);
        counts.month += u64::from(b.month);
        counts.year += u64::from(b.year);
    }
    counts
}

fn top_products(
    input: &ReportInput<'_>,
    request: &ReportRequest,
    local_date: impl Fn(Timestamp) -> NaiveDate,
) -> Vec<TopProduct> {
    let order_dates: HashMap<DbId, NaiveDate> = input
        .orders
        .iter()
        .map(|o| (o.id, local_date(o.created_at)))
        .collect();
    let names: HashMap<DbId, &str> = input
        .products
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let mut totals: HashMap<DbId, (i64, f64)> = HashMap::new();
    for item in input.order_items {
        let Some(product_id) = item.product_id else {
            continue;
        };
        if !item.price.is_finite() {
            continue;
        }
        if let Some(range) = &request.date_range {
            match order_dates.get(&item.order_id) {
                Some(date) if range.contains(*date) => {}
                _ => continue,
            }
        }
        let entry = totals.entry(product_id).or_default();
        entry.0 += item.quantity;
        entry.1 += item.quantity as f64 * item.price;
    }

    let mut ranked: Vec<TopProduct> = totals
        .into_iter()
        .map(|(product_id, (quantity, revenue))| TopProduct {
            product_id,
            name: names
                .get(&product_id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("Producto #{product_id}")),
            quantity,
            revenue,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then(a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(request.top_limit);
    ranked
}

fn top_clients(
    input: &ReportInput<'_>,
    request: &ReportRequest,
    local_date: impl Fn(Timestamp) -> NaiveDate,
) -> Vec<TopClient> {
    let names: HashMap<DbId, &str> = input
        .clients
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut totals: HashMap<DbId, (f64, u64)> = HashMap::new();
    for order in input.orders {
        let Some(client_id) = order.client_id else {
            continue;
        };
        if !order.total.is_finite() {
            continue;
        }
        if let Some(range) = &request.date_range {
            if !range.contains(local_date(order.created_at)) {
                continue;
            }
        }
        let entry = totals.entry(client_id).or_default();
        entry.0 += order.total;
        entry.1 += 1;
    }

    let mut ranked: Vec<TopClient> = totals
        .into_iter()
        .map(|(client_id, (total, order_count))| TopClient {
            client_id,
            name: names
                .get(&client_id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("Cliente #{client_id}")),
            total,
            order_count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then(a.client_id.cmp(&b.client_id))
    });
    ranked.truncate(request.top_limit);
    ranked
}

/// Inventory rows at or below their product's minimum.
///
/// Rows referencing an unknown product are skipped.
pub fn inventory_alerts(inventory: &[InventoryItem], products: &[Product]) -> Vec<InventoryAlertRow> {
    let products: HashMap<DbId, &Product> = products.iter().map(|p| (p.id, p)).collect();

    inventory
        .iter()
        .filter_map(|item| {
            let product = products.get(&item.product_id)?;
            let status = classify(item.quantity, product.min_stock)?;
            Some(InventoryAlertRow {
                product_id: product.id,
                name: product.name.clone(),
                stock: item.quantity,
                min_stock: effective_min_stock(product.min_stock),
                status,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
