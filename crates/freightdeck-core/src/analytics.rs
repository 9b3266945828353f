//! Pure aggregation and table-query helpers.
//!
//! Everything here is a function over slices; nothing touches the
//! network or the stores. Grouping uses `IndexMap` so bucket order is
//! first-encounter order and stays stable across reruns on the same
//! data, which keeps dashboard charts from reshuffling on every render.

use indexmap::IndexMap;

use crate::model::{Client, RiskLevel, Shipment, ShipmentStatus, Transporter};

// ── Scalar aggregates ───────────────────────────────────────────────

pub fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(item)).count()
}

pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

/// Mean of a numeric field; 0.0 for an empty slice rather than NaN so
/// dashboard tiles render a number either way.
pub fn average_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        0.0
    } else {
        sum_by(items, value) / items.len() as f64
    }
}

// ── Grouping ────────────────────────────────────────────────────────

/// Bucket name for records whose grouping key is absent.
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// Group records by a single optional key. Records without a key land
/// in the [`UNKNOWN_BUCKET`]; buckets appear in first-encounter order.
pub fn group_by<'a, T>(
    items: &'a [T],
    key: impl Fn(&T) -> Option<String>,
) -> IndexMap<String, Vec<&'a T>> {
    let mut groups: IndexMap<String, Vec<&'a T>> = IndexMap::new();
    for item in items {
        let bucket = key(item).unwrap_or_else(|| UNKNOWN_BUCKET.to_owned());
        groups.entry(bucket).or_default().push(item);
    }
    groups
}

/// Group records that belong to several buckets at once (a transporter
/// covering three regions appears under all three). A record with no
/// keys lands in the [`UNKNOWN_BUCKET`].
pub fn group_by_multi<'a, T>(
    items: &'a [T],
    keys: impl Fn(&T) -> Vec<String>,
) -> IndexMap<String, Vec<&'a T>> {
    let mut groups: IndexMap<String, Vec<&'a T>> = IndexMap::new();
    for item in items {
        let buckets = keys(item);
        if buckets.is_empty() {
            groups
                .entry(UNKNOWN_BUCKET.to_owned())
                .or_default()
                .push(item);
        } else {
            for bucket in buckets {
                groups.entry(bucket).or_default().push(item);
            }
        }
    }
    groups
}

/// Shipment counts per status, in first-encounter order.
pub fn status_distribution(shipments: &[Shipment]) -> IndexMap<String, usize> {
    group_by(shipments, |s| Some(s.status.to_string()))
        .into_iter()
        .map(|(status, group)| (status, group.len()))
        .collect()
}

// ── Risk ────────────────────────────────────────────────────────────

/// Counts per risk band over a filtered population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub total: usize,
}

/// Bucket records by risk score, restricted to those `included` admits
/// (typically the active ones; dormant accounts would skew the bands).
pub fn risk_breakdown<T>(
    items: &[T],
    score: impl Fn(&T) -> f64,
    included: impl Fn(&T) -> bool,
) -> RiskBreakdown {
    let mut breakdown = RiskBreakdown::default();
    for item in items.iter().filter(|item| included(item)) {
        match RiskLevel::classify(score(item)) {
            RiskLevel::Low => breakdown.low += 1,
            RiskLevel::Medium => breakdown.medium += 1,
            RiskLevel::High | RiskLevel::Unknown => breakdown.high += 1,
        }
        breakdown.total += 1;
    }
    breakdown
}

// ── Rankings ────────────────────────────────────────────────────────

/// Top `n` records by a numeric key, descending. The sort is stable, so
/// ties keep their input order and the result is deterministic.
pub fn top_n_by<T: Clone>(items: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut ranked: Vec<T> = items.to_vec();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked.truncate(n);
    ranked
}

/// Number of rows the dashboard's leaderboard panels show.
pub const LEADERBOARD_SIZE: usize = 5;

/// The five highest-value active clients, descending by monthly value.
pub fn top_clients_by_value(clients: &[Client]) -> Vec<Client> {
    let active: Vec<Client> = clients
        .iter()
        .filter(|c| c.status.is_active())
        .cloned()
        .collect();
    top_n_by(&active, LEADERBOARD_SIZE, |c| c.monthly_value)
}

/// The five most recently created shipments, newest first. Shipments
/// without a creation timestamp sort last.
pub fn recent_shipments(shipments: &[Shipment]) -> Vec<Shipment> {
    let mut recent: Vec<Shipment> = shipments.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(LEADERBOARD_SIZE);
    recent
}

/// On-time rate over completed shipments: delivered out of delivered
/// plus delayed. Pending and in-transit shipments have no outcome yet
/// and are excluded; 0.0 when nothing has completed.
pub fn shipment_on_time_rate(shipments: &[Shipment]) -> f64 {
    let delivered = count_where(shipments, |s| s.status == ShipmentStatus::Delivered);
    let delayed = count_where(shipments, |s| s.status == ShipmentStatus::Delayed);
    if delivered + delayed == 0 {
        0.0
    } else {
        delivered as f64 / (delivered + delayed) as f64
    }
}

/// Overall on-time rate across transporters, weighted by shipment
/// volume. 0.0 when no shipments have completed.
pub fn on_time_delivery_rate(transporters: &[Transporter]) -> f64 {
    let total: u64 = transporters.iter().map(|t| t.total_shipments).sum();
    if total == 0 {
        0.0
    } else {
        let on_time: u64 = transporters.iter().map(|t| t.on_time_deliveries).sum();
        on_time as f64 / total as f64
    }
}

// ── Table queries ───────────────────────────────────────────────────

/// A field value as the table layer sees it. Strings compare
/// case-insensitively for both filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl FieldValue {
    fn matches_filter(&self, wanted: &str) -> bool {
        match self {
            Self::Str(s) => s.eq_ignore_ascii_case(wanted),
            Self::Num(n) => wanted.parse::<f64>().is_ok_and(|w| (n - w).abs() < 1e-9),
            Self::Bool(b) => wanted.parse::<bool>().is_ok_and(|w| *b == w),
        }
    }

    fn compare(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Num(a), Self::Num(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            // Mixed types should not happen for a well-formed field; fall
            // back to a stable but arbitrary order.
            _ => std::cmp::Ordering::Equal,
        }
    }
}

/// Records that can appear in a filterable, sortable table.
pub trait Tabular {
    /// Value of a named column, `None` for unknown names.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Columns the free-text search scans.
    fn search_fields() -> &'static [&'static str];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Declarative table query: exact-match column filters, a free-text
/// search over the record's search fields, and an optional sort.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    pub filters: IndexMap<String, String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub direction: SortDirection,
}

impl TableQuery {
    fn admits<T: Tabular>(&self, item: &T) -> bool {
        for (column, wanted) in &self.filters {
            // A filter on a column the record lacks admits nothing.
            let matched = item
                .field(column)
                .is_some_and(|value| value.matches_filter(wanted));
            if !matched {
                return false;
            }
        }

        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            return T::search_fields().iter().any(|column| {
                matches!(
                    item.field(column),
                    Some(FieldValue::Str(s)) if s.to_lowercase().contains(&needle)
                )
            });
        }
        true
    }
}

/// Apply a [`TableQuery`]: filter, then search, then stable-sort.
pub fn apply_query<T: Tabular + Clone>(items: &[T], query: &TableQuery) -> Vec<T> {
    let mut rows: Vec<T> = items
        .iter()
        .filter(|item| query.admits(*item))
        .cloned()
        .collect();

    if let Some(column) = &query.sort_by {
        rows.sort_by(|a, b| {
            let ord = match (a.field(column), b.field(column)) {
                (Some(a), Some(b)) => a.compare(&b),
                // Records missing the sort column sink to the end.
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            match query.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    rows
}

// ── Tabular implementations ─────────────────────────────────────────

impl Tabular for Client {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Str(self.name.clone())),
            "email" => Some(FieldValue::Str(self.email.clone())),
            "company" => Some(FieldValue::Str(self.company.clone())),
            "region" => self.region.clone().map(FieldValue::Str),
            "industry" => self.industry.clone().map(FieldValue::Str),
            "tier" => Some(FieldValue::Str(self.tier.to_string())),
            "status" => Some(FieldValue::Str(self.status.to_string())),
            "monthly_value" => Some(FieldValue::Num(self.monthly_value)),
            "risk_score" => Some(FieldValue::Num(self.risk_score)),
            "total_shipments" => Some(FieldValue::Num(self.total_shipments as f64)),
            "satisfaction_score" => Some(FieldValue::Num(self.satisfaction_score)),
            _ => None,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "email", "company", "region", "industry"]
    }
}

impl Tabular for Transporter {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Str(self.name.clone())),
            "email" => Some(FieldValue::Str(self.email.clone())),
            "status" => Some(FieldValue::Str(self.status.to_string())),
            "reliability_score" => Some(FieldValue::Num(self.reliability_score)),
            "performance_rating" => Some(FieldValue::Num(self.performance_rating)),
            "risk_score" => Some(FieldValue::Num(self.risk_score)),
            "total_shipments" => Some(FieldValue::Num(self.total_shipments as f64)),
            "on_time_rate" => Some(FieldValue::Num(self.on_time_rate())),
            _ => None,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "email"]
    }
}

impl Tabular for Shipment {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "origin" => Some(FieldValue::Str(self.origin.clone())),
            "destination" => Some(FieldValue::Str(self.destination.clone())),
            "status" => Some(FieldValue::Str(self.status.to_string())),
            "transport_mode" => Some(FieldValue::Str(self.transport_mode.clone())),
            "risk_level" => Some(FieldValue::Str(self.risk_level.to_string())),
            "weight_kg" => Some(FieldValue::Num(self.weight_kg)),
            "total_cost" => self.total_cost.map(FieldValue::Num),
            "confidence_score" => Some(FieldValue::Num(self.confidence_score)),
            _ => None,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["origin", "destination", "transport_mode"]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::AccountStatus;
    use crate::store::Fallback;

    fn sample_clients() -> Vec<Client> {
        Client::fallback_dataset()
    }

    #[test]
    fn average_of_empty_slice_is_zero() {
        let empty: Vec<Client> = Vec::new();
        assert_eq!(average_by(&empty, |c| c.monthly_value), 0.0);
    }

    #[test]
    fn group_by_buckets_in_first_encounter_order() {
        let clients = sample_clients();
        let by_region = group_by(&clients, |c| c.region.clone());
        let regions: Vec<&String> = by_region.keys().collect();
        // First client is North American, second is Asia Pacific.
        assert_eq!(regions[0], "North America");
        assert_eq!(regions[1], "Asia Pacific");
        let total: usize = by_region.values().map(Vec::len).sum();
        assert_eq!(total, clients.len());
    }

    #[test]
    fn group_by_sends_missing_keys_to_unknown() {
        let mut clients = sample_clients();
        clients[0].region = None;
        let by_region = group_by(&clients, |c| c.region.clone());
        assert_eq!(by_region[UNKNOWN_BUCKET].len(), 1);
    }

    #[test]
    fn multi_bucket_grouping_fans_out_each_record() {
        let transporters = Transporter::fallback_dataset();
        let by_region = group_by_multi(&transporters, |t| t.regions_covered.clone());
        // Meridian covers three regions and must appear under all three.
        for region in ["Asia Pacific", "Europe", "Middle East"] {
            assert!(
                by_region[region]
                    .iter()
                    .any(|t| t.name == "Meridian Shipping Co")
            );
        }
    }

    #[test]
    fn risk_breakdown_counts_only_included_records() {
        let clients = sample_clients();
        let breakdown = risk_breakdown(&clients, |c| c.risk_score, |c| c.status.is_active());
        let active = clients.iter().filter(|c| c.status.is_active()).count();
        assert_eq!(breakdown.total, active);
        assert_eq!(
            breakdown.low + breakdown.medium + breakdown.high,
            breakdown.total
        );
        // The under-review high-risk client must not be counted.
        assert!(breakdown.total < clients.len());
    }

    #[test]
    fn top_n_is_descending_and_truncated() {
        let clients = sample_clients();
        let top = top_n_by(&clients, 3, |c| c.monthly_value);
        assert_eq!(top.len(), 3);
        assert!(top[0].monthly_value >= top[1].monthly_value);
        assert!(top[1].monthly_value >= top[2].monthly_value);
    }

    #[test]
    fn top_n_preserves_input_order_on_ties() {
        let mut clients = sample_clients();
        for c in &mut clients {
            c.monthly_value = 1_000.0;
        }
        let top = top_n_by(&clients, 4, |c| c.monthly_value);
        let ids: Vec<u64> = top.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn leaderboard_excludes_inactive_clients() {
        let clients = sample_clients();
        let top = top_clients_by_value(&clients);
        assert_eq!(top.len(), LEADERBOARD_SIZE);
        assert!(top.iter().all(|c| c.status.is_active()));
        // The under-review client outranks nobody because it never enters.
        assert!(top.iter().all(|c| c.company != "Lagos Agritrade"));
    }

    #[test]
    fn filter_search_sort_compose() {
        let clients = sample_clients();
        let mut query = TableQuery {
            sort_by: Some("name".to_owned()),
            ..TableQuery::default()
        };
        query
            .filters
            .insert("status".to_owned(), "active".to_owned());
        query.filters.insert("region".to_owned(), "Europe".to_owned());

        let rows = apply_query(&clients, &query);
        assert!(!rows.is_empty());
        for row in &rows {
            assert_eq!(row.status, AccountStatus::Active);
            assert_eq!(row.region.as_deref(), Some("Europe"));
        }
        let names: Vec<String> = rows.iter().map(|c| c.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let clients = sample_clients();
        let query = TableQuery {
            search: Some("PHARMA".to_owned()),
            ..TableQuery::default()
        };
        let rows = apply_query(&clients, &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "Rhine Pharma");
    }

    #[test]
    fn filter_on_missing_column_admits_nothing() {
        let clients = sample_clients();
        let mut query = TableQuery::default();
        query
            .filters
            .insert("favourite_color".to_owned(), "blue".to_owned());
        assert!(apply_query(&clients, &query).is_empty());
    }

    #[test]
    fn descending_numeric_sort() {
        let clients = sample_clients();
        let query = TableQuery {
            sort_by: Some("monthly_value".to_owned()),
            direction: SortDirection::Descending,
            ..TableQuery::default()
        };
        let rows = apply_query(&clients, &query);
        for pair in rows.windows(2) {
            assert!(pair[0].monthly_value >= pair[1].monthly_value);
        }
    }

    #[test]
    fn status_distribution_counts_every_shipment() {
        let shipments = Shipment::fallback_dataset();
        let dist = status_distribution(&shipments);
        let total: usize = dist.values().sum();
        assert_eq!(total, shipments.len());
        assert!(dist.contains_key("in_transit"));
    }

    #[test]
    fn recent_shipments_are_newest_first() {
        let shipments = Shipment::fallback_dataset();
        let recent = recent_shipments(&shipments);
        assert_eq!(recent.len(), LEADERBOARD_SIZE);
        for pair in recent.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        // Newest fallback shipment was created today.
        assert_eq!(recent[0].id, 6);
    }

    #[test]
    fn recent_shipments_sink_missing_timestamps() {
        let mut shipments = Shipment::fallback_dataset();
        shipments[5].created_at = None;
        let recent = recent_shipments(&shipments);
        assert!(recent.iter().all(|s| s.id != 6));
    }

    #[test]
    fn shipment_on_time_rate_ignores_unfinished_shipments() {
        let shipments = Shipment::fallback_dataset();
        // Two delivered, two delayed; pending and in-transit don't count.
        assert!((shipment_on_time_rate(&shipments) - 0.5).abs() < f64::EPSILON);
        assert_eq!(shipment_on_time_rate(&[]), 0.0);

        let only_open: Vec<Shipment> = shipments
            .into_iter()
            .filter(|s| {
                matches!(
                    s.status,
                    ShipmentStatus::Pending | ShipmentStatus::InTransit
                )
            })
            .collect();
        assert_eq!(shipment_on_time_rate(&only_open), 0.0);
    }

    #[test]
    fn on_time_rate_is_volume_weighted() {
        let transporters = Transporter::fallback_dataset();
        let rate = on_time_delivery_rate(&transporters);
        assert!(rate > 0.0 && rate < 1.0);
        assert_eq!(on_time_delivery_rate(&[]), 0.0);
    }
}
