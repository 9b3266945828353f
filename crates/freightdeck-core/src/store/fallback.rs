// ── Built-in fallback datasets ──
//
// When the backend cannot serve a read, the stores swap in these
// deterministic datasets so the dashboard stays usable offline. The
// records are realistic and cover every tier, status, transport mode,
// and risk band that the analytics layer buckets by. Timestamps are
// offsets from now so "recent activity" views stay plausible.

use chrono::{Duration, Utc};

use crate::model::{
    AccountStatus, Client, ClientTier, Dimensions, Driver, Product, RiskLevel, Shipment,
    ShipmentStatus, Transporter,
};

/// Entity families that carry a built-in offline dataset.
pub trait Fallback: Sized {
    fn fallback_dataset() -> Vec<Self>;
}

#[allow(clippy::too_many_arguments)]
fn client(
    id: u64,
    name: &str,
    company: &str,
    region: &str,
    industry: &str,
    status: AccountStatus,
    monthly_value: f64,
    risk_score: f64,
    total_shipments: u64,
    satisfaction_score: f64,
    days_since_last_shipment: i64,
) -> Client {
    let now = Utc::now();
    Client {
        id,
        name: name.to_owned(),
        email: format!(
            "{}@{}.example",
            name.split_whitespace()
                .next()
                .unwrap_or("contact")
                .to_lowercase(),
            company.to_lowercase().replace(' ', "")
        ),
        company: company.to_owned(),
        phone: format!("+1 555 01{id:02}"),
        address: format!("{id} Harbor Way"),
        region: Some(region.to_owned()),
        industry: Some(industry.to_owned()),
        tier: ClientTier::from_monthly_value(monthly_value),
        status,
        monthly_value,
        risk_score,
        total_shipments,
        satisfaction_score,
        created_at: Some(now - Duration::days(400 - i64::try_from(id).unwrap_or(0) * 30)),
        last_shipment: Some(now - Duration::days(days_since_last_shipment)),
    }
}

impl Fallback for Client {
    fn fallback_dataset() -> Vec<Self> {
        vec![
            client(
                1,
                "Maria Santos",
                "Atlantic Retail",
                "North America",
                "Retail",
                AccountStatus::Active,
                12_500.0,
                0.04,
                142,
                4.7,
                2,
            ),
            client(
                2,
                "James Chen",
                "Pacific Components",
                "Asia Pacific",
                "Electronics",
                AccountStatus::Active,
                8_200.0,
                0.08,
                97,
                4.4,
                5,
            ),
            client(
                3,
                "Ingrid Olsen",
                "Fjord Foods",
                "Europe",
                "Food & Beverage",
                AccountStatus::Active,
                6_400.0,
                0.15,
                63,
                4.1,
                9,
            ),
            client(
                4,
                "Ahmed Hassan",
                "Gulf Textiles",
                "Middle East",
                "Textiles",
                AccountStatus::Active,
                3_100.0,
                0.12,
                41,
                3.9,
                14,
            ),
            client(
                5,
                "Lucia Ferreira",
                "Andes Mining Supply",
                "South America",
                "Industrial",
                AccountStatus::Pending,
                2_750.0,
                0.22,
                18,
                3.6,
                30,
            ),
            client(
                6,
                "Tom Becker",
                "Rhine Pharma",
                "Europe",
                "Pharmaceutical",
                AccountStatus::Active,
                15_800.0,
                0.06,
                201,
                4.8,
                1,
            ),
            client(
                7,
                "Grace Okafor",
                "Lagos Agritrade",
                "Africa",
                "Agriculture",
                AccountStatus::UnderReview,
                950.0,
                0.31,
                7,
                3.2,
                60,
            ),
            client(
                8,
                "Ken Tanaka",
                "Sakura Autoparts",
                "Asia Pacific",
                "Automotive",
                AccountStatus::Active,
                4_600.0,
                0.09,
                55,
                4.3,
                7,
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn transporter(
    id: u64,
    name: &str,
    regions: &[&str],
    modes: &[&str],
    reliability_score: f64,
    performance_rating: f64,
    risk_score: f64,
    status: AccountStatus,
    total_shipments: u64,
    on_time_deliveries: u64,
) -> Transporter {
    Transporter {
        id,
        name: name.to_owned(),
        email: format!("dispatch@{}.example", name.to_lowercase().replace(' ', "")),
        phone: format!("+44 555 02{id:02}"),
        regions_covered: regions.iter().map(|r| (*r).to_owned()).collect(),
        transport_modes: modes.iter().map(|m| (*m).to_owned()).collect(),
        reliability_score,
        performance_rating,
        risk_score,
        status,
        total_shipments,
        on_time_deliveries,
        created_at: Some(Utc::now() - Duration::days(700 - i64::try_from(id).unwrap_or(0) * 45)),
    }
}

impl Fallback for Transporter {
    fn fallback_dataset() -> Vec<Self> {
        vec![
            transporter(
                1,
                "Nordic Freight Lines",
                &["Europe", "North America"],
                &["sea", "land"],
                0.96,
                4.6,
                0.05,
                AccountStatus::Active,
                820,
                792,
            ),
            transporter(
                2,
                "TransPacific Cargo",
                &["Asia Pacific", "North America"],
                &["sea", "air"],
                0.91,
                4.2,
                0.09,
                AccountStatus::Active,
                1_140,
                1_031,
            ),
            transporter(
                3,
                "Sahara Overland",
                &["Africa", "Middle East"],
                &["land"],
                0.84,
                3.8,
                0.18,
                AccountStatus::Active,
                305,
                252,
            ),
            transporter(
                4,
                "Alpine Express Rail",
                &["Europe"],
                &["rail", "land"],
                0.93,
                4.4,
                0.07,
                AccountStatus::Active,
                610,
                571,
            ),
            transporter(
                5,
                "Condor Airfreight",
                &["South America", "North America"],
                &["air"],
                0.88,
                4.0,
                0.14,
                AccountStatus::Pending,
                190,
                164,
            ),
            transporter(
                6,
                "Meridian Shipping Co",
                &["Asia Pacific", "Europe", "Middle East"],
                &["sea"],
                0.72,
                3.1,
                0.27,
                AccountStatus::UnderReview,
                95,
                66,
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn shipment(
    id: u64,
    client_id: u64,
    transporter_id: u64,
    origin: &str,
    destination: &str,
    status: ShipmentStatus,
    transport_mode: &str,
    weight_kg: f64,
    total_cost: f64,
    risk_score: f64,
    days_ago: i64,
) -> Shipment {
    Shipment {
        id,
        client_id,
        product_id: Some((id % 5) + 1),
        driver_id: if transport_mode == "land" {
            Some((id % 4) + 1)
        } else {
            None
        },
        transporter_id: Some(transporter_id),
        origin: origin.to_owned(),
        destination: destination.to_owned(),
        status,
        transport_mode: transport_mode.to_owned(),
        weight_kg,
        dimensions: Some(Dimensions::new(120.0, 80.0, 100.0)),
        special_services: Vec::new(),
        confidence_score: 0.9,
        route_distance_m: Some(weight_kg * 1_000.0),
        route_duration_s: Some(weight_kg * 360.0),
        total_cost: Some(total_cost),
        risk_level: RiskLevel::classify(risk_score),
        created_at: Some(Utc::now() - Duration::days(days_ago)),
    }
}

impl Fallback for Shipment {
    fn fallback_dataset() -> Vec<Self> {
        vec![
            shipment(
                1,
                1,
                2,
                "Shanghai",
                "Los Angeles",
                ShipmentStatus::InTransit,
                "sea",
                2_400.0,
                9_850.0,
                0.08,
                3,
            ),
            shipment(
                2,
                6,
                5,
                "Frankfurt",
                "Sao Paulo",
                ShipmentStatus::InTransit,
                "air",
                320.0,
                12_400.0,
                0.05,
                1,
            ),
            shipment(
                3,
                2,
                2,
                "Shenzhen",
                "Seattle",
                ShipmentStatus::Delivered,
                "sea",
                5_100.0,
                18_300.0,
                0.04,
                21,
            ),
            shipment(
                4,
                3,
                4,
                "Oslo",
                "Milan",
                ShipmentStatus::Delivered,
                "rail",
                860.0,
                2_150.0,
                0.12,
                14,
            ),
            shipment(
                5,
                4,
                3,
                "Dubai",
                "Nairobi",
                ShipmentStatus::Delayed,
                "land",
                1_250.0,
                3_900.0,
                0.24,
                8,
            ),
            shipment(
                6,
                8,
                2,
                "Nagoya",
                "Vancouver",
                ShipmentStatus::Pending,
                "sea",
                3_700.0,
                11_050.0,
                0.10,
                0,
            ),
            shipment(
                7,
                6,
                1,
                "Basel",
                "Boston",
                ShipmentStatus::InTransit,
                "sea",
                410.0,
                4_600.0,
                0.06,
                5,
            ),
            shipment(
                8,
                5,
                6,
                "Valparaiso",
                "Rotterdam",
                ShipmentStatus::Delayed,
                "sea",
                6_800.0,
                15_700.0,
                0.29,
                11,
            ),
        ]
    }
}

fn driver(
    id: u64,
    name: &str,
    vehicle_type: &str,
    capacity_kg: f64,
    availability: bool,
    location: &str,
    rating: f64,
) -> Driver {
    Driver {
        id,
        name: name.to_owned(),
        license_number: format!("DL-{:06}", id * 7_919),
        phone: format!("+1 555 03{id:02}"),
        email: format!(
            "{}@freightdeck.example",
            name.to_lowercase().replace(' ', ".")
        ),
        vehicle_type: vehicle_type.to_owned(),
        capacity_kg,
        availability,
        current_location: Some(location.to_owned()),
        rating,
        created_at: Some(Utc::now() - Duration::days(500 - i64::try_from(id).unwrap_or(0) * 60)),
    }
}

impl Fallback for Driver {
    fn fallback_dataset() -> Vec<Self> {
        vec![
            driver(1, "Carlos Reyes", "semi_truck", 18_000.0, true, "Phoenix", 4.8),
            driver(2, "Dana Wells", "box_truck", 4_500.0, true, "Chicago", 4.5),
            driver(3, "Yusuf Demir", "refrigerated_truck", 9_000.0, false, "Istanbul", 4.2),
            driver(4, "Petra Nagy", "flatbed", 12_000.0, true, "Budapest", 4.6),
        ]
    }
}

fn product(id: u64, name: &str, category: &str, weight_kg: f64, dims: Dimensions, value: f64) -> Product {
    Product {
        id,
        name: name.to_owned(),
        category: category.to_owned(),
        weight_kg,
        dimensions: dims,
        value,
        created_at: Some(Utc::now() - Duration::days(200)),
    }
}

impl Fallback for Product {
    fn fallback_dataset() -> Vec<Self> {
        vec![
            product(
                1,
                "Lithium Battery Pack",
                "Electronics",
                12.5,
                Dimensions::new(40.0, 30.0, 20.0),
                850.0,
            ),
            product(
                2,
                "Frozen Salmon Pallet",
                "Food & Beverage",
                450.0,
                Dimensions::new(120.0, 100.0, 140.0),
                6_200.0,
            ),
            product(
                3,
                "Industrial Pump Assembly",
                "Industrial",
                310.0,
                Dimensions::new(90.0, 70.0, 110.0),
                14_500.0,
            ),
            product(
                4,
                "Cotton Fabric Rolls",
                "Textiles",
                180.0,
                Dimensions::new(200.0, 60.0, 60.0),
                2_300.0,
            ),
            product(
                5,
                "Vaccine Cold Chain Kit",
                "Pharmaceutical",
                28.0,
                Dimensions::new(60.0, 50.0, 50.0),
                9_800.0,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn datasets_are_non_empty_with_unique_ids() {
        fn check<T: Fallback>(ids: impl Fn(&T) -> u64) {
            let items = T::fallback_dataset();
            assert!(!items.is_empty());
            let mut seen: Vec<u64> = items.iter().map(ids).collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), items.len());
        }
        check::<Client>(|c| c.id);
        check::<Transporter>(|t| t.id);
        check::<Shipment>(|s| s.id);
        check::<Driver>(|d| d.id);
        check::<Product>(|p| p.id);
    }

    #[test]
    fn client_dataset_covers_every_tier() {
        let clients = Client::fallback_dataset();
        for tier in ClientTier::iter() {
            assert!(
                clients.iter().any(|c| c.tier == tier),
                "no fallback client in tier {tier}"
            );
        }
    }

    #[test]
    fn shipment_dataset_covers_every_real_risk_band() {
        let shipments = Shipment::fallback_dataset();
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert!(shipments.iter().any(|s| s.risk_level == level));
        }
    }

    #[test]
    fn shipment_foreign_keys_resolve_against_sibling_datasets() {
        let clients = Client::fallback_dataset();
        let transporters = Transporter::fallback_dataset();
        for s in Shipment::fallback_dataset() {
            assert!(clients.iter().any(|c| c.id == s.client_id));
            if let Some(tid) = s.transporter_id {
                assert!(transporters.iter().any(|t| t.id == tid));
            }
        }
    }
}
