//! Cost estimation and the local ETA placeholder.
//!
//! Two quote functions coexist deliberately. [`mode_priority_quote`] is
//! the carrier-style model: chargeable weight (actual vs dimensional)
//! times a per-mode rate and a priority multiplier, plus fuel surcharge
//! and a capped handling fee. [`flat_service_quote`] is the flat model:
//! a base fee plus linear weight/volume components and fixed per-service
//! fees. They answer different planning questions and are kept as
//! separately named functions rather than merged behind a flag.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use freightdeck_api::EtaPrediction;

use crate::model::Dimensions;

// ── Mode/priority model ─────────────────────────────────────────────

/// Per-kg base rates by transport mode.
const AIR_RATE: f64 = 15.0;
const SEA_RATE: f64 = 3.0;
const LAND_RATE: f64 = 2.5;
const RAIL_RATE: f64 = 2.0;

/// Kilograms billed per cubic metre of volume.
const DIMENSIONAL_WEIGHT_PER_M3: f64 = 250.0;
/// Estimated cubic metres per kilogram when dimensions are unknown.
const VOLUME_PER_KG_ESTIMATE: f64 = 0.000_1;

const FUEL_SURCHARGE_RATE: f64 = 0.15;
const HANDLING_FEE_RATE: f64 = 0.05;
const HANDLING_FEE_CAP: f64 = 50.0;

/// Itemized result of [`mode_priority_quote`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModePriorityBreakdown {
    pub chargeable_weight_kg: f64,
    pub base_cost: f64,
    pub fuel_surcharge: f64,
    pub handling_fee: f64,
    pub total: f64,
}

fn mode_rate(mode: &str) -> f64 {
    match mode {
        "air" => AIR_RATE,
        "sea" => SEA_RATE,
        "rail" => RAIL_RATE,
        // "land" and anything unrecognised bill at the land rate.
        _ => LAND_RATE,
    }
}

fn priority_multiplier(priority: &str) -> f64 {
    match priority {
        "high" => 1.8,
        "medium" => 1.3,
        // "low" and unrecognised priorities get no uplift.
        _ => 1.0,
    }
}

/// Quote a shipment by mode and priority.
///
/// When dimensions are given, the dimensional weight (volume at 250 kg
/// per cubic metre) competes with the actual weight and the larger one
/// is billed. Without dimensions, volume is estimated from weight and
/// actual weight effectively always wins.
pub fn mode_priority_quote(
    weight_kg: f64,
    mode: &str,
    priority: &str,
    dimensions: Option<&Dimensions>,
) -> ModePriorityBreakdown {
    let volume_m3 = match dimensions {
        Some(dims) => dims.volume_m3(),
        None => weight_kg * VOLUME_PER_KG_ESTIMATE,
    };

    let dimensional_weight = volume_m3 * DIMENSIONAL_WEIGHT_PER_M3;
    let chargeable_weight_kg = weight_kg.max(dimensional_weight);

    let base_cost = chargeable_weight_kg * mode_rate(mode) * priority_multiplier(priority);
    let fuel_surcharge = base_cost * FUEL_SURCHARGE_RATE;
    let handling_fee = (base_cost * HANDLING_FEE_RATE).min(HANDLING_FEE_CAP);

    ModePriorityBreakdown {
        chargeable_weight_kg,
        base_cost,
        fuel_surcharge,
        handling_fee,
        total: base_cost + fuel_surcharge + handling_fee,
    }
}

// ── Flat base-plus-services model ───────────────────────────────────

const FLAT_BASE_FEE: f64 = 100.0;
const FLAT_WEIGHT_RATE: f64 = 2.5;
const FLAT_VOLUME_RATE: f64 = 50.0;

/// Fixed fee per recognised special service. Unrecognised service names
/// contribute nothing rather than failing the quote.
fn service_fee(service: &str) -> f64 {
    match service {
        "temperature_controlled" => 150.0,
        "expedited_delivery" => 200.0,
        "fragile_handling" => 100.0,
        "hazmat_certified" => 300.0,
        "oversized_cargo" => 250.0,
        "bulk_cargo" => 50.0,
        "anti_static" => 75.0,
        "organic_certified" => 80.0,
        _ => 0.0,
    }
}

/// Itemized result of [`flat_service_quote`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlatServiceBreakdown {
    pub base_fee: f64,
    pub weight_cost: f64,
    pub volume_cost: f64,
    pub service_fees: f64,
    pub total: f64,
}

/// Quote a shipment on the flat model: base fee plus linear weight and
/// volume components plus per-service fees.
pub fn flat_service_quote(
    weight_kg: f64,
    dimensions: &Dimensions,
    services: &[String],
) -> FlatServiceBreakdown {
    let weight_cost = weight_kg * FLAT_WEIGHT_RATE;
    let volume_cost = dimensions.volume_m3() * FLAT_VOLUME_RATE;
    let service_fees: f64 = services.iter().map(|s| service_fee(s)).sum();

    FlatServiceBreakdown {
        base_fee: FLAT_BASE_FEE,
        weight_cost,
        volume_cost,
        service_fees,
        total: FLAT_BASE_FEE + weight_cost + volume_cost + service_fees,
    }
}

// ── Local ETA placeholder ───────────────────────────────────────────

const PREDICTION_FACTORS: [&str; 4] = ["weather", "traffic", "customs", "carrier_performance"];

/// Synthesize a plausible ETA prediction when the prediction backend is
/// unreachable: an arrival within the next week, confidence between 80
/// and 99, one to three contributing factors, and standing
/// recommendations. Clearly placeholder-grade; callers surface it as
/// degraded data, never as a live prediction.
pub fn mock_prediction(shipment_id: u64) -> EtaPrediction {
    let mut rng = rand::thread_rng();

    let hours_ahead: i64 = rng.gen_range(1..=7 * 24);
    let factor_count: usize = rng.gen_range(1..=3);
    let confidence: u8 = rng.gen_range(80..=99);
    let risk_level = ["low", "medium", "high"][rng.gen_range(0..3)];

    EtaPrediction {
        shipment_id,
        predicted_eta: Utc::now() + Duration::hours(hours_ahead),
        confidence: f64::from(confidence),
        factors: PREDICTION_FACTORS
            .choose_multiple(&mut rng, factor_count)
            .map(|f| (*f).to_owned())
            .collect(),
        risk_level: risk_level.to_owned(),
        recommendations: vec![
            "Monitor weather conditions in transit region".to_owned(),
            "Track carrier performance metrics".to_owned(),
            "Prepare alternative routing if needed".to_owned(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn air_high_priority_small_parcel() {
        // 10kg by air at high priority, no dimensions: actual weight wins
        // over the estimated dimensional weight (0.25kg), so the base is
        // 10 * 15.0 * 1.8 = 270, fuel 40.5, handling 13.5.
        let quote = mode_priority_quote(10.0, "air", "high", None);
        assert!(close(quote.chargeable_weight_kg, 10.0));
        assert!(close(quote.base_cost, 270.0));
        assert!(close(quote.fuel_surcharge, 40.5));
        assert!(close(quote.handling_fee, 13.5));
        assert!(close(quote.total, 324.0));
    }

    #[test]
    fn dimensional_weight_wins_for_bulky_light_cargo() {
        // 2 cubic metres at 250kg/m3 bills as 500kg even though the
        // actual weight is 20kg.
        let dims = Dimensions::new(200.0, 100.0, 100.0);
        let quote = mode_priority_quote(20.0, "sea", "low", Some(&dims));
        assert!(close(quote.chargeable_weight_kg, 500.0));
        assert!(close(quote.base_cost, 1_500.0));
    }

    #[test]
    fn handling_fee_caps_at_fifty() {
        let quote = mode_priority_quote(5_000.0, "sea", "low", None);
        assert!(close(quote.handling_fee, 50.0));
    }

    #[test]
    fn unknown_mode_and_priority_fall_back_to_defaults() {
        let quote = mode_priority_quote(100.0, "teleport", "asap", None);
        // land rate, no priority uplift
        assert!(close(quote.base_cost, 250.0));
    }

    #[test]
    fn quote_is_monotonic_in_weight() {
        let light = mode_priority_quote(10.0, "rail", "medium", None);
        let heavy = mode_priority_quote(11.0, "rail", "medium", None);
        assert!(heavy.total > light.total);
    }

    #[test]
    fn flat_quote_known_value() {
        // 10kg in a 1 cubic metre crate with temperature control and
        // expedited delivery: 100 + 25 + 50 + 350 = 525.
        let dims = Dimensions::new(100.0, 100.0, 100.0);
        let services = vec![
            "temperature_controlled".to_owned(),
            "expedited_delivery".to_owned(),
        ];
        let quote = flat_service_quote(10.0, &dims, &services);
        assert!(close(quote.base_fee, 100.0));
        assert!(close(quote.weight_cost, 25.0));
        assert!(close(quote.volume_cost, 50.0));
        assert!(close(quote.service_fees, 350.0));
        assert!(close(quote.total, 525.0));
    }

    #[test]
    fn unrecognised_service_contributes_nothing() {
        let dims = Dimensions::new(10.0, 10.0, 10.0);
        let with_unknown = flat_service_quote(1.0, &dims, &["gift_wrapping".to_owned()]);
        let without = flat_service_quote(1.0, &dims, &[]);
        assert!(close(with_unknown.total, without.total));
    }

    #[test]
    fn mock_prediction_stays_in_documented_ranges() {
        for _ in 0..50 {
            let p = mock_prediction(42);
            assert_eq!(p.shipment_id, 42);
            assert!((80.0..=99.0).contains(&p.confidence));
            assert!(!p.factors.is_empty() && p.factors.len() <= 3);
            assert!(
                p.factors
                    .iter()
                    .all(|f| PREDICTION_FACTORS.contains(&f.as_str()))
            );
            assert!(["low", "medium", "high"].contains(&p.risk_level.as_str()));
            assert!(p.predicted_eta > Utc::now());
            assert!(p.predicted_eta <= Utc::now() + Duration::days(7) + Duration::minutes(1));
        }
    }

    #[test]
    fn mock_prediction_factors_are_distinct() {
        for _ in 0..50 {
            let mut factors = mock_prediction(1).factors;
            let before = factors.len();
            factors.sort();
            factors.dedup();
            assert_eq!(factors.len(), before);
        }
    }
}
