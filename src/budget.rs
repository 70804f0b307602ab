//! Itinerary and trip cost arithmetic
//!
//! Everything here is pure: a path and the trip parameters in, distances,
//! steps and rupee amounts out.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::routing::RoadGraph;

/// What the traveller asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripParameters {
    pub destination: String,
    pub people: u32,
    pub days: u32,
    /// Vehicle fuel efficiency in km per litre
    pub mileage_km_per_litre: f64,
    /// Price of one litre of fuel
    pub fuel_price: f64,
    pub tolls: f64,
    /// Stay cost per person per day
    pub stay_per_day: f64,
    pub prefer_fastest: bool,
}

/// One-way distance and driving time of a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathTotals {
    pub distance_km: f64,
    pub duration_min: f64,
}

/// One leg of the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub duration_min: f64,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}: {} km, {}",
            self.from,
            self.to,
            self.distance_km,
            format_duration(self.duration_min)
        )
    }
}

/// Cost breakdown for a round trip plus the stay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub fuel: f64,
    pub tolls: f64,
    pub stay: f64,
    pub total: f64,
}

/// Sum distance and time over consecutive roads of `path`.
///
/// A pair without a road contributes nothing.
#[must_use]
pub fn path_totals(graph: &RoadGraph, path: &[String]) -> PathTotals {
    path.windows(2)
        .fold(PathTotals::default(), |mut totals, pair| {
            match graph.edge_between(&pair[0], &pair[1]) {
                Some(edge) => {
                    totals.distance_km += edge.distance_km;
                    totals.duration_min += edge.duration_min;
                }
                None => warn!(from = %pair[0], to = %pair[1], "No road between consecutive stops"),
            }
            totals
        })
}

/// Fuel cost of driving `km`. Zero when the efficiency is not positive.
#[must_use]
pub fn fuel_cost(km: f64, efficiency: f64, unit_price: f64) -> f64 {
    if efficiency <= 0.0 {
        return 0.0;
    }
    let litres = km / efficiency;
    litres * unit_price
}

/// Round-trip fuel plus tolls plus stay for everyone on every day.
///
/// `one_way` is the outbound path; fuel is costed for twice its distance.
#[must_use]
pub fn trip_budget(one_way: &PathTotals, params: &TripParameters) -> Budget {
    let fuel = fuel_cost(
        one_way.distance_km * 2.0,
        params.mileage_km_per_litre,
        params.fuel_price,
    );
    let stay = f64::from(params.days) * f64::from(params.people) * params.stay_per_day;
    Budget {
        fuel,
        tolls: params.tolls,
        stay,
        total: fuel + params.tolls + stay,
    }
}

/// One step per consecutive pair of `path`, copied from the road data
#[must_use]
pub fn build_itinerary(graph: &RoadGraph, path: &[String]) -> Vec<Step> {
    path.windows(2)
        .filter_map(|pair| {
            let edge = graph.edge_between(&pair[0], &pair[1]);
            if edge.is_none() {
                warn!(from = %pair[0], to = %pair[1], "Skipping itinerary step without a road");
            }
            edge
        })
        .map(|edge| Step {
            from: edge.from.clone(),
            to: edge.to.clone(),
            distance_km: edge.distance_km,
            duration_min: edge.duration_min,
        })
        .collect()
}

/// Minutes as "Xh Ym"
#[must_use]
pub fn format_duration(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor();
    let rest = (minutes % 60.0).round();
    format!("{hours}h {rest}m")
}

/// Rupees rounded to whole units with Indian digit grouping, e.g. ₹12,34,567
#[must_use]
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("₹{sign}{digits}");
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = vec![tail];
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();
    format!("₹{sign}{}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use crate::routing::{Edge, Metric, shortest_path};
    use rstest::rstest;

    fn params() -> TripParameters {
        TripParameters {
            destination: "Manali".to_string(),
            people: 2,
            days: 3,
            mileage_km_per_litre: 15.0,
            fuel_price: 100.0,
            tolls: 200.0,
            stay_per_day: 1000.0,
            prefer_fastest: true,
        }
    }

    fn path(stops: &[&str]) -> Vec<String> {
        stops.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_trip_budget_literal_example() {
        let one_way = PathTotals {
            distance_km: 300.0,
            duration_min: 0.0,
        };
        let budget = trip_budget(&one_way, &params());
        assert_eq!(budget.fuel, 4000.0);
        assert_eq!(budget.stay, 6000.0);
        assert_eq!(budget.tolls, 200.0);
        assert_eq!(budget.total, 10200.0);
    }

    #[test]
    fn test_trip_budget_matches_components() {
        let one_way = PathTotals {
            distance_km: 310.0,
            duration_min: 480.0,
        };
        let p = params();
        let budget = trip_budget(&one_way, &p);
        let expected = fuel_cost(620.0, 15.0, 100.0) + 200.0 + 3.0 * 2.0 * 1000.0;
        assert_eq!(budget.total, expected);
    }

    #[rstest]
    #[case(0.0, 15.0, 100.0, 0.0)]
    #[case(150.0, 0.0, 100.0, 0.0)]
    #[case(150.0, -5.0, 100.0, 0.0)]
    #[case(150.0, 15.0, 100.0, 1000.0)]
    #[case(600.0, 15.0, 100.0, 4000.0)]
    fn test_fuel_cost(
        #[case] km: f64,
        #[case] efficiency: f64,
        #[case] price: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(fuel_cost(km, efficiency, price), expected);
    }

    #[test]
    fn test_path_totals_for_fastest_manali_route() {
        let graph = RoadGraph::himachal().unwrap();
        let route = shortest_path(&graph, "Chandigarh", "Manali", Metric::Duration);
        let totals = path_totals(&graph, &route.path);
        assert_eq!(totals.distance_km, 310.0);
        assert_eq!(totals.duration_min, route.cost);
    }

    #[test]
    fn test_path_totals_skips_missing_roads() {
        let graph = RoadGraph::himachal().unwrap();
        let totals = path_totals(&graph, &path(&["Chandigarh", "Solan", "Kaza", "Manali"]));
        assert_eq!(totals.distance_km, 45.0);
        assert_eq!(totals.duration_min, 80.0);
    }

    #[rstest]
    #[case(&[])]
    #[case(&["Manali"])]
    fn test_trivial_paths_have_zero_totals(#[case] stops: &[&str]) {
        let graph = RoadGraph::himachal().unwrap();
        assert_eq!(path_totals(&graph, &path(stops)), PathTotals::default());
        assert!(build_itinerary(&graph, &path(stops)).is_empty());
    }

    #[test]
    fn test_itinerary_mirrors_edges() {
        let graph = RoadGraph::himachal().unwrap();
        let route = shortest_path(&graph, "Chandigarh", "Kasol", Metric::Duration);
        let steps = build_itinerary(&graph, &route.path);

        assert_eq!(steps.len(), route.path.len() - 1);
        for (step, pair) in steps.iter().zip(route.path.windows(2)) {
            let edge = graph.edge_between(&pair[0], &pair[1]).unwrap();
            assert_eq!(step.from, pair[0]);
            assert_eq!(step.to, pair[1]);
            assert_eq!(step.distance_km, edge.distance_km);
            assert_eq!(step.duration_min, edge.duration_min);
        }
    }

    #[test]
    fn test_step_display() {
        let graph = RoadGraph::new(
            vec![Location::new(0.0, 0.0, "A"), Location::new(0.0, 0.0, "B")],
            vec![Edge::new("A", "B", 80.0, 110.0)],
        )
        .unwrap();
        let steps = build_itinerary(&graph, &path(&["A", "B"]));
        assert_eq!(steps[0].to_string(), "A → B: 80 km, 1h 50m");
    }

    #[rstest]
    #[case(480.0, "8h 0m")]
    #[case(110.0, "1h 50m")]
    #[case(45.0, "0h 45m")]
    #[case(0.0, "0h 0m")]
    fn test_format_duration(#[case] minutes: f64, #[case] expected: &str) {
        assert_eq!(format_duration(minutes), expected);
    }

    #[rstest]
    #[case(0.0, "₹0")]
    #[case(999.4, "₹999")]
    #[case(10200.0, "₹10,200")]
    #[case(123456.0, "₹1,23,456")]
    #[case(12345678.6, "₹1,23,45,679")]
    fn test_format_inr(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(format_inr(amount), expected);
    }
}
