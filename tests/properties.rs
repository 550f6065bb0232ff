//! Property tests for the capacity model and the route constructor.

use std::collections::HashSet;

use proptest::prelude::*;
use u_delivery::capacity::compute_demand;
use u_delivery::constructive::build_routes;
use u_delivery::distance::haversine_km;
use u_delivery::models::{DeliveryNode, LineItem, Location, Product};

fn product(unit: Option<f64>, hetero: Option<f64>) -> Product {
    Product {
        name: String::new(),
        unit_capacity_factor: unit,
        heterogeneous_conversion_factor: hetero,
    }
}

fn factor() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(0.1f64..5.0)
}

fn mixed_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec((0i64..500, factor(), factor()), 2..8).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, (q, unit, hetero))| LineItem::new(format!("P{i}"), q, product(unit, hetero)))
            .collect()
    })
}

fn nodes(max_demand: f64) -> impl Strategy<Value = Vec<DeliveryNode<usize>>> {
    prop::collection::vec((-0.5f64..0.5, -0.5f64..0.5, 0.0f64..max_demand), 0..12).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (lat, lng, demand))| DeliveryNode::new(i, Location::new(lat, lng), demand))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_single_product_is_homogeneous(
        quantities in prop::collection::vec(0i64..500, 1..6),
        unit in factor(),
        hetero in factor(),
    ) {
        let p = product(unit, hetero);
        let items: Vec<LineItem> = quantities.iter().map(|&q| LineItem::new("P", q, p.clone())).collect();
        let r = compute_demand(&items, 1000.0).unwrap();
        prop_assert!(r.is_homogeneous);
        let expected = unit.unwrap_or(1.0);
        prop_assert!(r.capacity_details.iter().all(|d| d.conversion_rate == expected));
    }

    #[test]
    fn prop_distinct_products_are_heterogeneous(items in mixed_items()) {
        let r = compute_demand(&items, 1000.0).unwrap();
        prop_assert!(!r.is_homogeneous);
        for (item, detail) in items.iter().zip(&r.capacity_details) {
            let p = item.product.as_ref().unwrap();
            let expected = p
                .heterogeneous_conversion_factor
                .or(p.unit_capacity_factor)
                .unwrap_or(1.0);
            prop_assert_eq!(detail.conversion_rate, expected);
        }
    }

    #[test]
    fn prop_total_invariant_under_reordering(items in mixed_items()) {
        let forward = compute_demand(&items, 1000.0).unwrap();
        let mut reversed_items = items.clone();
        reversed_items.reverse();
        let reversed = compute_demand(&reversed_items, 1000.0).unwrap();
        prop_assert!((forward.total_capacity_used - reversed.total_capacity_used).abs() <= 0.011);
        prop_assert_eq!(forward.is_homogeneous, reversed.is_homogeneous);
    }

    #[test]
    fn prop_can_fit_matches_unrounded_total(items in mixed_items(), capacity in 1.0f64..3000.0) {
        let r = compute_demand(&items, capacity).unwrap();
        let total: f64 = r.capacity_details.iter().fold(0.0, |acc, d| acc + d.capacity_needed);
        prop_assert_eq!(r.can_fit, total <= capacity);
    }

    #[test]
    fn prop_trips_respect_capacity(nodes in nodes(10.0), capacity in 10.0f64..30.0) {
        let trips = build_routes(&nodes, Location::new(0.0, 0.0), capacity).unwrap();
        for trip in &trips {
            let load: f64 = trip.path().iter().map(|&i| nodes[i].demand()).sum();
            prop_assert!(load <= capacity + 1e-9);
        }
    }

    #[test]
    fn prop_trips_partition_nodes(nodes in nodes(40.0), capacity in 0.0f64..50.0) {
        let trips = build_routes(&nodes, Location::new(0.1, -0.1), capacity).unwrap();
        prop_assert!(trips.iter().all(|t| !t.is_empty()));
        let flat: Vec<usize> = trips.iter().flat_map(|t| t.path().iter().copied()).collect();
        prop_assert_eq!(flat.len(), nodes.len());
        let seen: HashSet<usize> = flat.into_iter().collect();
        let expected: HashSet<usize> = (0..nodes.len()).collect();
        prop_assert_eq!(seen, expected);
        // A trip over capacity can only be a single oversized node.
        for trip in trips.iter().filter(|t| t.load() > capacity) {
            prop_assert_eq!(trip.len(), 1);
        }
    }

    #[test]
    fn prop_distance_zero_and_symmetric(
        a in (-90.0f64..90.0, -180.0f64..180.0),
        b in (-90.0f64..90.0, -180.0f64..180.0),
    ) {
        let a = Location::from(a);
        let b = Location::from(b);
        prop_assert_eq!(haversine_km(a, a), 0.0);
        prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        prop_assert!(haversine_km(a, b) >= 0.0);
    }
}
