//! End-to-end generation tests
//!
//! These drive the full pipeline from a JSON configuration to the exported
//! scenario record.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use traffic_gen::generation::{
    CardinalDirection, GenerateError, Generator, GeneratorConfig, JunctionId, Scalar,
};

const MINIMAL: &str = include_str!("../demos/minimal.json");
const CITY: &str = include_str!("../demos/city_grid.json");

fn generator(json: &str) -> Generator {
    let config = GeneratorConfig::from_json_str(json).expect("config should parse");
    Generator::from_config(&config).expect("config should build")
}

fn export_json(generator: &mut Generator, seed: u64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let scenario = generator.generate(&mut rng).expect("generation should succeed");
    scenario
        .to_record()
        .and_then(|record| record.to_json())
        .expect("export should succeed")
}

#[test]
fn test_minimal_grid_scenario() {
    let mut generator = generator(MINIMAL);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let scenario = generator.generate(&mut rng).unwrap();
    let record = scenario.to_record().unwrap();

    assert_eq!(record.time_steps, 100);

    let positions: Vec<_> = record.junctions.iter().map(|j| (j.id, j.x, j.y)).collect();
    assert_eq!(positions, vec![(0, 0, 0), (1, 0, 1), (2, 1, 0), (3, 1, 1)]);

    // Every junction of a 2x2 grid has two neighbours in two distinct directions
    for junction in &record.junctions {
        assert_eq!(junction.signals.len(), 2);
        assert!(junction.signals.iter().all(|signal| signal.time == 5));
    }

    assert_eq!(record.roads.len(), 4);
    for road in &record.roads {
        assert_eq!(road.lanes, 1);
        assert_eq!(road.limit, Scalar::Int(30));
    }

    assert_eq!(record.cars.len(), 1);
    let car = &record.cars[0];
    assert_eq!(car.id, 0);
    assert!(car.route.is_empty());
    assert_eq!(car.start.lane, 0);
    assert!(car.start.distance >= 0.0 && car.start.distance < 100.0);
    assert!(record.roads.iter().any(|road| {
        (road.junction1, road.junction2) == (car.start.from, car.start.to)
            || (road.junction2, road.junction1) == (car.start.from, car.start.to)
    }));
}

#[test]
fn test_grid_roads_are_unique_and_reciprocal() {
    let mut generator = generator(CITY);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let scenario = generator.generate(&mut rng).unwrap();
    let network = &scenario.network;

    assert_eq!(network.junction_count(), 48);
    assert_eq!(network.road_count(), 7 * 6 + 8 * 5);

    let mut pairs = HashSet::new();
    for road in network.roads() {
        assert_ne!(road.junction1, road.junction2);
        let pair = (road.junction1.min(road.junction2), road.junction1.max(road.junction2));
        assert!(pairs.insert(pair));
        assert!(road.lanes >= 1 && road.lanes <= 4);
    }

    for junction in network.junctions() {
        for conn in &junction.connections {
            let back = network
                .junction(conn.neighbour)
                .unwrap()
                .connections
                .iter()
                .find(|other| other.road == conn.road)
                .unwrap();
            assert_eq!(back.direction, conn.direction.opposite());
        }
    }

    // Top-left corner only sees east and south
    let corner: HashSet<_> = network
        .junction(JunctionId(0))
        .unwrap()
        .connections
        .iter()
        .map(|conn| conn.direction)
        .collect();
    assert_eq!(
        corner,
        HashSet::from([CardinalDirection::East, CardinalDirection::South])
    );

    for car in &scenario.cars {
        let position = car.position.unwrap();
        let road = network.road(position.road).unwrap();
        assert!(position.lane < road.lanes);
        assert!(position.distance >= 0.0 && position.distance < road.length());
    }
}

#[test]
fn test_same_seed_same_output() {
    let first = export_json(&mut generator(CITY), 1234);
    let second = export_json(&mut generator(CITY), 1234);
    assert_eq!(first, second);

    let other = export_json(&mut generator(CITY), 4321);
    assert_ne!(first, other);
}

#[test]
fn test_reset_reproduces_output() {
    let fresh = export_json(&mut generator(CITY), 2024);

    let mut reused = generator(CITY);
    export_json(&mut reused, 1);
    assert!(reused.is_populated());
    reused.reset();
    assert!(!reused.is_populated());
    assert!(reused.scenario().is_none());

    assert_eq!(export_json(&mut reused, 2024), fresh);
}

#[test]
fn test_regenerating_without_reset_reproduces_output() {
    let mut generator = generator(CITY);
    let first = export_json(&mut generator, 77);
    let second = export_json(&mut generator, 77);
    assert_eq!(first, second);
}

#[test]
fn test_unknown_strategy_is_config_error() {
    let broken = MINIMAL.replace(r#""kind": "complete""#, r#""kind": "voronoi""#);
    let err = GeneratorConfig::from_json_str(&broken).unwrap_err();
    assert!(matches!(err, GenerateError::Config(_)));
}

#[test]
fn test_single_junction_grid_cannot_place_cars() {
    let single = MINIMAL.replace(
        r#""width": 2, "height": 2"#,
        r#""width": 1, "height": 1"#,
    );
    let mut generator = generator(&single);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let err = generator.generate(&mut rng).unwrap_err();
    assert!(matches!(err, GenerateError::SamplingPrecondition(_)));
    assert!(!generator.is_populated());
}

#[test]
fn test_equal_roads_share_cars_evenly() {
    let config = MINIMAL
        .replace(
            r#""width": 2, "height": 2, "spacing": 1"#,
            r#""width": 3, "height": 1, "spacing": 1"#,
        )
        .replace(
            r#""number": {"kind": "static", "spec": {"value": 1}}"#,
            r#""number": {"kind": "static", "spec": {"value": 4000}}"#,
        );
    let mut generator = generator(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let scenario = generator.generate(&mut rng).unwrap();

    assert_eq!(scenario.network.road_count(), 2);
    let on_first = scenario
        .cars
        .iter()
        .filter(|car| car.position.unwrap().road.0 == 0)
        .count();
    assert!((1850..2150).contains(&on_first), "{} cars on first road", on_first);
}
