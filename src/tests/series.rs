use rstest::*;

use crate::{
    prelude::{parse_epoch, Duration, RawRecord, StateVector, StateVectorSeries, Vector3},
    tests::{init_logger, orbit_speed_km_s, raw_feed, sample_epoch, test_series},
};

fn state_vector(epoch: &str, x: f64) -> StateVector {
    StateVector::new(
        parse_epoch(epoch).unwrap(),
        Vector3::new(x, 0.0, 0.0),
        Vector3::new(0.0, 7.66, 0.0),
    )
}

#[test]
fn invalid_records_are_isolated() {
    init_logger();
    let mut feed = raw_feed(10);
    feed[3].epoch = "2025-073T12:12:00.000".to_string();
    feed[6].position.1 = "not a number".to_string();
    feed.push(RawRecord::default());

    let series = StateVectorSeries::from_raw(&feed);
    assert_eq!(series.len(), 8);
    assert!(series.exact(sample_epoch(3)).is_none());
    assert!(series.exact(sample_epoch(6)).is_none());
    assert!(series.exact(sample_epoch(7)).is_some());
}

#[test]
fn empty_series() {
    let series = StateVectorSeries::from_raw(&[]);
    assert!(series.is_empty());
    assert!(series.nearest(sample_epoch(0)).is_none());
    assert!(series.exact(sample_epoch(0)).is_none());
    assert!(series.range(0, 10).is_empty());
    assert!(series.summary().is_none());
}

#[test]
fn chronological_order() {
    let mut feed = raw_feed(6);
    feed.reverse();
    let series = StateVectorSeries::from_raw(&feed);
    let epochs = series.iter().map(|sv| sv.epoch).collect::<Vec<_>>();
    let expected = (0..6).map(sample_epoch).collect::<Vec<_>>();
    assert_eq!(epochs, expected);
}

#[test]
fn exact_lookup() {
    let series = test_series(10);
    for k in 0..10 {
        let sv = series.exact(sample_epoch(k)).unwrap();
        assert_eq!(sv.epoch, sample_epoch(k));
    }
    assert!(series.exact(sample_epoch(10)).is_none());
    assert!(series
        .exact(sample_epoch(2) + Duration::from_milliseconds(1.0))
        .is_none());
}

#[test]
fn repeated_epochs_first_wins() {
    let series = StateVectorSeries::new(vec![
        state_vector("2025-073T12:00:00.000Z", 1.0),
        state_vector("2025-073T12:04:00.000Z", 2.0),
        state_vector("2025-073T12:04:00.000Z", 3.0),
        state_vector("2025-073T12:08:00.000Z", 4.0),
    ]);

    let t = parse_epoch("2025-073T12:04:00.000Z").unwrap();
    assert_eq!(series.exact(t).unwrap().position_km[0], 2.0);
    assert_eq!(series.nearest(t).unwrap().position_km[0], 2.0);

    // closer to repeated epoch, from the future
    let t = parse_epoch("2025-073T12:05:00.000Z").unwrap();
    assert_eq!(series.nearest(t).unwrap().position_km[0], 2.0);
}

#[rstest]
#[case(0, 5, 5)]
#[case(0, 10, 10)]
#[case(0, 100, 10)]
#[case(0, usize::MAX, 10)]
#[case(3, 4, 4)]
#[case(8, 5, 2)]
#[case(9, 1, 1)]
#[case(10, 5, 0)]
#[case(100, 1, 0)]
#[case(usize::MAX, usize::MAX, 0)]
#[case(3, 0, 0)]
fn range_queries(#[case] offset: usize, #[case] limit: usize, #[case] expected: usize) {
    let series = test_series(10);
    let range = series.range(offset, limit);
    assert_eq!(range.len(), expected);
    if let Some(first) = range.first() {
        assert_eq!(first.epoch, sample_epoch(offset));
    }
}

#[rstest]
#[case("2025-073T11:00:00.000Z", "2025-073T12:00:00.000Z")]
#[case("2025-073T12:00:00.000Z", "2025-073T12:00:00.000Z")]
#[case("2025-073T12:01:59.999Z", "2025-073T12:00:00.000Z")]
#[case("2025-073T12:02:00.000Z", "2025-073T12:00:00.000Z")]
#[case("2025-073T12:02:00.001Z", "2025-073T12:04:00.000Z")]
#[case("2025-073T12:05:00.000Z", "2025-073T12:04:00.000Z")]
#[case("2025-073T12:35:00.000Z", "2025-073T12:36:00.000Z")]
#[case("2025-074T00:00:00.000Z", "2025-073T12:36:00.000Z")]
fn nearest_queries(#[case] target: &str, #[case] expected: &str) {
    let series = test_series(10);
    let target = parse_epoch(target).unwrap();
    let expected = parse_epoch(expected).unwrap();
    assert_eq!(series.nearest(target).unwrap().epoch, expected);
}

#[test]
fn summary() {
    let series = test_series(10);
    let summary = series.summary().unwrap();
    assert_eq!(summary.count, 10);
    assert_eq!(summary.first, sample_epoch(0));
    assert_eq!(summary.last, sample_epoch(9));
    assert!((summary.mean_speed_km_s - orbit_speed_km_s()).abs() < 1.0E-6);
}
