use rand::{prelude::*, rngs::SmallRng, SeedableRng};

use crate::{
    prelude::{Duration, Epoch, StateVector, StateVectorSeries, Vector3},
    tests::reference_epoch,
};

const NB_ITERATIONS: usize = 256;

fn random_series(rng: &mut SmallRng) -> StateVectorSeries {
    let t0 = reference_epoch();
    let count = rng.random_range(1..64);
    let vectors = (0..count)
        .map(|i| {
            // coarse grid: repeated epochs and exact ties happen
            let dt_s = rng.random_range(0..40) as f64 * 30.0;
            StateVector::new(
                t0 + Duration::from_seconds(dt_s),
                Vector3::new(i as f64, 0.0, 0.0),
                Vector3::zeros(),
            )
        })
        .collect::<Vec<_>>();
    StateVectorSeries::new(vectors)
}

fn random_target(rng: &mut SmallRng) -> Epoch {
    let dt_s = rng.random_range(-600..1800) as f64 * 15.0 / 2.0;
    reference_epoch() + Duration::from_seconds(dt_s)
}

#[test]
fn nearest_is_closest() {
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..NB_ITERATIONS {
        let series = random_series(&mut rng);
        let target = random_target(&mut rng);

        let nearest = series.nearest(target).unwrap();
        let distance = (nearest.epoch - target).abs();

        for sv in series.iter() {
            let d = (sv.epoch - target).abs();
            assert!(d >= distance, "{:?} is closer to {:?}", sv.epoch, target);
            if d == distance {
                // earliest epoch, then first occurrence
                assert!(sv.epoch >= nearest.epoch);
            }
        }

        let first = series
            .iter()
            .find(|sv| sv.epoch == nearest.epoch)
            .unwrap();
        assert_eq!(first, nearest);
    }
}

#[test]
fn range_never_fails() {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..NB_ITERATIONS {
        let series = random_series(&mut rng);
        let offset = rng.random_range(0..96);
        let limit = rng.random_range(0..96);
        let len = series.range(offset, limit).len();
        if offset < series.len() {
            assert_eq!(len, limit.min(series.len() - offset));
        } else {
            assert_eq!(len, 0);
        }
    }
}
