use std::{
    num::NonZeroUsize,
    ops::Range,
    sync::atomic::{AtomicUsize, Ordering},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use logreg_orchestra::{
    InputErr, LogisticRegression, MlErr, partition,
    optimization::GradientDescent,
    parameters::{Gradient, Params},
    training::{GradientStep, Trainer},
};

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

/// Two gaussian-ish blobs, labelled by which side of a hyperplane they fall on.
fn synthetic(seed: u64, rows: usize, dim: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal: Vec<f64> = (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect();

    let x: Vec<Vec<f64>> = (0..rows)
        .map(|_| (0..dim).map(|_| rng.random_range(-3.0..3.0)).collect())
        .collect();
    let y = x
        .iter()
        .map(|row| {
            let side: f64 = row.iter().zip(&normal).map(|(a, b)| a * b).sum();
            if side > 0. { 1. } else { 0. }
        })
        .collect();

    (x, y)
}

#[test]
fn trained_weights_have_one_entry_per_feature() {
    for dim in [1, 3, 7] {
        let (x, y) = synthetic(dim as u64, 30, dim);
        let mut model = LogisticRegression::new(0.1, nz(10)).unwrap();

        model.train(&x, &y, nz(4)).unwrap();
        assert_eq!(model.weights().unwrap().len(), dim);
    }
}

#[test]
fn predictions_are_always_zero_or_one() {
    let (x, y) = synthetic(7, 50, 4);
    let mut model = LogisticRegression::new(0.05, nz(25)).unwrap();
    model.train(&x, &y, nz(3)).unwrap();

    let (unseen, _) = synthetic(8, 200, 4);
    let predictions = model.predict(&unseen).unwrap();

    assert_eq!(predictions.len(), unseen.len());
    assert!(predictions.iter().all(|&p| p == 0. || p == 1.));
}

#[test]
fn worker_count_does_not_change_the_result() {
    let (x, y) = synthetic(42, 64, 3);

    let mut single = LogisticRegression::new(0.1, nz(50)).unwrap();
    single.train(&x, &y, nz(1)).unwrap();

    for workers in [2, 5, 64, 100] {
        let mut parallel = LogisticRegression::new(0.1, nz(50)).unwrap();
        parallel.train(&x, &y, nz(workers)).unwrap();

        for (a, b) in single.weights().unwrap().iter().zip(parallel.weights().unwrap()) {
            assert!((a - b).abs() < 1e-9, "workers={workers}: {a} vs {b}");
        }
        assert!((single.bias() - parallel.bias()).abs() < 1e-9);
    }
}

#[test]
fn one_worker_per_row_on_thousands_of_rows() {
    let (x, y) = synthetic(5, 4000, 2);

    let mut single = LogisticRegression::new(0.1, nz(3)).unwrap();
    single.train(&x, &y, nz(1)).unwrap();

    let mut per_row = LogisticRegression::new(0.1, nz(3)).unwrap();
    per_row.train(&x, &y, nz(x.len())).unwrap();

    for (a, b) in single.weights().unwrap().iter().zip(per_row.weights().unwrap()) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
}

#[test]
fn any_worker_count_is_accepted() {
    let (x, y) = synthetic(9, 12, 2);

    let mut model = LogisticRegression::new(0.1, nz(5)).unwrap();
    model.train(&x, &y, NonZeroUsize::MAX).unwrap();

    assert_eq!(model.weights().unwrap().len(), 2);
}

#[test]
fn separable_points_are_learned() {
    let x = vec![vec![0.], vec![10.]];
    let y = vec![0., 1.];
    let mut model = LogisticRegression::new(0.1, nz(200)).unwrap();

    model.train(&x, &y, nz(2)).unwrap();

    assert_eq!(model.predict_one(&[0.]).unwrap(), 0.);
    assert_eq!(model.predict_one(&[10.]).unwrap(), 1.);
}

#[test]
fn synthetic_data_is_mostly_learned() {
    let (x, y) = synthetic(3, 200, 2);
    let mut model = LogisticRegression::new(0.5, nz(300)).unwrap();
    model.train(&x, &y, nz(8)).unwrap();

    let predictions = model.predict(&x).unwrap();
    let correct = predictions.iter().zip(&y).filter(|(p, t)| p == t).count();
    assert!(correct as f64 / y.len() as f64 > 0.9);
}

#[test]
fn empty_dataset_is_invalid_input() {
    let mut model = LogisticRegression::new(0.1, nz(10)).unwrap();
    let err = model.train(&[], &[], nz(2)).unwrap_err();

    assert!(matches!(err, MlErr::InvalidInput(InputErr::EmptyDataset)));
    assert!(!model.is_trained());
}

#[test]
fn ragged_row_is_invalid_input() {
    let x = vec![vec![1.; 5], vec![1.; 5], vec![1.; 3], vec![1.; 5]];
    let y = vec![0., 1., 0., 1.];
    let mut model = LogisticRegression::new(0.1, nz(10)).unwrap();

    let err = model.train(&x, &y, nz(2)).unwrap_err();
    assert!(matches!(
        err,
        MlErr::InvalidInput(InputErr::RaggedRow { row: 2, got: 3, expected: 5 })
    ));
}

#[test]
fn bad_labels_are_invalid_input() {
    let x = vec![vec![1.], vec![2.]];
    let mut model = LogisticRegression::new(0.1, nz(10)).unwrap();

    assert!(model.train(&x, &[0.], nz(1)).unwrap_err().is_invalid_input());
    assert!(model.train(&x, &[0., 2.], nz(1)).unwrap_err().is_invalid_input());
    assert!(model.train(&x, &[0., -0.5], nz(1)).unwrap_err().is_invalid_input());
}

#[test]
fn inference_is_deterministic() {
    let (x, y) = synthetic(11, 40, 3);
    let mut model = LogisticRegression::new(0.1, nz(40)).unwrap();
    model.train(&x, &y, nz(4)).unwrap();

    let first = model.predict(&x).unwrap();
    for _ in 0..10 {
        assert_eq!(model.predict(&x).unwrap(), first);
    }
}

#[test]
fn huge_features_saturate_instead_of_failing() {
    let x = vec![vec![1e300], vec![-1e300]];
    let y = vec![1., 0.];
    let mut model = LogisticRegression::new(1.0, nz(5)).unwrap();

    model.train(&x, &y, nz(2)).unwrap();

    assert!(!model.bias().is_nan());
    let p = model.predict_proba(&[1e300]).unwrap();
    assert!(p == 0. || p == 1.);
}

#[test]
fn partitions_cover_every_row_once() {
    for rows in 1..60 {
        for workers in 1..70 {
            let mut seen = vec![0u8; rows];
            for range in partition(rows, workers) {
                for i in range {
                    seen[i] += 1;
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "rows={rows} workers={workers}");
        }
    }
}

/// Fails on the range starting at `fail_at`, every other range contributes zero.
struct FailingStep {
    samples: usize,
    fail_at: usize,
    calls: AtomicUsize,
}

impl GradientStep for FailingStep {
    fn samples(&self) -> usize {
        self.samples
    }

    fn dim(&self) -> usize {
        1
    }

    fn gradient(&self, _params: &Params, range: Range<usize>) -> logreg_orchestra::Result<Gradient> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if range.start == self.fail_at {
            return Err(MlErr::SizeMismatch {
                what: "injected",
                got: 0,
                expected: 1,
            });
        }

        Ok(Gradient::zeros(1))
    }
}

#[test]
fn a_failing_worker_aborts_the_whole_call() {
    let step = FailingStep {
        samples: 8,
        fail_at: 4,
        calls: AtomicUsize::new(0),
    };
    let mut trainer = Trainer::new(GradientDescent::new(0.1).unwrap(), nz(100), nz(4));
    let mut params = Params::zeros(1);

    let err = trainer.train(&step, &mut params).unwrap_err();

    assert!(matches!(err, MlErr::SizeMismatch { what: "injected", .. }));
    // The failure happens in the first epoch, later epochs never start.
    assert!(step.calls.load(Ordering::Relaxed) <= 4);
    assert_eq!(params, Params::zeros(1));
}
