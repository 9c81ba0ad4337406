//! End-to-end checks of the benchmark pipeline with seeded, reproducible datasets.

#![allow(clippy::indexing_slicing, reason = "test code with known array bounds")]

use std::io;
use std::num::NonZero;

use parallel_trace::{BenchConfig, Dataset, Error, Harness, Matrix, Partition, run_benchmark};

fn threads(count: usize) -> NonZero<usize> {
    NonZero::new(count).unwrap()
}

fn small_config() -> BenchConfig {
    BenchConfig::default()
        .with_matrix_count(60)
        .with_matrix_size(12)
        .with_seed(0x5eed)
}

#[test]
fn console_output_follows_expected_layout() {
    let mut out = Vec::new();
    let reports = run_benchmark(&small_config(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines = text.lines().collect::<Vec<_>>();

    assert_eq!(
        lines.first().copied(),
        Some("Подготовка данных: создание 60 матриц размером 12x12...")
    );
    assert_eq!(lines.get(1).copied(), Some("Данные подготовлены."));
    assert_eq!(lines.get(2).copied(), Some(""));

    // Every run is a header, total, time, separator and an empty line.
    let blocks = lines.get(3..).unwrap().chunks(5).collect::<Vec<_>>();
    assert_eq!(blocks.len(), 4);

    for (block, report) in blocks.iter().zip(&reports) {
        assert_eq!(
            block[0],
            format!(
                "--- Запуск вычислений с {} потоком(-ами) ---",
                report.thread_count()
            )
        );
        assert_eq!(
            block[1],
            format!("Общий след всех матриц: {}", report.total_trace())
        );
        assert!(block[2].starts_with("Время выполнения: "));
        assert!(block[2].ends_with(" мс"));
        assert_eq!(block[3], "------------------------------------------");
        assert_eq!(block[4], "");
    }
}

#[test]
fn all_thread_counts_agree_with_serial_sum() {
    let config = small_config();
    let dataset = Dataset::generate(
        config.matrix_count(),
        config.matrix_size(),
        config.value_range(),
        config.seed(),
    )
    .unwrap();

    let reports = run_benchmark(&config, &mut io::sink()).unwrap();

    assert_eq!(reports.len(), config.thread_counts().len());
    for report in reports {
        assert_eq!(report.total_trace(), dataset.serial_trace_sum());
        assert!(report.elapsed_millis().is_finite());
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = run_benchmark(&small_config(), &mut io::sink()).unwrap();
    let second = run_benchmark(&small_config(), &mut io::sink()).unwrap();

    let totals = |reports: &[parallel_trace::RunReport]| {
        reports
            .iter()
            .map(parallel_trace::RunReport::total_trace)
            .collect::<Vec<_>>()
    };

    assert_eq!(totals(&first), totals(&second));
}

#[test]
fn scenario_partial_sums() {
    let dataset = Dataset::from_matrices(vec![
        Matrix::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap(),
        Matrix::from_rows(vec![vec![5, 2], vec![3, 5]]).unwrap(),
        Matrix::from_rows(vec![vec![0, 0], vec![0, 0]]).unwrap(),
        Matrix::from_rows(vec![vec![10, -10], vec![-5, 7]]).unwrap(),
    ])
    .unwrap();

    assert_eq!(
        Partition::new(dataset.len(), threads(2))
            .ranges()
            .collect::<Vec<_>>(),
        vec![0..2, 2..4]
    );

    let report = Harness::new(&dataset).measure(threads(2)).unwrap();

    assert_eq!(dataset.serial_trace_sum(), 29);
    assert_eq!(report.partial_traces(), &[12, 17]);
    assert_eq!(report.total_trace(), 29);
}

#[test]
fn single_matrix_four_threads() {
    let dataset = Dataset::from_matrices(vec![Matrix::identity(50)]).unwrap();

    let report = Harness::new(&dataset).measure(threads(4)).unwrap();

    assert_eq!(report.total_trace(), 50);
    assert_eq!(report.partial_traces().iter().filter(|&&p| p != 0).count(), 1);
}

#[test]
fn invalid_config_fails_before_output() {
    let config = small_config().with_thread_counts(vec![]);

    let mut out = Vec::new();
    let error = run_benchmark(&config, &mut out).unwrap_err();

    assert!(matches!(error, Error::NoThreadCounts));
    assert!(out.is_empty());
}
