use issue_stats::analyzers::analyzer::run_analysis_from_reader;
use issue_stats::analyzers::inspect::inspect;
use issue_stats::config::AnalysisConfig;
use issue_stats::error::StatsError;

const FIXTURE: &str = include_str!("fixtures/issues_sample.csv");

#[test]
fn test_inspect_survey() {
    let report = inspect(FIXTURE.as_bytes(), "issues_sample.csv").unwrap();

    assert_eq!(report.rows, 20);
    assert_eq!(report.columns.len(), 7);
    assert_eq!(report.columns[1], "priority.name");

    // description and priority.name each miss 3 cells, project.name 1;
    // ties rank alphabetically
    assert_eq!(report.missing.len(), 3);
    assert_eq!(report.missing[0].column, "description");
    assert_eq!(report.missing[0].missing, 3);
    assert_eq!(report.missing[1].column, "priority.name");
    assert_eq!(report.missing[1].missing, 3);
    assert_eq!(report.missing[2].column, "project.name");
    assert_eq!(report.missing[2].missing, 1);
}

#[test]
fn test_full_pipeline() {
    let config = AnalysisConfig::default();
    let report = run_analysis_from_reader(FIXTURE.as_bytes(), "issues_sample.csv", &config).unwrap();

    assert_eq!(report.cleaning.input_rows, 20);
    assert_eq!(report.cleaning.removed, 3);
    assert_eq!(report.cleaning.removed_pct, 15.0);
    assert_eq!(report.rows_analyzed, 17);

    // mixed-case spellings all normalize into the same buckets
    let dist = &report.severity_distribution;
    let count_of = |label: &str| {
        dist.entries
            .iter()
            .find(|e| e.value == label)
            .map(|e| e.count)
            .unwrap_or(0)
    };
    assert_eq!(count_of("Major"), 6);
    assert_eq!(count_of("Critical"), 3);
    assert_eq!(count_of("Blocker"), 2);
    assert_eq!(count_of("Minor"), 3);
    assert_eq!(count_of("Trivial"), 2);
    assert_eq!(count_of("Urgent"), 1);

    let total: usize = dist.entries.iter().map(|e| e.count).sum();
    assert_eq!(total, dist.total);

    // the non-canonical label is surfaced, not dropped
    assert_eq!(report.cleaning.unexpected_labels.get("Urgent"), Some(&1));
}

#[test]
fn test_status_crosstab_buckets_rare_status() {
    let config = AnalysisConfig::default();
    let report = run_analysis_from_reader(FIXTURE.as_bytes(), "issues_sample.csv", &config).unwrap();

    let tab = &report.severity_by_status;
    // six distinct statuses, top five kept, "Patch Available" bucketed
    assert_eq!(tab.columns.last().map(String::as_str), Some("Other"));
    assert!(!tab.columns.iter().any(|c| c == "Patch Available"));
    assert_eq!(tab.col_totals["Other"], 1);
    assert_eq!(tab.rows["Urgent"]["Other"], 1);

    let row_sum: usize = tab.row_totals.values().sum();
    assert_eq!(row_sum, 17);
}

#[test]
fn test_project_grouping_with_small_k() {
    let config = AnalysisConfig {
        top_project_count: 3,
        ..AnalysisConfig::default()
    };
    let report = run_analysis_from_reader(FIXTURE.as_bytes(), "issues_sample.csv", &config).unwrap();

    let tab = &report.severity_by_project;
    assert_eq!(tab.columns, vec!["HADOOP", "HBASE", "SPARK", "Other"]);
    // CASSANDRA(2) + KAFKA(1) + FLINK(1) + the projectless row
    assert_eq!(tab.col_totals["Other"], 5);
}

#[test]
fn test_desc_length_group_statistics() {
    let config = AnalysisConfig::default();
    let report = run_analysis_from_reader(FIXTURE.as_bytes(), "issues_sample.csv", &config).unwrap();

    let group = |name: &str| {
        report
            .desc_length_by_severity
            .groups
            .iter()
            .find(|g| g.group == name)
            .unwrap()
    };

    // "short note" (10) and "ok" (2)
    let trivial = group("Trivial");
    assert_eq!(trivial.count, 2);
    assert_eq!(trivial.mean, 6.0);
    assert_eq!(trivial.median, 6.0);
    let std = trivial.std_dev.unwrap();
    assert!((std - 32.0_f64.sqrt()).abs() < 1e-9);

    // blank description falls back to the 4-code-point summary "típo";
    // a singleton group has no defined dispersion
    let urgent = group("Urgent");
    assert_eq!(urgent.count, 1);
    assert_eq!(urgent.mean, 4.0);
    assert_eq!(urgent.median, 4.0);
    assert_eq!(urgent.std_dev, None);
}

#[test]
fn test_strict_mode_rejects_fixture() {
    let config = AnalysisConfig {
        strict_labels: true,
        ..AnalysisConfig::default()
    };

    let err =
        run_analysis_from_reader(FIXTURE.as_bytes(), "issues_sample.csv", &config).unwrap_err();
    assert!(matches!(err, StatsError::UnexpectedLabels { .. }));
}

#[test]
fn test_sampling_caps_the_table() {
    let config = AnalysisConfig {
        sample_size: Some(10),
        ..AnalysisConfig::default()
    };
    let report = run_analysis_from_reader(FIXTURE.as_bytes(), "issues_sample.csv", &config).unwrap();

    // first 10 data rows all carry a priority
    assert_eq!(report.cleaning.input_rows, 10);
    assert_eq!(report.rows_analyzed, 10);
}
