use crate::load::{Column, Table};
use field_stats::Stats;
use log::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-column summary.  The numeric/categorical split is decided once, here,
/// so everything downstream can match exhaustively instead of re-sniffing
/// the values.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
    /// Every value in the column was missing; there's nothing to aggregate.
    Empty { missing: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumericStats {
    /// Non-missing values; the population the aggregates are taken over
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoricalStats {
    pub count: usize,
    pub missing: usize,
    pub distinct: usize,
    /// The most frequent value; ties go to the lexicographically smallest
    pub mode: String,
    pub mode_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub stats: ColumnStats,
}

/// One [`ColumnSummary`] per header column, in file order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report(pub Vec<ColumnSummary>);

pub fn analyze(table: &Table) -> Report {
    Report(
        table
            .columns
            .iter()
            .map(|column| ColumnSummary {
                name: column.name.clone(),
                stats: column_stats(column),
            })
            .collect(),
    )
}

fn column_stats(column: &Column) -> ColumnStats {
    // An empty field is a missing value, and missing values don't take part
    // in classification or aggregation.
    let missing = column.values.iter().filter(|v| v.is_empty()).count();
    let present = column.values.iter().filter(|v| !v.is_empty());

    if missing == column.values.len() {
        return ColumnStats::Empty { missing };
    }

    // All non-missing values parse as f64 => numeric; otherwise categorical.
    let numbers = present
        .clone()
        .map(|v| v.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>();
    match numbers {
        Ok(numbers) => {
            debug!("column {:?} is numeric", column.name);
            let stats = numbers.into_iter().collect::<Stats>();
            ColumnStats::Numeric(NumericStats {
                count: stats.count,
                missing,
                mean: stats.mean,
                std_dev: stats.std_dev,
                min: stats.min,
                max: stats.max,
            })
        }
        Err(_) => {
            debug!("column {:?} is categorical", column.name);
            let mut freqs: BTreeMap<&str, usize> = BTreeMap::new();
            let mut count = 0;
            for v in present {
                *freqs.entry(v.as_str()).or_insert(0) += 1;
                count += 1;
            }
            let distinct = freqs.len();
            // First strictly-greater wins, so ties keep the smallest key
            let (mode, mode_count) = freqs
                .into_iter()
                .fold(("", 0), |best, x| if x.1 > best.1 { x } else { best });
            ColumnStats::Categorical(CategoricalStats {
                count,
                missing,
                distinct,
                mode: mode.to_string(),
                mode_count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{read_table, Config};

    fn report(input: &str) -> Report {
        let table = read_table(input.as_bytes(), &Config::default()).unwrap();
        analyze(&table)
    }

    #[test]
    fn one_summary_per_column() {
        let report = report("a,b,c\n1,x,\n2,y,\n");
        assert_eq!(report.0.len(), 3);
        let names = report.0.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn numeric_column() {
        let report = report("n\n1\n2\n3\n4\n");
        match &report.0[0].stats {
            ColumnStats::Numeric(s) => {
                assert_eq!(s.count, 4);
                assert_eq!(s.missing, 0);
                assert_eq!(s.mean, 2.5);
                assert_eq!(s.min, 1.);
                assert_eq!(s.max, 4.);
                assert!((s.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
            }
            s => panic!("expected numeric stats, got {:?}", s),
        }
    }

    #[test]
    fn one_bad_value_makes_it_categorical() {
        let report = report("n\n1\n2\nbanana\n4\n");
        match &report.0[0].stats {
            ColumnStats::Categorical(s) => {
                assert_eq!(s.count, 4);
                assert_eq!(s.distinct, 4);
            }
            s => panic!("expected categorical stats, got {:?}", s),
        }
    }

    #[test]
    fn missing_values_are_excluded_from_aggregates() {
        let report = report("n\n1\n\n3\n");
        match &report.0[0].stats {
            ColumnStats::Numeric(s) => {
                assert_eq!(s.count, 2);
                assert_eq!(s.missing, 1);
                assert_eq!(s.mean, 2.);
            }
            s => panic!("expected numeric stats, got {:?}", s),
        }
    }

    #[test]
    fn all_missing_column() {
        let report = report("a,b\n1,\n2,\n");
        assert_eq!(report.0[1].stats, ColumnStats::Empty { missing: 2 });
    }

    #[test]
    fn mode_and_distinct() {
        let report = report("fruit\napple\nbanana\napple\ncherry\n");
        match &report.0[0].stats {
            ColumnStats::Categorical(s) => {
                assert_eq!(s.distinct, 3);
                assert_eq!(s.mode, "apple");
                assert_eq!(s.mode_count, 2);
            }
            s => panic!("expected categorical stats, got {:?}", s),
        }
    }

    #[test]
    fn mode_tie_takes_smallest_value() {
        let report = report("fruit\nbanana\napple\n");
        match &report.0[0].stats {
            ColumnStats::Categorical(s) => {
                assert_eq!(s.mode, "apple");
                assert_eq!(s.mode_count, 1);
            }
            s => panic!("expected categorical stats, got {:?}", s),
        }
    }
}
