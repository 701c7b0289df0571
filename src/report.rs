use crate::analyze::{ColumnStats, Report};
use anyhow::Result;
use std::io::Write;
use tabwriter::TabWriter;

/// Render the report as aligned text blocks, one per column: a header line,
/// then labeled statistic lines.  Formatting only; all the decisions were
/// made in `analyze`.
pub fn write_text(out: impl Write, report: &Report) -> Result<()> {
    let mut out = TabWriter::new(out);
    for summary in &report.0 {
        writeln!(out, "{}:", summary.name)?;
        match &summary.stats {
            ColumnStats::Numeric(s) => {
                writeln!(out, "\ttype:\tnumeric")?;
                writeln!(out, "\tcount:\t{}", s.count)?;
                writeln!(out, "\tmissing:\t{}", s.missing)?;
                writeln!(out, "\tmean:\t{}", s.mean)?;
                writeln!(out, "\tstd dev:\t{}", s.std_dev)?;
                writeln!(out, "\tmin:\t{}", s.min)?;
                writeln!(out, "\tmax:\t{}", s.max)?;
            }
            ColumnStats::Categorical(s) => {
                writeln!(out, "\ttype:\tcategorical")?;
                writeln!(out, "\tcount:\t{}", s.count)?;
                writeln!(out, "\tmissing:\t{}", s.missing)?;
                writeln!(out, "\tdistinct:\t{}", s.distinct)?;
                writeln!(out, "\tmode:\t{} (x{})", s.mode, s.mode_count)?;
            }
            ColumnStats::Empty { missing } => {
                writeln!(out, "\ttype:\tempty")?;
                writeln!(out, "\tcount:\t0")?;
                writeln!(out, "\tmissing:\t{}", missing)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

pub fn write_json(mut out: impl Write, report: &Report) -> Result<()> {
    let s = serde_json::to_string_pretty(report)?;
    writeln!(out, "{}", s)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::load::{read_table, Config};

    fn mk_report(input: &str) -> Report {
        let table = read_table(input.as_bytes(), &Config::default()).unwrap();
        analyze(&table)
    }

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        write_text(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn one_block_per_column() {
        let report = mk_report("age,name\n34,alice\n2,bob\n");
        let text = render(&report);
        assert!(text.contains("age:\n"));
        assert!(text.contains("numeric"));
        assert!(text.contains("name:\n"));
        assert!(text.contains("categorical"));
        // One header line plus 7 numeric and 5 categorical stat lines
        assert_eq!(text.lines().count(), 14);
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = mk_report("a,b\n1,x\n2,y\n2,x\n");
        assert_eq!(render(&report), render(&report));
    }

    #[test]
    fn json_is_tagged_and_ordered() {
        let report = mk_report("a,b\n1,x\n");
        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v[0]["name"], "a");
        assert_eq!(v[0]["stats"]["type"], "numeric");
        assert_eq!(v[1]["name"], "b");
        assert_eq!(v[1]["stats"]["type"], "categorical");
    }
}
