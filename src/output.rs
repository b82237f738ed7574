//! Output formatting for regcollapse tables.
//!
//! All tables are tab-separated without a header line, so stages can be
//! piped into each other and into `sort`.

use crate::merger::{Collapsed, Member};
use crate::tally::RegionTally;
use crate::types::{AnnotatedRegion, Stats};

/// Format a statistic the way the upstream tables write them.
///
/// Values whose decimal exponent lies in `-4..16` print positionally:
/// integral ones keep one decimal place (`3.0`), others use the shortest
/// representation that reads back to the same value. Outside that range the
/// shortest digits print in scientific form with a signed, two-digit
/// exponent (`5e-05`, `1.5e+16`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        if value.fract() == 0.0 {
            format!("{:.1}", value)
        } else {
            format!("{}", value)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Format a tally count. A strand that received no reads prints as `0`.
fn format_count(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format_float(value)
    }
}

fn format_stats(stats: &Stats) -> String {
    stats
        .values()
        .iter()
        .map(|v| format_float(*v))
        .collect::<Vec<_>>()
        .join("\t")
}

/// Format one row of the 15-column annotation table.
pub fn format_annotated_line(region: &AnnotatedRegion) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        region.chrom,
        region.start,
        region.end,
        region.id,
        region.width,
        region.strand,
        format_stats(&region.stats),
        region.genomic_type,
        region.overlap_symbol
    )
}

/// Format a merged interval as one 16-column row per member.
pub fn format_long_lines(collapsed: &Collapsed) -> Vec<String> {
    let interval = &collapsed.interval;

    interval
        .members()
        .iter()
        .map(|member| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                collapsed.uid,
                interval.chrom,
                interval.start,
                interval.end,
                member.id,
                interval.width,
                interval.strand,
                format_stats(&member.stats),
                member.genomic_type,
                member.overlap_symbol
            )
        })
        .collect()
}

fn join_members<F>(members: &[Member], column: F) -> String
where
    F: Fn(&Member) -> String,
{
    members.iter().map(column).collect::<Vec<_>>().join(";")
}

/// Format a merged interval as a single row, member columns joined with `;`.
pub fn format_wide_line(collapsed: &Collapsed) -> String {
    let interval = &collapsed.interval;
    let members = interval.members();

    let stat_columns: Vec<String> = (0..Stats::COLUMNS)
        .map(|col| join_members(members, |m| format_float(m.stats.values()[col])))
        .collect();

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        collapsed.uid,
        interval.chrom,
        interval.start,
        interval.end,
        join_members(members, |m| m.id.clone()),
        interval.width,
        interval.strand,
        stat_columns.join("\t"),
        join_members(members, |m| m.genomic_type.to_string()),
        join_members(members, |m| m.overlap_symbol.clone())
    )
}

/// Format one row of the strand tally table.
pub fn format_tally_line(tally: &RegionTally) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        tally.chrom,
        tally.start,
        tally.end,
        tally.id,
        tally.length,
        format_count(tally.count_plus),
        format_count(tally.count_minus)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merger::MergedInterval;
    use crate::types::{GenomicType, Strand};

    fn annotated(start: i64, end: i64, id: &str, cp: f64) -> AnnotatedRegion {
        AnnotatedRegion {
            chrom: "chr1".to_string(),
            start,
            end,
            id: id.to_string(),
            width: end - start,
            strand: Strand::Positive,
            stats: Stats::from_values([cp, 0.5, 2.0, 1.0, 0.0, 0.25, 0.0]),
            genomic_type: GenomicType::Feature("miRNA".to_string()),
            overlap_symbol: format!("MIR{}", id),
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(9.0909), "9.0909");
        assert_eq!(format_float(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_format_float_scientific_range() {
        assert_eq!(format_float(0.00005), "5e-05");
        assert_eq!(format_float(1e-7), "1e-07");
        assert_eq!(format_float(1.5e-5), "1.5e-05");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(2.5e100), "2.5e+100");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_annotated_line() {
        let line = format_annotated_line(&annotated(100, 200, "A", 10.0));
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 15);
        assert_eq!(
            line,
            "chr1\t100\t200\tA\t100\t+\t10.0\t0.5\t2.0\t1.0\t0.0\t0.25\t0.0\tmiRNA\tMIRA"
        );
    }

    #[test]
    fn test_format_long_lines_share_interval_columns() {
        let mut interval = MergedInterval::open(annotated(100, 200, "A", 1.0));
        interval.fold(annotated(150, 300, "B", 2.0));
        let collapsed = Collapsed { uid: 4, interval };

        let lines = format_long_lines(&collapsed);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "4\tchr1\t100\t300\tA\t200\t+\t1.0\t0.5\t2.0\t1.0\t0.0\t0.25\t0.0\tmiRNA\tMIRA"
        );
        assert_eq!(
            lines[1],
            "4\tchr1\t100\t300\tB\t200\t+\t2.0\t0.5\t2.0\t1.0\t0.0\t0.25\t0.0\tmiRNA\tMIRB"
        );
        for line in &lines {
            assert_eq!(line.split('\t').count(), 16);
        }
    }

    #[test]
    fn test_format_wide_line_joins_members() {
        let mut interval = MergedInterval::open(annotated(100, 200, "A", 1.0));
        interval.fold(annotated(150, 300, "B", 2.0));
        let collapsed = Collapsed { uid: 0, interval };

        let line = format_wide_line(&collapsed);
        assert_eq!(
            line,
            "0\tchr1\t100\t300\tA;B\t200\t+\t1.0;2.0\t0.5;0.5\t2.0;2.0\t1.0;1.0\t0.0;0.0\t0.25;0.25\t0.0;0.0\tmiRNA;miRNA\tMIRA;MIRB"
        );
        assert_eq!(line.split('\t').count(), 16);
    }

    #[test]
    fn test_format_tally_line_untouched_strand_is_zero() {
        let mut tally = RegionTally::new("chr1".to_string(), 10, 96, "REG1".to_string(), 86);
        tally.count_plus = 0.5;
        assert_eq!(format_tally_line(&tally), "chr1\t10\t96\tREG1\t86\t0.5\t0");

        tally.count_minus = 2.0;
        assert_eq!(format_tally_line(&tally), "chr1\t10\t96\tREG1\t86\t0.5\t2.0");
    }
}
