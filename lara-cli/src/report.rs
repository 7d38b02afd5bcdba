//! Output formats for pair summaries

use anyhow::{Context, Result};
use lara_core::PairSummary;
use std::io::Write;

/// Column header of the tabular report.
pub const TABLE_HEADER: &[&str] = &[
    "seq_a",
    "seq_b",
    "len_a",
    "len_b",
    "optimal_score",
    "identity",
    "edges",
];

fn format_edges(edges: &[(usize, usize)]) -> String {
    edges
        .iter()
        .map(|(a, b)| format!("{}-{}", a, b))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write one tab separated line per pair.
///
/// When summaries carry their edge lists a trailing `edge_list` column holds
/// them as `a-b` pairs separated by commas.
pub fn write_table<W: Write>(mut out: W, summaries: &[PairSummary]) -> Result<()> {
    let with_edges = summaries.iter().any(|s| s.edges.is_some());

    let mut header = TABLE_HEADER.join("\t");
    if with_edges {
        header.push_str("\tedge_list");
    }
    writeln!(out, "{}", header)?;

    for s in summaries {
        write!(
            out,
            "{}\t{}\t{}\t{}\t{:.2}\t{:.4}\t{}",
            s.seq_a, s.seq_b, s.len_a, s.len_b, s.optimal_score, s.identity, s.edge_count
        )?;
        if with_edges {
            let list = s.edges.as_deref().map(format_edges).unwrap_or_default();
            write!(out, "\t{}", list)?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Write all summaries as one pretty-printed JSON array.
pub fn write_json<W: Write>(mut out: W, summaries: &[PairSummary]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, summaries)
        .context("Failed to serialize pair summaries")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(edges: Option<Vec<(usize, usize)>>) -> PairSummary {
        PairSummary {
            seq_a: "r1".to_string(),
            seq_b: "r2".to_string(),
            len_a: 3,
            len_b: 3,
            optimal_score: 6.0,
            identity: 2.0,
            edge_count: 3,
            edges,
        }
    }

    #[test]
    fn test_table_without_edges() {
        let mut buf = Vec::new();
        write_table(&mut buf, &[summary(None)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "seq_a\tseq_b\tlen_a\tlen_b\toptimal_score\tidentity\tedges");
        assert_eq!(lines[1], "r1\tr2\t3\t3\t6.00\t2.0000\t3");
    }

    #[test]
    fn test_table_with_edges() {
        let mut buf = Vec::new();
        write_table(&mut buf, &[summary(Some(vec![(0, 0), (1, 1), (2, 2)]))]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().next().unwrap().ends_with("\tedge_list"));
        assert!(text.lines().nth(1).unwrap().ends_with("\t0-0,1-1,2-2"));
    }

    #[test]
    fn test_json_roundtrip() {
        let summaries = vec![summary(Some(vec![(0, 1)])), summary(None)];
        let mut buf = Vec::new();
        write_json(&mut buf, &summaries).unwrap();
        let parsed: Vec<PairSummary> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, summaries);
    }
}
