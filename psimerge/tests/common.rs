#![allow(unused)]
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use psimerge::prelude::*;
use tempfile::TempDir;

pub const MIC_HEADER: &str =
    "GENE\tEVENT\tCOORD\tLENGTH\tFullCO\tCOMPLEX\tPSI\tRAW_INC\tRAW_EXC\tCORR_INC\tCORR_EXC";
pub const IR_HEADER: &str = "EVENT\tEIJ1\tEIJ2\tEJ\tI";
pub const IR_SUMMARY_HEADER: &str = "EVENT\tEIJ1\tEIJ2\tEJ\tI\tCOV\tBAL";

/// Input directory of a demo run: a group table plus per-subsample tables.
pub struct DemoRun {
    dir:    TempDir,
    groups: Vec<(String, String)>,
}

impl DemoRun {
    /// Subsamples `s1` and `s2` in group `G1`, `s3` in `G2`.
    pub fn new() -> anyhow::Result<Self> {
        let run = Self {
            dir:    tempfile::tempdir()?,
            groups: vec![
                ("s1".into(), "G1".into()),
                ("s2".into(), "G1".into()),
                ("s3".into(), "G2".into()),
            ],
        };
        run.write_groups()?;
        Ok(run)
    }

    fn write_groups(&self) -> anyhow::Result<()> {
        let text = self
            .groups
            .iter()
            .map(|(s, g)| format!("{}\t{}\n", s, g))
            .collect::<String>();
        fs::write(self.groups_path(), text)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn groups_path(&self) -> PathBuf {
        self.dir.path().join("groups.tab")
    }

    /// Writes `<subsample><suffix>` into the input directory.
    pub fn add(
        &self,
        subsample: &str,
        kind: FormatKind,
        lines: &[&str],
    ) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(format!("{}{}", subsample, kind.suffix()));
        let mut text = lines.join("\n");
        text.push('\n');
        fs::write(&path, text)?;
        Ok(path)
    }

    /// Writes an effective length table and returns its path.
    pub fn add_eff_table(
        &self,
        lines: &[&str],
    ) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join("eff_lengths.tab");
        fs::write(&path, lines.join("\n"))?;
        Ok(path)
    }

    pub fn config(&self) -> MergeConfig {
        MergeConfig::default()
            .with_groups(self.groups_path())
            .with_input_dir(self.path().to_path_buf())
    }

    pub fn output(
        &self,
        group: &str,
        kind: FormatKind,
    ) -> PathBuf {
        self.dir.path().join(format!("{}{}", group, kind.suffix()))
    }

    /// Rows of a group output, split into cells.
    pub fn read_output(
        &self,
        group: &str,
        kind: FormatKind,
    ) -> anyhow::Result<Vec<Vec<String>>> {
        let text = fs::read_to_string(self.output(group, kind))?;
        Ok(text
            .lines()
            .map(|line| line.split('\t').map(String::from).collect())
            .collect())
    }
}

/// Microexon row with the given raw and corrected counts.
pub fn mic_row(
    event: &str,
    counts: [&str; 4],
) -> String {
    format!(
        "GENE1\t{}\tchr1:100-109\t9\tchr1:50,100-109,200\tS\t0.00\t{}",
        event,
        counts.join("\t")
    )
}

/// Exon skipping row: raw `inc1, inc2, exc, sum` then corrected
/// `inc1, inc2, exc`.
pub fn exsk_row(
    event: &str,
    raw: [&str; 4],
    corrected: [&str; 3],
) -> String {
    let mut cells = (0..12).map(|i| format!("l{}", i)).collect::<Vec<_>>();
    cells[3] = event.to_string();
    cells.push("NA".to_string());
    cells.extend(raw.iter().map(|s| s.to_string()));
    cells.extend(corrected.iter().map(|s| s.to_string()));
    cells.extend((0..4).map(|i| format!("t{}", i)));
    cells.join("\t")
}

pub fn exsk_header() -> String {
    (0..24).map(|i| format!("H{}", i)).collect::<Vec<_>>().join("\t")
}

/// Multi-exon row with the given reference junction triples.
pub fn multi_row(
    event: &str,
    junctions: [&str; 3],
) -> String {
    let mut cells = (0..12).map(|i| format!("m{}", i)).collect::<Vec<_>>();
    cells[3] = event.to_string();
    cells.push("NA".to_string());
    cells.extend(["1", "2", "3", "6"].map(String::from));
    cells.extend(["mid0", "mid1"].map(String::from));
    cells.extend(junctions.map(String::from));
    cells.push("S".to_string());
    cells.extend(["p0", "p1", "p2", "p3"].map(String::from));
    cells.join("\t")
}

pub fn multi_header() -> String {
    (0..27).map(|i| format!("H{}", i)).collect::<Vec<_>>().join("\t")
}

/// Writes one consistent set of event tables for every subsample.
pub fn add_cassette_set(run: &DemoRun) -> anyhow::Result<()> {
    for subsample in ["s1", "s2", "s3"] {
        run.add(subsample, FormatKind::Microexon, &[
            MIC_HEADER,
            &mic_row("HsaEX1", ["1", "1", "1", "1"]),
        ])?;
        run.add(subsample, FormatKind::ExonSkip, &[
            &exsk_header(),
            &exsk_row("HsaEX2", ["1", "1", "1", "3"], ["1", "1", "1"]),
        ])?;
        run.add(subsample, FormatKind::MultiExon, &[
            &multi_header(),
            &multi_row("HsaEX3", ["1=1=1", "1=1=1", "1=1=1"]),
        ])?;
        run.add(subsample, FormatKind::Junction, &["GENE1\tC1-C2\t1\t0\t0:1"])?;
    }
    Ok(())
}

/// Two subsample tables of `kind`, header included. Each holds an event the
/// other lacks, and fields carry counts that are mixed with sentinels.
pub fn subsample_tables(kind: FormatKind) -> [Vec<String>; 2] {
    let (header, first, second): (Option<String>, Vec<String>, Vec<String>) = match kind {
        FormatKind::IrV1 | FormatKind::IrV2 => (
            Some(IR_HEADER.to_string()),
            vec!["HsaINT1\t1\t2\t3\t4".into(), "HsaINT2\t0.5\tNA\t1\t2".into()],
            vec!["HsaINT1\t10\t20\tNA\t40".into(), "HsaINT3\t1\t1\t1\t1".into()],
        ),
        FormatKind::IrSummary => (
            Some(IR_SUMMARY_HEADER.to_string()),
            vec![
                "HsaINT1\t1\t2\t3\t4\t5\tne".into(),
                "HsaINT2\t1\t1\t1\t1\t1\t1".into(),
            ],
            vec!["HsaINT1\t1\t1\t1\t1\t1\t1.5".into()],
        ),
        FormatKind::Microexon => (
            Some(MIC_HEADER.to_string()),
            vec![
                mic_row("HsaEX1", ["1", "2", "0.5", "1"]),
                mic_row("HsaEX4", ["NA", "1", "1", "1"]),
            ],
            vec![mic_row("HsaEX1", ["1", "2", "3", "3"])],
        ),
        FormatKind::ExonSkip => (
            Some(exsk_header()),
            vec![exsk_row("HsaEX2", ["4", "4", "2", "10"], ["4", "4", "1"])],
            vec![
                exsk_row("HsaEX2", ["8", "NA", "2", "14"], ["8", "4", "2.5"]),
                exsk_row("HsaEX6", ["1", "1", "1", "3"], ["1", "1", "1"]),
            ],
        ),
        FormatKind::MultiExon => (
            Some(multi_header()),
            vec![multi_row("HsaEX3", ["10=NA=4", "10=x=4", "NA"])],
            vec![
                multi_row("HsaEX3", ["1=2=3", "2=2=2", "5=1=5"]),
                multi_row("HsaEX5", ["1=1=1", "NA", "1=1"]),
            ],
        ),
        FormatKind::Junction => (
            None,
            vec!["G\tC1-C2\t3\t0\t0:1,2:2".into(), "G\tC2-C3\tNA\t0\t1:4".into()],
            vec!["G\tC1-C2\t2\t0\t2:2".into(), "G\tC2-C3\t1\t0\t7:1".into()],
        ),
        FormatKind::Expression => (
            None,
            vec!["geneA\t5.0\t100".into(), "geneB\t1.0\tNA".into()],
            vec!["geneA\t9.0\t50".into(), "geneB\t1.0\t30".into(), "geneC\t0\t2".into()],
        ),
    };
    [first, second].map(|rows| header.iter().cloned().chain(rows).collect())
}
