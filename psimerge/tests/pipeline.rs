use std::fs;

use psimerge::prelude::*;
use psimerge::tools::PARTS_DIR;
use rstest::{
    fixture,
    rstest,
};

mod common;
use common::*;

#[fixture]
fn demo_run() -> DemoRun {
    DemoRun::new().unwrap()
}

#[rstest]
fn test_missing_group_table(demo_run: DemoRun) {
    let config = demo_run
        .config()
        .with_groups(demo_run.path().join("absent.tab"));
    let err = MergePipeline::try_new(config).err().unwrap();
    assert!(err.is_config(), "{}", err);
}

#[rstest]
fn test_empty_group_table(demo_run: DemoRun) -> anyhow::Result<()> {
    let groups = demo_run.path().join("empty.tab");
    fs::write(&groups, "\n")?;
    let err = MergePipeline::try_new(demo_run.config().with_groups(groups))
        .err()
        .unwrap();
    assert!(err.is_config(), "{}", err);
    Ok(())
}

#[rstest]
fn test_missing_output_dir(demo_run: DemoRun) {
    let config = demo_run
        .config()
        .with_output_dir(Some(demo_run.path().join("absent")));
    assert!(MergePipeline::try_new(config).err().unwrap().is_config());
}

#[rstest]
fn test_expression_requires_lengths(demo_run: DemoRun) {
    let config = demo_run.config().with_expr_only(true);
    assert!(MergePipeline::try_new(config).err().unwrap().is_config());

    let config = demo_run.config().with_species(Some("hg38".to_string()));
    let err = MergePipeline::try_new(config).err().unwrap();
    assert!(err.to_string().contains("hg38_mRNA-50.eff"), "{}", err);
}

#[rstest]
#[case::v1(IrVersion::V1, false, vec![
    FormatKind::IrV1,
    FormatKind::Microexon,
    FormatKind::ExonSkip,
    FormatKind::MultiExon,
    FormatKind::Junction,
])]
#[case::v2(IrVersion::V2, false, vec![
    FormatKind::IrV2,
    FormatKind::IrSummary,
    FormatKind::Microexon,
    FormatKind::ExonSkip,
    FormatKind::MultiExon,
    FormatKind::Junction,
])]
#[case::expr_only(IrVersion::V2, true, vec![FormatKind::Expression])]
fn test_selected_formats(
    #[case] ir_version: IrVersion,
    #[case] expr_only: bool,
    #[case] expected: Vec<FormatKind>,
) {
    let config = MergeConfig::default()
        .with_ir_version(ir_version)
        .with_expr_only(expr_only);
    assert_eq!(config.formats(), expected);
}

#[test]
fn test_species_adds_expression() {
    let config = MergeConfig::default().with_species(Some("mm10".to_string()));
    assert_eq!(config.formats().last(), Some(&FormatKind::Expression));
    assert_eq!(
        config.eff_table_path().unwrap(),
        Some(EffectiveLengthTable::resolve("VASTDB", "mm10"))
    );
}

#[rstest]
fn test_full_run(demo_run: DemoRun) -> anyhow::Result<()> {
    add_cassette_set(&demo_run)?;
    for subsample in ["s1", "s2"] {
        demo_run.add(subsample, FormatKind::IrV2, &[IR_HEADER, "HsaINT1\t1\t1\t1\t1"])?;
        demo_run.add(subsample, FormatKind::IrSummary, &[
            IR_SUMMARY_HEADER,
            "HsaINT1\t1\t1\t1\t1\t1\t1",
        ])?;
    }

    let out_dir = tempfile::tempdir()?;
    let config = demo_run
        .config()
        .with_output_dir(Some(out_dir.path().to_path_buf()));
    let summary = MergePipeline::try_new(config)?.run()?;

    assert_eq!(summary.formats.len(), 6);
    assert_eq!(summary.formats[&FormatKind::Microexon].subsamples, 3);
    assert_eq!(summary.formats[&FormatKind::IrV2].subsamples, 2);
    // intron retention is optional, the difference only warns
    assert_eq!(summary.warnings.len(), 2);
    assert!(summary.archived.is_empty());

    for kind in FormatKind::CASSETTE {
        for group in ["G1", "G2"] {
            assert!(out_dir.path().join(format!("{}{}", group, kind.suffix())).is_file());
        }
    }
    let g1 = fs::read_to_string(out_dir.path().join("G1.eej2"))?;
    assert_eq!(g1, "GENE1\tC1-C2\t2\t0\t0:2\n");
    Ok(())
}

#[rstest]
fn test_inconsistent_event_formats(demo_run: DemoRun) -> anyhow::Result<()> {
    add_cassette_set(&demo_run)?;
    fs::remove_file(demo_run.path().join(format!("s3{}", FormatKind::Microexon.suffix())))?;

    let err = MergePipeline::try_new(demo_run.config())?
        .run()
        .unwrap_err();
    match err {
        MergeError::Consistency(errors) => assert_eq!(errors.len(), 1),
        other => panic!("unexpected error {}", other),
    }
    Ok(())
}

#[rstest]
fn test_move_to_parts(demo_run: DemoRun) -> anyhow::Result<()> {
    add_cassette_set(&demo_run)?;
    let out_dir = tempfile::tempdir()?;
    let config = demo_run
        .config()
        .with_output_dir(Some(out_dir.path().to_path_buf()))
        .with_move_to_parts(true);
    let summary = MergePipeline::try_new(config)?.run()?;

    let parts = demo_run.path().join(PARTS_DIR);
    assert_eq!(summary.archived.len(), 12);
    assert!(parts.join("s1.micX").is_file());
    assert!(parts.join("s3.eej2").is_file());
    assert!(!demo_run.path().join("s1.micX").exists());
    assert!(demo_run.groups_path().is_file());
    Ok(())
}

#[rstest]
fn test_failed_run_keeps_inputs(demo_run: DemoRun) -> anyhow::Result<()> {
    add_cassette_set(&demo_run)?;
    demo_run.add("s1", FormatKind::Junction, &["GENE1\tC1-C2"])?;

    let config = demo_run.config().with_move_to_parts(true);
    assert!(MergePipeline::try_new(config)?.run().is_err());
    assert!(!demo_run.path().join(PARTS_DIR).exists());
    assert!(demo_run.path().join("s1.micX").is_file());
    Ok(())
}
