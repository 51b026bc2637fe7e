mod tally_tests {
    use std::str::FromStr;

    use crate::data_structs::tally::*;

    #[test]
    fn test_tally_from_str() {
        assert_eq!(Tally::from_str("12").unwrap(), Tally::Count(12.0));
        assert_eq!(Tally::from_str("3.5").unwrap(), Tally::Count(3.5));
        assert_eq!(Tally::from_str("NA").unwrap(), Tally::NA);
        assert_eq!(Tally::from_str("ne").unwrap(), Tally::NE);
        assert!(Tally::from_str("abc").is_err());
        assert!(Tally::from_str("").is_err());
        assert!(Tally::from_str("inf").is_err());
    }

    #[test]
    fn test_tally_display() {
        assert_eq!(Tally::Count(150.0).to_string(), "150");
        assert_eq!(Tally::Count(12.25).to_string(), "12.25");
        assert_eq!(Tally::NA.to_string(), "NA");
        assert_eq!(Tally::NE.to_string(), "ne");
    }

    #[test]
    fn test_tally_display_rounds_sums() {
        let mut tally = Tally::Count(1.1);
        tally.merge(&Tally::Count(2.2));
        assert_eq!(tally.to_string(), "3.3");

        let mut tally = Tally::Count(0.1);
        tally.merge(&Tally::Count(0.2));
        assert_eq!(tally.to_string(), "0.3");
    }

    #[test]
    fn test_tally_merge_sums_counts() {
        let mut tally = Tally::default();
        tally.merge(&Tally::Count(3.0));
        tally.merge(&Tally::Count(4.5));
        assert_eq!(tally, Tally::Count(7.5));
    }

    #[test]
    fn test_tally_missing_absorbs() {
        let mut tally = Tally::Count(10.0);
        tally.merge(&Tally::NA);
        assert_eq!(tally, Tally::NA);
        tally.merge(&Tally::Count(5.0));
        assert_eq!(tally, Tally::NA);

        let mut tally = Tally::NA;
        tally.merge(&Tally::NE);
        assert_eq!(tally, Tally::NE, "last sentinel seen is kept");
    }

    #[test]
    fn test_tally_merge_is_per_field() {
        let mut left = [Tally::Count(1.0), Tally::Count(2.0)];
        left.merge(&[Tally::NA, Tally::Count(3.0)]);
        assert_eq!(left, [Tally::NA, Tally::Count(5.0)]);
    }

    #[test]
    fn test_triple_parse() {
        assert_eq!(
            Triple::parse_lenient("10=8=4"),
            Triple::new(Tally::Count(10.0), Tally::Count(8.0), Tally::Count(4.0))
        );
        assert_eq!(
            Triple::parse_lenient("10=NA=4"),
            Triple::new(Tally::Count(10.0), Tally::NA, Tally::Count(4.0))
        );
    }

    #[test]
    fn test_triple_parse_degrades_parts() {
        assert_eq!(
            Triple::parse_lenient("10=x=4"),
            Triple::new(Tally::Count(10.0), Tally::Count(0.0), Tally::Count(4.0))
        );
        assert_eq!(
            Triple::parse_lenient("7"),
            Triple::new(Tally::Count(7.0), Tally::Count(0.0), Tally::Count(0.0))
        );
        assert_eq!(Triple::parse_lenient("garbage"), Triple::default());
    }

    #[test]
    fn test_triple_merge_and_display() {
        let mut triple = Triple::parse_lenient("1=2=3");
        triple.merge(&Triple::parse_lenient("4=NA=6"));
        assert_eq!(triple.to_string(), "5=NA=9");
    }

    #[test]
    fn test_bare_sentinel_triple() {
        let triple = Triple::parse_lenient("NA");
        assert_eq!(triple, Triple::new(Tally::NA, Tally::NA, Tally::NA));
        assert_eq!(triple.to_string(), "NA");

        let mut merged = Triple::parse_lenient("NA");
        merged.merge(&Triple::parse_lenient("1=2=3"));
        assert_eq!(merged.to_string(), "NA");

        assert_eq!(Triple::parse_lenient("NA=0=0").to_string(), "NA=0=0");
        assert_eq!(Triple::parse_lenient("NA=NA=NA").to_string(), "NA");
    }
}

mod enums_tests {
    use std::str::FromStr;

    use crate::data_structs::enums::*;

    #[test]
    fn test_ir_version_from_str() {
        assert_eq!(IrVersion::from_str("1").unwrap(), IrVersion::V1);
        assert_eq!(IrVersion::from_str("2").unwrap(), IrVersion::V2);
        assert_eq!(IrVersion::from_str("v2").unwrap(), IrVersion::V2);
        assert!(IrVersion::from_str("3").unwrap_err().is_config());
    }

    #[test]
    fn test_ir_version_formats() {
        assert_eq!(IrVersion::V1.formats(), &[FormatKind::IrV1]);
        assert_eq!(
            IrVersion::V2.formats(),
            &[FormatKind::IrV2, FormatKind::IrSummary]
        );
    }

    #[test]
    fn test_format_kind_headers() {
        assert!(FormatKind::ExonSkip.has_header());
        assert!(FormatKind::IrSummary.has_header());
        assert!(!FormatKind::Junction.has_header());
        assert!(!FormatKind::Expression.has_header());
    }

    #[test]
    fn test_format_kind_suffixes_are_distinct() {
        let suffixes = FormatKind::all().map(|kind| kind.suffix());
        for (i, a) in suffixes.iter().enumerate() {
            for b in suffixes.iter().skip(i + 1) {
                assert!(!a.ends_with(b) && !b.ends_with(a), "{} / {}", a, b);
            }
        }
    }
}

mod records_tests {
    use csv::StringRecord;

    use crate::data_structs::records::*;
    use crate::data_structs::{
        ComplexityTier,
        Tally,
        Triple,
    };

    fn row(line: &str) -> StringRecord {
        StringRecord::from(line.split('\t').collect::<Vec<_>>())
    }

    #[test]
    fn test_ir_record() {
        let record = IrCountRecord::parse(&row("HsaINT0001\t10\t12\t3\tNA")).unwrap();
        let (key, _, counts) = record.into_parts();
        assert_eq!(key, "HsaINT0001");
        assert_eq!(counts[0], Tally::Count(10.0));
        assert_eq!(counts[3], Tally::NA);
    }

    #[test]
    fn test_ir_summary_record_accepts_ne() {
        let record =
            IrSummaryRecord::parse(&row("HsaINT0001\t1\tne\t3\t4\tne\t6")).unwrap();
        assert_eq!(record.values[1], Tally::NE);
        assert_eq!(record.values[5], Tally::Count(6.0));
    }

    #[test]
    fn test_ir_record_rejects_text() {
        let err = IrCountRecord::parse(&row("HsaINT0001\t10\tabc\t3\t4")).unwrap_err();
        assert!(err.contains("column 3"), "{}", err);
    }

    #[test]
    fn test_mic_record() {
        let record = MicRecord::parse(&row(
            "GENE1\tHsaEX0001\tchr1:10-20\t9\tchr1:5,10-20,30\tS\t50.00\t3\t4\t3.5\tNA",
        ))
        .unwrap();
        assert_eq!(record.counts.corr_inc, Tally::Count(3.5));
        assert_eq!(record.counts.corr_exc, Tally::NA);
        let (key, meta, _) = record.into_parts();
        assert_eq!(key, "HsaEX0001");
        assert_eq!(meta.len(), 6);
    }

    #[test]
    fn test_eej_record_positions() {
        let record = EejRecord::parse(&row("GENE1\tC1-A2\t5\t0\t0:2,10:3")).unwrap();
        assert_eq!(record.positions, vec![(0, 2.0), (10, 3.0)]);
        assert!(record.anomaly().is_none());

        let (key, meta, counts) = record.into_parts();
        assert_eq!(key, ("GENE1".to_string(), "C1-A2".to_string()));
        assert_eq!(meta, "0");
        assert_eq!(counts.histogram.len(), 2);
        assert_eq!(counts.histogram[&10], 3.0);
    }

    #[test]
    fn test_eej_record_far_positions() {
        let record =
            EejRecord::parse(&row("GENE1	C1-A2	2	0	18446744073709551615:1,10000000000:1"))
                .unwrap();
        let (_, _, counts) = record.into_parts();
        assert_eq!(counts.histogram.len(), 2);
        assert_eq!(counts.histogram[&usize::MAX], 1.0);

        assert!(EejRecord::parse(&row("GENE1	C1-A2	1	0	18446744073709551616:1")).is_err());
    }

    #[test]
    fn test_eej_record_non_finite_count() {
        for positions in ["0:NaN", "0:inf", "1:-inf", "0:1,2:infinity"] {
            let line = format!("GENE1\tC1-A2\t1\t0\t{}", positions);
            let err = EejRecord::parse(&row(&line)).unwrap_err();
            assert!(err.contains("position count"), "{}", err);
        }
    }

    #[test]
    fn test_eej_record_mismatch() {
        let record = EejRecord::parse(&row("GENE1\tC1-A2\t6\t0\t0:2,10:3")).unwrap();
        assert!(record.anomaly().is_some());
    }

    #[test]
    fn test_eej_record_empty_positions() {
        let record = EejRecord::parse(&row("GENE1\tC1-A2\t0\t0\t")).unwrap();
        assert!(record.positions.is_empty());
        assert!(record.anomaly().is_none());
        assert!(EejRecord::parse(&row("GENE1\tC1-A2\t1\t0\t3-1")).is_err());
    }

    #[test]
    fn test_expr_record_ignores_crpkm() {
        let record = ExprRecord::parse(&row("GENE1\tNA\t100")).unwrap();
        assert_eq!(record.raw, Tally::Count(100.0));
        let record = ExprRecord::parse(&row("GENE1\t1.5\tne")).unwrap();
        assert_eq!(record.raw, Tally::NE);
    }

    fn multi_line(junctions: [&str; 3]) -> String {
        let mut cells = (0..12).map(|i| format!("m{}", i)).collect::<Vec<_>>();
        cells[3] = "HsaEX0050".to_string();
        cells.push("NA".to_string());
        cells.extend(["1", "2", "3", "6"].map(String::from));
        cells.extend(["mid0", "mid1"].map(String::from));
        cells.extend(junctions.map(String::from));
        cells.push("S".to_string());
        cells.extend(["p0", "p1", "p2", "p3"].map(String::from));
        cells.join("\t")
    }

    #[test]
    fn test_multi_record_render() {
        let record = MultiRecord::parse(&row(&multi_line(["10=9=2", "10=9=2", "5=5=0"])))
            .unwrap();
        assert_eq!(record.counts.junctions[2], Triple::parse_lenient("5=5=0"));

        let (key, meta, counts) = record.into_parts();
        assert_eq!(key, "HsaEX0050");
        let rendered = MultiRecord::render(&key, &meta, &counts, &RenderContext::default());
        assert_eq!(rendered.len(), 27);
        assert_eq!(rendered[12], "66.67");
        assert_eq!(rendered[19], "10=9=2");
        // from elsewhere: (25 - 4) / 25 > 1/2
        assert_eq!(rendered[22], ComplexityTier::C3.to_string());
        assert_eq!(rendered[26], "p3");
    }
}
