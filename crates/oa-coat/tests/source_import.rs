use chrono::NaiveDate;
use oa_coat::classification::{Amount, EvidenceWarning, LicenceNormalizer};
use oa_coat::sources::{parse_doaj_rows, parse_openapc_rows, select_openapc_record, CrossrefWork};

const DOAJ_CSV: &str = include_str!("fixtures/doaj_journals.csv");
const OPENAPC_CSV: &str = include_str!("fixtures/openapc.csv");

#[test]
fn doaj_csv_rows_become_journal_evidence() {
    let rows = parse_doaj_rows(DOAJ_CSV.as_bytes()).expect("doaj csv parses");
    assert_eq!(rows.len(), 4);

    let (free, warnings) = rows[0].to_evidence("EUR");
    assert_eq!(rows[0].issns(), vec!["1111-2222".to_string()]);
    assert_eq!(free.licence.as_deref(), Some("CC BY"));
    assert_eq!(free.apc, Some(Amount::free("EUR")));
    assert_eq!(free.oa_start, Some(2010));
    assert!(warnings.is_empty());

    let (costly, _) = rows[1].to_evidence("EUR");
    assert_eq!(rows[1].issns(), vec!["3333-4444".to_string()]);
    assert_eq!(costly.apc, Some(Amount::new(200_000, "EUR")));

    let (mystery, _) = rows[2].to_evidence("EUR");
    assert_eq!(rows[2].issns().len(), 2);
    assert!(mystery.apc.expect("apc").is_fee_unknown());
    assert_eq!(mystery.oa_start, None);
}

#[test]
fn doaj_unparseable_prices_are_reported_and_skipped() {
    let rows = parse_doaj_rows(DOAJ_CSV.as_bytes()).expect("doaj csv parses");
    let (broken, warnings) = rows[3].to_evidence("EUR");

    // No euro price survives, so the first parseable price is kept.
    assert_eq!(broken.apc, Some(Amount::new(90_000, "USD")));
    assert!(matches!(
        warnings.as_slice(),
        [EvidenceWarning::UnparseableAmount { .. }]
    ));
}

#[test]
fn openapc_csv_rows_become_cost_records() {
    let rows = parse_openapc_rows(OPENAPC_CSV.as_bytes()).expect("openapc csv parses");
    assert_eq!(rows.len(), 4);

    let (individual, _) = rows[0].to_evidence();
    assert_eq!(individual.amount, Some(185_050));
    assert!(!individual.hybrid);
    assert!(!individual.transformative_agreement);

    let (agreement, warnings) = rows[1].to_evidence();
    assert_eq!(agreement.amount, None);
    assert!(agreement.hybrid);
    assert!(agreement.transformative_agreement);
    assert!(agreement.apc().expect("agreement charges a fee").is_fee_unknown());
    assert!(warnings.is_empty());

    let (_, warnings) = rows[3].to_evidence();
    assert_eq!(warnings.len(), 1);
}

#[test]
fn duplicate_openapc_records_prefer_individual_payments() {
    let rows = parse_openapc_rows(OPENAPC_CSV.as_bytes()).expect("openapc csv parses");
    let records: Vec<_> = rows[1..3].iter().map(|row| row.to_evidence().0).collect();

    let chosen = select_openapc_record(&records).expect("one record");
    assert!(!chosen.transformative_agreement);
    assert_eq!(chosen.apc(), Some(Amount::new(250_000, "EUR")));
}

#[test]
fn crossref_print_only_date_falls_back_to_start_of_year() {
    let json = r#"{
        "DOI": "10.1000/print",
        "license": [{"URL": "https://www.elsevier.com/tdm/userlicense/1.0/"}],
        "published-print": {"date-parts": [[2018]]}
    }"#;
    let work: CrossrefWork = serde_json::from_str(json).expect("crossref work");
    let evidence = work.into_evidence();

    assert_eq!(evidence.year(), Some(2018));
    assert_eq!(evidence.published_on, NaiveDate::from_ymd_opt(2018, 1, 1));
    assert!(evidence.issns.is_empty());
    assert_eq!(
        evidence.best_licence(&LicenceNormalizer::default()),
        Some("https://www.elsevier.com/tdm/userlicense/1.0/")
    );
}
