use oa_coat::classification::{
    classify_licence, normalize_licence, select_best_licence, LicenceFamily, LicenceNormalizer,
    LicenceType, NormalizedLicence,
};

#[test]
fn normalizes_reference_statements() {
    assert_eq!(normalize_licence("cc-by-sa").name(), "CC BY-SA");
    assert_eq!(normalize_licence("").name(), "none");
    assert_eq!(
        normalize_licence("https://doi.org/10.1128/ASMCopyrightv2").name(),
        "other"
    );
    assert_eq!(normalize_licence("CC0").name(), "CC0");

    let licence = normalize_licence("http://creativecommons.org/licenses/by-nc-nd/2.0/de/deed.de");
    assert_eq!(licence.name(), "CC BY-NC-ND");
    assert_eq!(licence.version, "2.0");

    let licence = normalize_licence("https://creativecommons.org/licenses/by/4.0");
    assert_eq!(licence, NormalizedLicence::new(LicenceFamily::CcBy, "4.0"));
}

#[test]
fn ranks_follow_openness() {
    assert_eq!(classify_licence("CC BY"), LicenceType::Open);
    assert_eq!(classify_licence("cc-by-sa"), LicenceType::Open);
    assert_eq!(classify_licence("public domain"), LicenceType::Open);
    assert_eq!(classify_licence("CC BY-ND"), LicenceType::Free);
    assert_eq!(classify_licence("cc-by-nc-sa"), LicenceType::Free);
    assert_eq!(
        classify_licence("https://www.elsevier.com/tdm/userlicense/1.0/"),
        LicenceType::Proprietary
    );
    assert_eq!(classify_licence(""), LicenceType::Unknown);
}

#[test]
fn normalization_is_total_for_garbage_input() {
    for raw in ["\u{0}", "cc-", "creativecommons.org/licenses/", "#", "авторское право", "cc-by-4.x"] {
        assert_eq!(normalize_licence(raw).family, LicenceFamily::Other, "input {raw:?}");
    }
}

#[test]
fn best_licence_among_candidates() {
    let normalizer = LicenceNormalizer::default();

    let single = ["https://publisher.example/terms"];
    assert_eq!(
        select_best_licence(&normalizer, &single).copied(),
        Some("https://publisher.example/terms")
    );

    let several = [
        "https://publisher.example/terms",
        "CC BY-NC",
        "https://creativecommons.org/licenses/by/4.0/",
        "CC0",
    ];
    assert_eq!(
        select_best_licence(&normalizer, &several).copied(),
        Some("https://creativecommons.org/licenses/by/4.0/")
    );

    let empty: [&str; 0] = [];
    assert_eq!(select_best_licence(&normalizer, &empty), None);
}
