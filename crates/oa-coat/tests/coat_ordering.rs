use oa_coat::classification::{color_for, Coat, CoatError, OaColor};

fn gold() -> Coat {
    Coat::new("gold", 1, 4, 1, 1, 3).expect("valid gold coat")
}

fn green() -> Coat {
    Coat::new("green", 2, 4, 4, 4, 1).expect("valid green coat")
}

fn closed() -> Coat {
    Coat::new("closed", 4, 4, 4, 4, 4).expect("valid closed coat")
}

#[test]
fn dominance_matches_reference_examples() {
    assert!(gold().is_lower(&gold()));
    assert!(!green().is_lower(&gold()));
    assert!(!closed().is_lower(&gold()));

    assert!(gold().is_lower(&closed()));
    assert!(green().is_lower(&closed()));
    assert!(closed().is_lower(&closed()));

    assert_eq!(gold().to_canonical_string(), "1,4,1,1,3");
}

#[test]
fn dominance_is_antisymmetric() {
    let pairs = [(gold(), closed()), (green(), closed())];
    for (better, worse) in pairs {
        assert!(better.is_lower(&worse));
        assert!(better.strictly_dominates(&worse));
        assert!(!worse.is_lower(&better));
    }
    assert!(!gold().strictly_dominates(&gold()));
}

#[test]
fn canonical_string_round_trips_every_tuple() {
    for place in 1..=4u8 {
        for licence in 1..=4u8 {
            for conditions in 1..=4u8 {
                let coat = Coat::new("", place, licence, 2, 3, conditions).expect("in range");
                let parsed: Coat = coat.to_canonical_string().parse().expect("round trip");
                assert_eq!(parsed.levels(), coat.levels());
                assert!(parsed.is_lower(&coat) && coat.is_lower(&parsed));
            }
        }
    }
}

#[test]
fn malformed_canonical_strings_fail_loudly() {
    assert!(matches!(
        "1,4,1,1,3,2".parse::<Coat>(),
        Err(CoatError::WrongArity { found: 6 })
    ));
    assert!(matches!(
        "1,4,one,1,3".parse::<Coat>(),
        Err(CoatError::InvalidToken { position: 2, .. })
    ));
    assert!(matches!(
        "1,4,1,1,0".parse::<Coat>(),
        Err(CoatError::LevelOutOfRange { value: 0, .. })
    ));
}

#[test]
fn reference_tuples_get_expected_colours() {
    assert_eq!(color_for(Some(&gold())), OaColor::Bronze);
    assert_eq!(color_for(Some(&green())), OaColor::GreenPre);
    assert_eq!(color_for(Some(&closed())), OaColor::Closed);
}
