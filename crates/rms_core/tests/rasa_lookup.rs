use rms_core::{Gender, Rasa};

#[test]
fn every_rasa_name_parses_in_any_case() {
    for (rasa, name) in Rasa::ALL.iter().zip(Rasa::NAMES) {
        assert_eq!(Rasa::parse(name).unwrap(), *rasa);
        assert_eq!(Rasa::parse(&name.to_lowercase()).unwrap(), *rasa);

        let mixed: String = name
            .chars()
            .enumerate()
            .map(|(index, ch)| {
                if index % 2 == 0 {
                    ch.to_ascii_lowercase()
                } else {
                    ch
                }
            })
            .collect();
        assert_eq!(Rasa::parse(&mixed).unwrap(), *rasa);
    }
}

#[test]
fn unknown_names_fail_and_list_exactly_the_nine_rasas() {
    for input in [
        "",
        "JOY",
        "shringara!",
        "SHRINGARA HASYA",
        "raudr",
        "navarasa",
        " hasya ",
        "HASYA\n",
        "\tveera",
    ] {
        let err = Rasa::parse(input).unwrap_err();
        assert_eq!(err.kind, "rasa");
        assert_eq!(err.value, input);
        assert_eq!(
            err.valid_values,
            [
                "SHRINGARA",
                "HASYA",
                "KARUNA",
                "VEERA",
                "BHAYANAKA",
                "ADBHUTA",
                "SHANTA",
                "BIBHATSA",
                "RAUDRA"
            ]
        );
    }
}

#[test]
fn rasa_serializes_as_canonical_uppercase_name() {
    let json = serde_json::to_value(Rasa::Bhayanaka).unwrap();
    assert_eq!(json, "BHAYANAKA");
    assert_eq!(Rasa::default(), Rasa::Shringara);
}

#[test]
fn gender_lookup_is_closed_and_case_insensitive() {
    assert_eq!(Gender::parse("female").unwrap(), Gender::Female);
    assert_eq!(Gender::parse("Other").unwrap(), Gender::Other);
    assert!(Gender::parse(" Other ").is_err());
    assert!(Gender::parse("female\n").is_err());

    let err = Gender::parse("unknown").unwrap_err();
    assert_eq!(err.valid_values, ["MALE", "FEMALE", "OTHER"]);
    assert_eq!(
        err.to_string(),
        "Invalid gender value. Must be one of: MALE, FEMALE, OTHER"
    );
}
