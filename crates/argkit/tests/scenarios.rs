use argkit::{ColorChoice, Error, ParseOutcome, Parser};
use std::cell::Cell;
use std::rc::Rc;

fn file_parser() -> Parser {
    let mut p = Parser::new("prog");
    p.color(ColorChoice::Never).on_help(|_| Ok(()));
    p.add_str("filename", "Input file", None).unwrap();
    p.add_int("number", "A number", None).unwrap();
    p.add_int(["-c", "--count"], "Number of items", Some(10)).unwrap();
    p
}

fn ids_parser() -> Parser {
    let mut p = Parser::new("prog");
    p.on_help(|_| Ok(()));
    p.add_ints(["--ids"], "Item ids", None)
        .unwrap()
        .in_range(1, 50);
    p
}

#[test]
fn positionals_and_option() {
    let mut p = file_parser();
    let outcome = p.parse(["prog", "input.txt", "42", "--count", "7"]).unwrap();
    assert_eq!(outcome, ParseOutcome::Parsed);
    assert_eq!(p.get_str("filename").unwrap(), "input.txt");
    assert_eq!(p.get_int("number").unwrap(), 42);
    assert_eq!(p.get_int("count").unwrap(), 7);
}

#[test]
fn default_applies_when_option_absent() {
    let mut p = file_parser();
    p.parse(["prog", "foo.txt", "1"]).unwrap();
    assert_eq!(p.get_str("filename").unwrap(), "foo.txt");
    assert_eq!(p.get_int("count").unwrap(), 10);
    assert!(!p.is_explicit("count"));
}

#[test]
fn single_positional_takes_count_default() {
    let mut p = Parser::new("prog");
    p.add_str("filename", "Input file", None).unwrap();
    p.add_int(["-c", "--count"], "Number of items", Some(10)).unwrap();
    assert_eq!(p.parse(["prog", "foo.txt"]), Ok(ParseOutcome::Parsed));
    assert_eq!(p.get_str("filename").unwrap(), "foo.txt");
    assert_eq!(p.get_int("count").unwrap(), 10);
}

#[test]
fn float_range_rejects_nan() {
    let mut p = Parser::new("prog");
    p.add_float(["--ratio"], "Ratio", Some(0.5))
        .unwrap()
        .in_range(0.0, 1.0);
    let err = p.parse(["prog", "--ratio", "NaN"]).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }), "{err:?}");
    assert!(!p.has("ratio"));
}

#[test]
fn failed_parse_leaves_no_values() {
    let mut p = file_parser();
    p.parse(["prog", "a.txt", "5"]).unwrap();
    assert!(p.parse(["prog", "b.txt", "6", "-c", "nope"]).is_err());
    assert!(!p.has("filename"));
    assert!(!p.has("number"));
    assert!(!p.has("count"));
}

#[test]
fn list_with_range_validator() {
    let mut p = ids_parser();
    p.parse(["prog", "--ids", "10", "20", "30"]).unwrap();
    assert_eq!(p.get_ints("ids").unwrap(), vec![10, 20, 30]);

    let err = p.parse(["prog", "--ids", "10", "60", "30"]).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }), "{err:?}");
}

#[test]
fn missing_positional() {
    let mut p = Parser::new("prog");
    p.add_str("filename", "Input file", None).unwrap();
    assert_eq!(
        p.parse(["prog"]),
        Err(Error::MissingArgument("<filename>".to_string()))
    );
}

#[test]
fn help_skips_required_checks() {
    let called = Rc::new(Cell::new(0));
    let counter = called.clone();
    let mut p = file_parser();
    p.on_help(move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    });
    assert_eq!(p.parse(["prog", "--help"]), Ok(ParseOutcome::Help));
    assert_eq!(called.get(), 1);

    // Anywhere before the separator counts, even after a bad token.
    assert_eq!(p.parse(["prog", "--bogus", "-h"]), Ok(ParseOutcome::Help));
    assert_eq!(called.get(), 2);

    // After `--` it is just a positional value.
    p.parse(["prog", "1", "--", "--help"]).unwrap_err();
    assert_eq!(called.get(), 2);
}

#[test]
fn defaults_round_trip() {
    let mut p = Parser::new("prog");
    p.add_int(["--int"], "", Some(-3)).unwrap();
    p.add_float(["--float"], "", Some(2.5)).unwrap();
    p.add_str(["--str"], "", Some("hello world")).unwrap();
    p.add_bool(["--bool"], "", Some(true)).unwrap();
    p.add_strs(["--strs"], "", Some(&["a", "b"])).unwrap();
    p.parse(["prog"]).unwrap();

    assert_eq!(p.get_int("int").unwrap(), -3);
    assert_eq!(p.get_float("float").unwrap(), 2.5);
    assert_eq!(p.get_str("str").unwrap(), "hello world");
    assert!(p.get_bool("bool"));
    assert_eq!(p.get_strs("strs").unwrap(), ["a", "b"]);
}

#[test]
fn list_preserves_count_and_order() {
    let mut p = Parser::new("prog");
    p.add_strs(["-n", "--names"], "", None).unwrap();
    p.add_floats(["--weights"], "", None).unwrap();
    p.add_bool(["-q"], "", None).unwrap();
    p.parse([
        "prog", "--names", "zeta", "alpha", "mid", "-q", "--weights", "0.5", "-1.5",
    ])
    .unwrap();
    assert_eq!(p.get_strs("names").unwrap(), ["zeta", "alpha", "mid"]);
    assert_eq!(p.get_floats("weights").unwrap(), vec![0.5, -1.5]);
    assert!(p.get_bool("q"));
}

#[test]
fn repeated_gets_are_identical() {
    let mut p = file_parser();
    p.parse(["prog", "a.txt", "5", "-c", "3"]).unwrap();
    let first = p.get_int("count").unwrap();
    for _ in 0..3 {
        assert_eq!(p.get_int("count").unwrap(), first);
        assert_eq!(p.get_str("filename").unwrap(), "a.txt");
    }
}

#[test]
fn aliases_read_the_same_value() {
    let mut p = file_parser();
    p.parse(["prog", "a.txt", "5", "--count", "12"]).unwrap();
    for name in ["c", "count", "-c", "--count"] {
        assert_eq!(p.get_int(name).unwrap(), 12, "{name}");
    }
}

#[test]
fn flags_and_undeclared_flags() {
    let mut p = Parser::new("prog");
    p.add_bool(["-v", "--verbose"], "", None).unwrap();
    p.parse(["prog", "--verbose"]).unwrap();
    assert!(p.get_bool("verbose"));
    assert_eq!(p.get::<bool>("--quiet"), Ok(false));
    assert!(!p.has("quiet"));
}

#[test]
fn negative_values_are_not_options() {
    let mut p = Parser::new("prog");
    p.add_int("offset", "", None).unwrap();
    p.add_float(["-s", "--scale"], "", Some(1.0)).unwrap();
    p.parse(["prog", "-5", "-s", "-0.25"]).unwrap();
    assert_eq!(p.get_int("offset").unwrap(), -5);
    assert_eq!(p.get_float("scale").unwrap(), -0.25);
}

#[test]
fn conversion_errors_name_the_argument() {
    let mut p = file_parser();
    let err = p.parse(["prog", "a.txt", "forty-two"]).unwrap_err();
    assert_eq!(
        err,
        Error::invalid_value("number", "'forty-two' is not an integer")
    );
    assert_eq!(err.exit_code(), 2);

    let err = p.parse(["prog", "a.txt", "99999999999999999999"]).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
}

#[test]
fn registration_errors() {
    let mut p = Parser::new("prog");
    p.add_int(["-c", "--count"], "", Some(1)).unwrap();

    let err = p.add_str(["--help"], "", None).map(|_| ()).unwrap_err();
    assert!(matches!(err, Error::ReservedName(_)));
    assert!(err.is_registration());

    let err = p.add_str(["--count"], "", None).map(|_| ()).unwrap_err();
    assert_eq!(err, Error::DuplicateName("count".to_string()));

    let err = p.add_str("file", "", Some("x")).map(|_| ()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn custom_validator_on_string() {
    let mut p = Parser::new("prog");
    p.add_str(["-m", "--mode"], "Mode", Some("normal"))
        .unwrap()
        .one_of(["normal", "fast", "safe"]);
    p.add_str(["--email"], "Contact", Some("a@example.com"))
        .unwrap()
        .email();

    p.parse(["prog", "--mode", "fast"]).unwrap();
    assert_eq!(p.get_str("mode").unwrap(), "fast");

    assert!(matches!(
        p.parse(["prog", "--mode", "slow"]),
        Err(Error::InvalidValue { .. })
    ));
    assert!(matches!(
        p.parse(["prog", "--email", "nope"]),
        Err(Error::InvalidValue { .. })
    ));
}
