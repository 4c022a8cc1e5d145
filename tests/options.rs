//! Tests for record options and their JSON form.

use ironfile::*;

#[test]
fn defaults() {
    let opts = RecordOptions::default();
    assert_eq!(opts.layout_kind, LayoutKind::Delimited);
    assert_eq!(opts.ignore_first, 0);
    assert_eq!(opts.ignore_last, 0);
    assert!(!opts.ignore_empty_lines);
    assert!(!opts.ignore_empty_spaces);
    assert_eq!(opts.comment_marker, None);
    assert!(opts.comment_any_place);
    assert_eq!(opts.condition, ConditionSpec::None);
}

#[test]
fn empty_document_gives_defaults() -> anyhow::Result<()> {
    assert_eq!(RecordOptions::from_json("{}")?, RecordOptions::default());
    Ok(())
}

#[test]
fn loads_every_setting() -> anyhow::Result<()> {
    let opts = RecordOptions::from_json(
        r#"{
            "layout_kind": "Fixed",
            "ignore_first": 2,
            "ignore_last": 1,
            "ignore_empty_lines": true,
            "ignore_empty_spaces": true,
            "comment_marker": "--",
            "comment_any_place": false,
            "condition": { "kind": "IncludeIfMatchRegex", "selector": "[0-9]+" }
        }"#,
    )?;
    assert_eq!(
        opts,
        RecordOptions {
            layout_kind: LayoutKind::Fixed,
            ignore_first: 2,
            ignore_last: 1,
            ignore_empty_lines: true,
            ignore_empty_spaces: true,
            comment_marker: Some("--".into()),
            comment_any_place: false,
            condition: ConditionSpec::IncludeIfMatchRegex("[0-9]+".into()),
        }
    );
    Ok(())
}

#[test]
fn condition_round_trips_through_json() -> anyhow::Result<()> {
    let spec = ConditionSpec::ExcludeIfEnclosed("**".into());
    let json = serde_json::to_string(&spec)?;
    assert_eq!(json, r#"{"kind":"ExcludeIfEnclosed","selector":"**"}"#);
    assert_eq!(serde_json::from_str::<ConditionSpec>(&json)?, spec);

    let none: ConditionSpec = serde_json::from_str(r#"{"kind":"None"}"#)?;
    assert_eq!(none, ConditionSpec::None);
    assert_eq!(none.operand(), None);
    assert_eq!(spec.operand(), Some("**"));
    assert_eq!(spec.name(), "ExcludeIfEnclosed");
    Ok(())
}

#[test]
fn malformed_documents_are_schema_errors() {
    for json in [
        "not json",
        r#"{"layout_kind": "Columns"}"#,
        r#"{"ignore_first": -1}"#,
        r#"{"condition": {"kind": "SkipIfOdd", "selector": "x"}}"#,
    ] {
        let err = RecordOptions::from_json(json).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidOptions(_)), "{json}");
    }
}

#[test]
fn layout_from_loaded_options() -> anyhow::Result<()> {
    #[derive(Debug, Default)]
    struct Code {
        code: String,
    }

    let opts = RecordOptions::from_json(
        r##"{
            "layout_kind": "Fixed",
            "ignore_empty_lines": true,
            "comment_marker": "#",
            "condition": { "kind": "ExcludeIfBegins", "selector": "ZZ" }
        }"##,
    )?;
    let mapper = RecordLayout::from_options(opts)
        .field(FieldSpec::new("code", |c: &mut Code, v| c.code = v).fixed(4))
        .default_constructor()
        .build()?;

    assert_eq!(mapper.options().layout_kind, LayoutKind::Fixed);
    let codes: Vec<_> = mapper
        .records(["", "  # note", "ZZ99", "AB12"])
        .map(|r| r.map(|c| c.code))
        .collect::<Result<_, _>>()?;
    assert_eq!(codes, ["AB12"]);
    Ok(())
}

#[test]
fn invalid_condition_in_options_fails_build() {
    #[derive(Default)]
    struct Code {
        code: String,
    }

    let opts = RecordOptions {
        condition: ConditionSpec::ExcludeIfMatchRegex("[".into()),
        ..RecordOptions::default()
    };
    let err = RecordLayout::from_options(opts)
        .field(FieldSpec::new("code", |c: &mut Code, v| c.code = v).delimited(","))
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidPattern { .. }));
}
