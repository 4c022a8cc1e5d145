//! Tests for field plan construction.

use ironfile::*;

#[derive(Debug, Default)]
struct Row {
    a: String,
    b: String,
    c: String,
    d: Option<String>,
    e: Option<String>,
}

fn text(name: &'static str) -> FieldSpec<Row> {
    FieldSpec::new(name, move |r: &mut Row, v: String| match name {
        "a" => r.a = v,
        "b" => r.b = v,
        _ => r.c = v,
    })
}

fn optional_text() -> FieldSpec<Row> {
    FieldSpec::new("d", |r: &mut Row, v| r.d = v).optional()
}

#[test]
fn single_field_is_both_first_and_last() -> anyhow::Result<()> {
    let mapper = RecordLayout::fixed()
        .field(text("a").fixed(4))
        .default_constructor()
        .build()?;

    let fields = mapper.plan().fields();
    assert_eq!(fields.len(), 1);
    assert!(fields[0].is_first());
    assert!(fields[0].is_last());
    assert!(!fields[0].next_is_optional());
    Ok(())
}

#[test]
fn exactly_one_first_and_one_last() -> anyhow::Result<()> {
    let mapper = RecordLayout::delimited()
        .field(text("a").delimited(","))
        .field(text("b").delimited(","))
        .field(text("c").delimited(","))
        .field(optional_text().delimited(","))
        .default_constructor()
        .build()?;

    let fields = mapper.plan().fields();
    assert_eq!(fields.iter().filter(|f| f.is_first()).count(), 1);
    assert_eq!(fields.iter().filter(|f| f.is_last()).count(), 1);
    assert!(fields[0].is_first());
    assert!(fields[3].is_last());
    Ok(())
}

#[test]
fn next_is_optional_mirrors_following_field() -> anyhow::Result<()> {
    let mapper = RecordLayout::delimited()
        .field(text("a").delimited(","))
        .field(FieldSpec::new("e", |r: &mut Row, v| r.e = v).delimited(",").optional())
        .field(text("c").delimited(","))
        .field(optional_text().delimited(","))
        .default_constructor()
        .build()?;

    let fields = mapper.plan().fields();
    for pair in fields.windows(2) {
        assert_eq!(
            pair[0].next_is_optional(),
            pair[1].is_optional(),
            "field {} disagrees with {}",
            pair[0].name(),
            pair[1].name()
        );
    }
    assert!(!fields[3].next_is_optional());
    Ok(())
}

#[test]
fn fixed_size_hint_sums_widths() -> anyhow::Result<()> {
    let mapper = RecordLayout::fixed()
        .field(text("a").fixed(5))
        .field(text("b").fixed(3))
        .field(text("c").fixed(10))
        .default_constructor()
        .build()?;

    assert_eq!(mapper.plan().size_hint(), 18);
    assert_eq!(mapper.plan().kind(), LayoutKind::Fixed);
    Ok(())
}

#[test]
fn delimited_size_hint_defaults() -> anyhow::Result<()> {
    let mapper = RecordLayout::delimited()
        .field(text("a").delimited("|"))
        .default_constructor()
        .build()?;

    assert_eq!(mapper.size_hint(), plan::DEFAULT_SIZE_HINT);
    assert_eq!(mapper.size_hint(), 32);
    Ok(())
}

#[test]
fn unmapped_fields_are_skipped() -> anyhow::Result<()> {
    let mapper = RecordLayout::fixed()
        .field(text("a").fixed(2))
        .field(text("b"))
        .field(text("c").fixed(2))
        .default_constructor()
        .build()?;

    let names: Vec<_> = mapper.plan().fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["a", "c"]);
    assert_eq!(mapper.plan().fields()[1].index(), 1);

    let row = mapper.map_line("xxyy", 1)?.into_record().unwrap();
    assert_eq!(row.a, "xx");
    assert_eq!(row.b, "");
    assert_eq!(row.c, "yy");
    Ok(())
}

#[test]
fn no_mapped_fields_is_a_schema_error() {
    let err = RecordLayout::<Row>::fixed()
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::NoMappedFields { .. }));

    let err = RecordLayout::<Row>::delimited()
        .ignore_first(3)
        .comment("--", false)
        .condition(ConditionSpec::IncludeIfContains("x".into()))
        .field(text("a"))
        .field(text("b"))
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::NoMappedFields { .. }));
    assert!(err.to_string().contains("no mapped fields"));
}

#[test]
fn layout_kind_must_match_record() {
    let err = RecordLayout::fixed()
        .field(text("a").fixed(2))
        .field(text("b").delimited(","))
        .default_constructor()
        .build()
        .unwrap_err();

    match err {
        SchemaError::LayoutMismatch {
            field,
            expected,
            found,
        } => {
            assert_eq!(field, "b");
            assert_eq!(expected, LayoutKind::Fixed);
            assert_eq!(found, LayoutKind::Delimited);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn degenerate_layouts_are_rejected() {
    let err = RecordLayout::fixed()
        .field(text("a").fixed(0))
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::ZeroWidth { ref field } if field == "a"));

    let err = RecordLayout::delimited()
        .field(text("a").delimited(""))
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::EmptyDelimiter { ref field } if field == "a"));
}

#[test]
fn optional_field_needs_option_setter() {
    let err = RecordLayout::delimited()
        .field(text("a").delimited(","))
        .field(text("b").delimited(",").optional())
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::OptionalNotNullable { ref field } if field == "b"));

    #[derive(Default)]
    struct Qty {
        n: Option<u32>,
        m: u32,
    }
    let err = RecordLayout::fixed()
        .field(FieldSpec::new("n", |q: &mut Qty, v| q.n = v).fixed(2).optional())
        .field(FieldSpec::new("m", |q: &mut Qty, v| q.m = v).fixed(2).optional())
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::OptionalNotNullable { ref field } if field == "m"));
}

#[test]
fn duplicate_mapped_field_is_rejected() {
    let err = RecordLayout::fixed()
        .field(text("a").fixed(1))
        .field(text("a").fixed(1))
        .default_constructor()
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { ref field } if field == "a"));
}

#[test]
fn declared_types_come_from_setters() -> anyhow::Result<()> {
    #[derive(Default)]
    struct Typed {
        n: i32,
        f: f64,
        ok: bool,
        c: char,
        u: Option<u16>,
    }

    let mapper = RecordLayout::fixed()
        .field(FieldSpec::new("n", |r: &mut Typed, v| r.n = v).fixed(1))
        .field(FieldSpec::new("f", |r: &mut Typed, v| r.f = v).fixed(1))
        .field(FieldSpec::new("ok", |r: &mut Typed, v| r.ok = v).fixed(1))
        .field(FieldSpec::new("c", |r: &mut Typed, v| r.c = v).fixed(1))
        .field(FieldSpec::new("u", |r: &mut Typed, v| r.u = v).fixed(1))
        .default_constructor()
        .build()?;

    let types: Vec<_> = mapper.plan().fields().iter().map(|f| f.field_type()).collect();
    assert_eq!(
        types,
        [
            FieldType::Int,
            FieldType::Float,
            FieldType::Bool,
            FieldType::Char,
            FieldType::UInt
        ]
    );

    let t = mapper.map_line("72tx9", 1)?.into_record().unwrap();
    assert_eq!((t.n, t.f, t.ok, t.c, t.u), (7, 2.0, true, 'x', Some(9)));
    Ok(())
}
