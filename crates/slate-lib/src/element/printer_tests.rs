use indoc::indoc;

use super::{ConfigElement, Printer, QuoteStyle, quote_style};

fn pretty(input: &str) -> String {
    ConfigElement::from_str(input).unwrap().to_string()
}

fn compact(input: &str) -> String {
    ConfigElement::from_str(input).unwrap().printer().compact(true).dump()
}

const DOCUMENT: &str = indoc! {"
    name = demo
    empty {}
    server
    {
    	host = localhost
    	ports = [80, 443]
    }
    list =
    [
    	{
    		a = 1
    	},
    	{}
    ]
"};

#[test]
fn pretty_form_is_stable() {
    assert_eq!(pretty(DOCUMENT), DOCUMENT);
}

#[test]
fn pretty_from_messy_input() {
    let input = "server{host=localhost ,ports=[80,443,]}nested{a{b{c=d}}}";

    insta::assert_snapshot!(pretty(input), @r"
    server
    {
    	host = localhost
    	ports = [80, 443]
    }
    nested
    {
    	a
    	{
    		b
    		{
    			c = d
    		}
    	}
    }
    ");
}

#[test]
fn compact_form() {
    insta::assert_snapshot!(compact(DOCUMENT), @"name = demo, empty {}, server { host = localhost, ports = [80, 443] }, list = [{ a = 1 }, {}]");
}

#[test]
fn compact_form_parses_back() {
    let original = ConfigElement::from_str(DOCUMENT).unwrap();
    let reparsed = ConfigElement::from_str(&compact(DOCUMENT)).unwrap();

    assert_eq!(original, reparsed);
}

#[test]
fn compact_form_survives_raw_quoted_keys() {
    let mut inner = ConfigElement::new_table();
    inner.insert(r#"a"b"#, ConfigElement::new_value("x"));
    inner.insert(r#"c"}}d"#, ConfigElement::new_value(r#"e"}f"#));
    let mut list = ConfigElement::new_array();
    list.insert("", inner.clone());
    let mut root = ConfigElement::new_table();
    root.insert("t", inner);
    root.insert("list", list);

    let printed = root.printer().compact(true).dump();
    insta::assert_snapshot!(printed, @r#"t { {{"a"b"}} = x, {{{"c"}}d"}}} = {{"e"}f"}} }, list = [{ {{"a"b"}} = x, {{{"c"}}d"}}} = {{"e"}f"}} }]"#);
    assert_eq!(ConfigElement::from_str(&printed).unwrap(), root);
}

#[test]
fn arrays_of_scalars_and_empty_tables_stay_on_one_line() {
    insta::assert_snapshot!(pretty("a = [[], {}, [x, [y]]]"), @"a = [[], {}, [x, [y]]]");
}

#[test]
fn empty_root_prints_nothing() {
    assert_eq!(pretty(""), "");
    assert_eq!(compact(""), "");
}

#[test]
fn quoting() {
    let mut root = ConfigElement::new_table();
    for (key, val) in [
        ("plain", "a b"),
        ("empty", ""),
        ("quote", r#"say "hi""#),
        ("slash", r"C:\dir"),
        ("brace", r#"x"}}y"#),
        ("lead", " pad"),
        ("hash", "#tag"),
        ("key with = sign", "v"),
    ] {
        root.insert(key, ConfigElement::new_value(val));
    }

    insta::assert_snapshot!(root.to_string(), @r##"
    plain = a b
    empty = ""
    quote = {{"say "hi""}}
    slash = {{"C:\dir"}}
    brace = {{{"x"}}y"}}}
    lead = " pad"
    hash = "#tag"
    "key with = sign" = v
    "##);

    assert_eq!(ConfigElement::from_str(&root.to_string()).unwrap(), root);
}

#[test]
fn quote_styles() {
    assert_eq!(quote_style("abc"), QuoteStyle::Naked);
    assert_eq!(quote_style("a b"), QuoteStyle::Naked);
    assert_eq!(quote_style(""), QuoteStyle::Quoted(0));
    assert_eq!(quote_style("a "), QuoteStyle::Quoted(0));
    assert_eq!(quote_style("a\tb"), QuoteStyle::Quoted(0));
    assert_eq!(quote_style("x,y"), QuoteStyle::Quoted(0));
    assert_eq!(quote_style(r"a\b"), QuoteStyle::Quoted(2));
    assert_eq!(quote_style(r#"""#), QuoteStyle::Quoted(2));
    assert_eq!(quote_style(r#""}"#), QuoteStyle::Quoted(2));
    assert_eq!(quote_style(r#""}}"#), QuoteStyle::Quoted(3));
    assert_eq!(quote_style(r#"a"}}}b"}"#), QuoteStyle::Quoted(4));
}

#[test]
fn printer_streams_events() {
    let mut out = String::new();
    let mut printer = Printer::new(&mut out);
    printer.value(Some("k"), "v").unwrap();
    printer.start_array(Some("arr"), true).unwrap();
    printer.value(None, "1").unwrap();
    printer.value(None, "2").unwrap();
    printer.end_array().unwrap();
    printer.start_table(Some("t"), false, false).unwrap();
    printer.value(Some("x"), "y").unwrap();
    printer.end_table(false).unwrap();

    insta::assert_snapshot!(out, @r"
    k = v
    arr = [1, 2]
    t
    {
    	x = y
    }
    ");
}

#[test]
fn roundtrip_is_stable() {
    let input = r#"
# Comment
val1 = {{{" "}}a"}}}
val2 = b ~ c d
r0 = ""
r2 = ""
r2 = {{""}}
r3 = {{"a"}}
r4 = {{"aa"}}
r5 = {{"""}}
r6 = {{""}"}}
r7 = {{{""}}"}}}

arr1 = []
arr3 = [a]
arr2 = [[], {}]

foo2 = [a]

foo2 = test

bar
{
	bar_foo = test ~ baz
	bar_bar
	{
		foo
		{
			"bar	bar1" = ["\ttest"]
			bar bar2 = [test,]
			bar bar3 = [test,test]
			bar bar4 = []
		}
	}
}

baz
{
	bar_bar
	{
		foo = ""
		bar = "\u0021d"
	}
}
"#;
    let original = ConfigElement::from_str(input).unwrap();
    assert_eq!(original.get("foo2").and_then(|e| e.as_value()), Some("test"));

    let printed = original.to_string();
    let reparsed = ConfigElement::from_str(&printed).unwrap();
    assert_eq!(reparsed, original);
    assert_eq!(reparsed.to_string(), printed);
}

#[test]
fn every_char_survives_a_roundtrip() {
    for c in (0..1000u32).filter_map(char::from_u32) {
        let s = c.to_string();
        let mut root = ConfigElement::new_table();
        root.insert("test", ConfigElement::new_value(s.as_str()));

        let printed = root.to_string();
        let decoded = ConfigElement::from_str(&printed)
            .unwrap_or_else(|err| panic!("U+{:04X} printed as {printed:?}: {err}", c as u32));
        assert_eq!(
            decoded.get("test").and_then(|e| e.as_value()),
            Some(s.as_str()),
            "U+{:04X}",
            c as u32
        );
    }
}
