use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use slate_core::{ErrorKind, Source};

use super::ElementRepr;
use crate::element::ConfigElement;

fn parse(text: &str) -> ConfigElement {
    ConfigElement::from_str(text).unwrap()
}

fn read<T: ElementRepr + Default>(elem: &ConfigElement) -> T {
    let mut value = T::default();
    value.from_element(elem, None).unwrap();
    value
}

fn read_err<T: ElementRepr + Default>(elem: &ConfigElement) -> String {
    let mut value = T::default();
    let err = value.from_element(elem, None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidRepr);
    err.message
}

#[test]
fn primitives() {
    let root = parse(r#"int = -12, float = 1.5, flag = true, ch = x, s = "hello world""#);

    assert_eq!(read::<i32>(root.get("int").unwrap()), -12);
    assert_eq!(read::<f64>(root.get("float").unwrap()), 1.5);
    assert!(read::<bool>(root.get("flag").unwrap()));
    assert_eq!(read::<char>(root.get("ch").unwrap()), 'x');
    assert_eq!(read::<String>(root.get("s").unwrap()), "hello world");
}

#[test]
fn primitive_errors() {
    let root = parse("int = abc, t {}");

    insta::assert_snapshot!(read_err::<i32>(root.get("int").unwrap()), @"Cannot parse 'abc' as i32");
    insta::assert_snapshot!(read_err::<u8>(root.get("t").unwrap()), @"Cannot parse a table as u8");
    insta::assert_snapshot!(read_err::<char>(root.get("int").unwrap()), @"Cannot parse 'abc' as char");
}

#[test]
fn errors_are_located_with_a_source() {
    let source = Source::new("test.cfg", "a = 1\nint = abc\n");
    let root = ConfigElement::from_source(&source).unwrap();

    let mut int = 0i32;
    let err = int
        .from_element(root.get("int").unwrap(), Some(&source))
        .unwrap_err();

    insta::assert_snapshot!(err.text, @"test.cfg:2:7: error: Cannot parse 'abc' as i32");
    assert!(err.is_recoverable());
}

#[test]
fn option() {
    let root = parse(r#"none = "", some = 5"#);

    assert_eq!(read::<Option<u32>>(root.get("none").unwrap()), None);
    assert_eq!(read::<Option<u32>>(root.get("some").unwrap()), Some(5));

    let mut value = Some(3u32);
    value.from_element(root.get("none").unwrap(), None).unwrap();
    assert_eq!(value, None);

    assert_eq!(None::<u32>.to_element(), ConfigElement::new_value(""));
}

#[test]
fn vec() {
    let root = parse("xs = [1, 2, 3], nested = [[1, 2], [3]], v = x");

    assert_eq!(read::<Vec<u32>>(root.get("xs").unwrap()), [1, 2, 3]);
    assert_eq!(
        read::<Vec<Vec<u8>>>(root.get("nested").unwrap()),
        [vec![1, 2], vec![3]]
    );
    insta::assert_snapshot!(read_err::<Vec<u32>>(root.get("v").unwrap()), @"Cannot parse a value as a Vec");
}

#[test]
fn vec_is_replaced_not_extended() {
    let root = parse("xs = [1, 2]");
    let mut xs = vec![7u32, 8, 9];
    xs.from_element(root.get("xs").unwrap(), None).unwrap();

    assert_eq!(xs, [1, 2]);
}

#[test]
fn maps() {
    let root = parse("m { b = 2, a = 1 }, ids { 1 = one, 2 = two }");

    let btree = read::<BTreeMap<String, u32>>(root.get("m").unwrap());
    assert_eq!(btree.into_iter().collect::<Vec<_>>(), [("a".to_string(), 1), ("b".to_string(), 2)]);

    let index = read::<IndexMap<String, u32>>(root.get("m").unwrap());
    assert_eq!(index.keys().collect::<Vec<_>>(), ["b", "a"]);

    let hash = read::<HashMap<u32, String>>(root.get("ids").unwrap());
    assert_eq!(hash[&1], "one");
    assert_eq!(hash[&2], "two");
}

#[test]
fn map_errors() {
    let root = parse("m { x = 1 }, arr = []");

    insta::assert_snapshot!(
        read_err::<HashMap<u32, u32>>(root.get("m").unwrap()),
        @"Cannot parse key 'x': invalid digit found in string"
    );
    insta::assert_snapshot!(
        read_err::<BTreeMap<String, u32>>(root.get("arr").unwrap()),
        @"Cannot parse an array as a BTreeMap"
    );
}

#[test]
fn tuples() {
    let root = parse("t = [1, two, 3.5], short = [1], long = [1, 2, 3], v = x");

    assert_eq!(
        read::<(u8, String, f64)>(root.get("t").unwrap()),
        (1, "two".to_string(), 3.5)
    );
    insta::assert_snapshot!(read_err::<(u8, u8)>(root.get("short").unwrap()), @"Insufficient elements for a tuple");
    insta::assert_snapshot!(read_err::<(u8, u8)>(root.get("long").unwrap()), @"Too many elements for a tuple");
    insta::assert_snapshot!(read_err::<(u8,)>(root.get("v").unwrap()), @"Cannot parse a value as a tuple");
}

#[test]
fn to_element_prints_back() {
    let mut servers = IndexMap::new();
    servers.insert("main".to_string(), (String::from("localhost"), 80u16));
    servers.insert("backup".to_string(), (String::from("10.0.0.2"), 8080u16));

    let mut root = ConfigElement::new_table();
    root.insert("servers", servers.to_element());
    root.insert("retries", Some(3u8).to_element());
    root.insert("tags", vec!["a b".to_string(), String::new()].to_element());

    insta::assert_snapshot!(
        root.printer().compact(true).dump(),
        @r#"servers { main = [localhost, 80], backup = [10.0.0.2, 8080] }, retries = 3, tags = [a b, ""]"#
    );
}

#[test]
fn config_element_is_its_own_repr() {
    let root = parse("t { a = 1 }");
    let mut elem = ConfigElement::new_value("old");
    elem.from_element(root.get("t").unwrap(), None).unwrap();

    assert_eq!(&elem, root.get("t").unwrap());
    assert_eq!(elem.to_element(), elem);
}
