//! Shared oracle helpers for the plain-regex subset: any pattern built only
//! from literals, `.`, classes, and `* + ? {m,n}` should agree with the
//! `regex` crate. Boolean operators (`& | ^ -`) have no `regex` counterpart
//! and are checked against intended semantics directly in their own tests.

use bzregex::{compile, fullmatch, search};

pub fn assert_fullmatch_same_as_re(pattern: &str, text: &str) {
    let ours = compile(pattern).unwrap_or_else(|e| panic!("failed to compile `{pattern}`: {e}"));
    let want = regex::Regex::new(&format!("^(?:{pattern})$")).unwrap();
    let got = fullmatch(&ours, text).is_some();
    let expected = want.is_match(text);
    assert_eq!(got, expected, "fullmatch(`{pattern}`, {text:?}) mismatch with regex crate");
}

pub fn assert_search_same_as_re(pattern: &str, text: &str) {
    let ours = compile(pattern).unwrap_or_else(|e| panic!("failed to compile `{pattern}`: {e}"));
    let want = regex::Regex::new(pattern).unwrap();
    let got = search(&ours, text, true, false);
    let expected = want.find(text);
    match (got.first(), expected) {
        (Some(m), Some(e)) => assert_eq!((m.start, m.end), (e.start(), e.end())),
        (None, None) => {}
        (got, expected) => panic!("search(`{pattern}`, {text:?}) mismatch: ours={got:?} regex={expected:?}"),
    }
}
