mod common;

use common::{assert_fullmatch_same_as_re, assert_search_same_as_re};

#[test]
fn exact_repeat_literal() {
    for s in ["", "a", "aa", "aaa", "aaaa"] {
        assert_fullmatch_same_as_re("a{3}", s);
    }
}

#[test]
fn exact_repeat_group() {
    for s in ["", "ab", "abab", "ababab"] {
        assert_fullmatch_same_as_re("(ab){2}", s);
    }
}

#[test]
fn bounded_repeat_literal() {
    for s in ["", "a", "aa", "aaa", "aaaa", "aaaaa"] {
        assert_fullmatch_same_as_re("a{2,4}", s);
    }
}

#[test]
fn bounded_repeat_group() {
    for s in ["", "ab", "abab", "ababab", "abababab"] {
        assert_fullmatch_same_as_re("(ab){1,3}", s);
    }
}

#[test]
fn lower_bound_only_literal() {
    for s in ["", "a", "aa", "aaa", "aaaaaa"] {
        assert_fullmatch_same_as_re("a{2,}", s);
    }
}

#[test]
fn lower_bound_only_group() {
    for s in ["", "ab", "abab", "ababab", "abababab"] {
        assert_fullmatch_same_as_re("(ab){2,}", s);
    }
}

#[test]
fn star_equivalent_to_zero_or_more() {
    for s in ["", "a", "aa", "aaa", "b", "baaa", "aaab"] {
        assert_fullmatch_same_as_re("a*", s);
        assert_fullmatch_same_as_re("a{0,}", s);
    }
}

#[test]
fn plus_equivalent_to_one_or_more() {
    for s in ["", "a", "aa", "aaa", "b", "baaa", "aaab"] {
        assert_fullmatch_same_as_re("a+", s);
        assert_fullmatch_same_as_re("a{1,}", s);
    }
}

#[test]
fn opt_equivalent_to_zero_or_one() {
    for s in ["", "a", "aa", "b", "ab", "ba"] {
        assert_fullmatch_same_as_re("a?", s);
        assert_fullmatch_same_as_re("a{0,1}", s);
    }
}

#[test]
fn repeat_over_alternation() {
    for s in ["", "a", "b", "ab", "aba", "abba", "aaaa"] {
        assert_fullmatch_same_as_re("(a|b){2,3}", s);
    }
}

#[test]
fn search_with_bounded_repeat() {
    assert_search_same_as_re("a{2,3}", "xxaaaxy");
}

#[test]
fn search_with_group_repeat() {
    assert_search_same_as_re("(ab){2}", "zzababzzab");
}
