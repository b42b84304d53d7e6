//! Recursive-descent parser for the pattern language.
//!
//! Precedence, low to high: `| ^ -` (union/xor/diff, left-assoc), `&`
//! (intersection), `~` (complement, prefix), concatenation, postfix
//! quantifiers (`* + ? {m,n}`), then atoms and groups. This mirrors the
//! source grammar's precedence declarations (`OR`/`CARET`/`MINUS` below
//! `AND` below `NOT`), with concatenation and postfix quantifiers binding
//! tighter still, as is structural in a hand-rolled descent rather than
//! spelled out in a precedence table.

use crate::ast::Node;
use crate::error::Error;

pub struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    pattern: &'a str,
    next_group: u32,
}

type PResult<T> = Result<T, Error>;

impl<'a> Parser<'a> {
    pub fn new(pattern: &'a str) -> Parser<'a> {
        Parser { bytes: pattern.as_bytes(), pos: 0, pattern, next_group: 1 }
    }

    pub fn group_count(&self) -> u32 {
        self.next_group - 1
    }

    pub fn parse(&mut self) -> PResult<Node> {
        let node = self.parse_or()?;
        self.skip_ws();
        if self.pos != self.bytes.len() {
            return Err(self.err(format!("unexpected `{}`", self.peek_char())));
        }
        Ok(node)
    }

    fn err(&self, reason: String) -> Error {
        log::warn!("invalid pattern `{}` at byte {}: {}", self.pattern, self.pos, reason);
        Error::InvalidPattern { pattern: self.pattern.to_string(), offset: self.pos, reason }
    }

    /// Bare spaces and tabs are insignificant everywhere outside an escape,
    /// mirroring the source lexer's `t_ignore`/`t_class_ignore`/`t_repeat_ignore`.
    fn skip_ws(&mut self) {
        while matches!(self.bytes.get(self.pos), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.bytes.get(self.pos).copied()
    }

    fn peek_char(&self) -> String {
        self.peek().map(|b| (b as char).to_string()).unwrap_or_else(|| "<eof>".to_string())
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> PResult<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.err(format!("expected `{}`", byte as char)))
        }
    }

    // expr := and (('|' | '^' | '-') and)*
    fn parse_or(&mut self) -> PResult<Node> {
        let mut left = self.parse_and()?;
        loop {
            match self.peek() {
                Some(b'|') => {
                    self.bump();
                    let right = self.parse_and()?;
                    left = Node::Or(Box::new(left), Box::new(right));
                }
                Some(b'^') => {
                    self.bump();
                    let right = self.parse_and()?;
                    left = Node::Xor(Box::new(left), Box::new(right));
                }
                Some(b'-') => {
                    self.bump();
                    let right = self.parse_and()?;
                    left = Node::Diff(Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // and := not ('&' not)*
    fn parse_and(&mut self) -> PResult<Node> {
        let mut left = self.parse_not()?;
        while self.eat(b'&') {
            let right = self.parse_not()?;
            left = Node::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // not := '~' not | concat
    fn parse_not(&mut self) -> PResult<Node> {
        if self.eat(b'~') {
            let inner = self.parse_not()?;
            return Ok(Node::Not(Box::new(inner)));
        }
        self.parse_concat()
    }

    fn starts_atom(b: u8) -> bool {
        !matches!(b, b'|' | b'^' | b'-' | b'&' | b')')
    }

    // concat := postfix*
    fn parse_concat(&mut self) -> PResult<Node> {
        let mut items = Vec::new();
        while let Some(b) = self.peek() {
            if !Self::starts_atom(b) {
                break;
            }
            items.push(self.parse_postfix()?);
        }
        let mut iter = items.into_iter();
        let first = iter.next().unwrap_or(Node::Epsilon);
        Ok(iter.fold(first, |acc, n| Node::Concat(Box::new(acc), Box::new(n))))
    }

    // postfix := atom ('*' | '+' | '?' | '{' rspec '}')*
    fn parse_postfix(&mut self) -> PResult<Node> {
        let mut node = self.parse_atom()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.bump();
                    node = Node::Star(Box::new(node));
                }
                Some(b'+') => {
                    self.bump();
                    node = Node::Plus(Box::new(node));
                }
                Some(b'?') => {
                    self.bump();
                    node = Node::Opt(Box::new(node));
                }
                Some(b'{') => {
                    let save = self.pos;
                    self.bump();
                    match self.parse_rspec() {
                        Ok((min, max)) => node = Node::Repeat(Box::new(node), min, max),
                        Err(_) => {
                            // Not a well-formed {m,n}: treat '{' as a literal, like the source lexer's repeat state fallback.
                            self.pos = save;
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn parse_digits(&mut self) -> Option<usize> {
        self.skip_ws();
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos]).ok()?.parse().ok()
    }

    // rspec := digits | digits ',' | digits ',' digits | ',' digits
    fn parse_rspec(&mut self) -> PResult<(usize, Option<usize>)> {
        let spec = if self.eat(b',') {
            let max = self.parse_digits().ok_or_else(|| self.err("expected a number after `,`".to_string()))?;
            (0, Some(max))
        } else {
            let min = self.parse_digits().ok_or_else(|| self.err("expected a repeat count".to_string()))?;
            if self.eat(b',') {
                let max = self.parse_digits();
                (min, max)
            } else {
                (min, Some(min))
            }
        };
        self.expect(b'}')?;
        Ok(spec)
    }

    fn parse_atom(&mut self) -> PResult<Node> {
        match self.peek() {
            Some(b'(') => {
                self.bump();
                let gid = self.next_group;
                self.next_group += 1;
                let inner = self.parse_or()?;
                self.expect(b')')?;
                Ok(Node::Group(Box::new(inner), gid))
            }
            Some(b'.') => {
                self.bump();
                Ok(Node::Dot)
            }
            Some(b'[') => {
                self.bump();
                self.parse_class()
            }
            Some(b'\\') => {
                self.bump();
                self.parse_escape()
            }
            // `ε` (U+03B5, UTF-8 `0xCE 0xB5`): the empty-string literal.
            Some(0xCE) if self.bytes.get(self.pos + 1) == Some(&0xB5) => {
                self.pos += 2;
                Ok(Node::Epsilon)
            }
            Some(b) => {
                self.bump();
                Ok(Node::Literal(b))
            }
            None => Err(self.err("unexpected end of pattern".to_string())),
        }
    }

    fn parse_escape(&mut self) -> PResult<Node> {
        let b = self.bump().ok_or_else(|| self.err("dangling `\\`".to_string()))?;
        let node = match b {
            b'd' => Node::Class { ranges: vec![(b'0', b'9')], negated: false },
            b'D' => Node::Class { ranges: vec![(b'0', b'9')], negated: true },
            b'a' => Node::Literal(0x07),
            b'b' => Node::Literal(0x08),
            b't' => Node::Literal(b'\t'),
            b'n' => Node::Literal(b'\n'),
            b'v' => Node::Literal(0x0b),
            b'f' => Node::Literal(0x0c),
            b'r' => Node::Literal(b'\r'),
            b'0' => Node::Literal(0),
            other => Node::Literal(other),
        };
        Ok(node)
    }

    // class := '^'? classitem+
    fn parse_class(&mut self) -> PResult<Node> {
        let negated = self.eat(b'^');
        let mut ranges = Vec::new();
        // A `]` right after `[` (or `[^`) is a literal, matching common regex convention.
        if self.peek() == Some(b']') {
            self.bump();
            ranges.push((b']', b']'));
        }
        loop {
            match self.peek() {
                None => return Err(self.err("unterminated character class".to_string())),
                Some(b']') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let lo = self.parse_class_char()?;
                    if self.peek() == Some(b'-') && self.bytes.get(self.pos + 1) != Some(&b']') {
                        self.bump();
                        let hi = self.parse_class_char()?;
                        if hi < lo {
                            return Err(self.err(format!("inverted class range {}-{}", lo as char, hi as char)));
                        }
                        ranges.push((lo, hi));
                    } else {
                        ranges.push((lo, lo));
                    }
                }
            }
        }
        if ranges.is_empty() {
            return Err(self.err("empty character class".to_string()));
        }
        Ok(Node::Class { ranges, negated })
    }

    fn parse_class_char(&mut self) -> PResult<u8> {
        let b = self.bump().ok_or_else(|| self.err("unterminated character class".to_string()))?;
        if b == b'\\' {
            let escaped = self.bump().ok_or_else(|| self.err("dangling `\\` in character class".to_string()))?;
            Ok(match escaped {
                b'n' => b'\n',
                b't' => b'\t',
                b'r' => b'\r',
                other => other,
            })
        } else {
            Ok(b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pattern: &str) -> Node {
        let mut p = Parser::new(pattern);
        p.parse().unwrap_or_else(|e| panic!("failed to parse `{pattern}`: {e}"))
    }

    #[test]
    fn literal_concat() {
        match parse("ab") {
            Node::Concat(l, r) => {
                assert!(matches!(*l, Node::Literal(b'a')));
                assert!(matches!(*r, Node::Literal(b'b')));
            }
            other => panic!("expected Concat, got {other:?}"),
        }
    }

    #[test]
    fn precedence_or_below_and_below_not() {
        // a&b|~c  ==  (a&b) | (~c)
        match parse("a&b|~c") {
            Node::Or(l, r) => {
                assert!(matches!(*l, Node::And(..)));
                assert!(matches!(*r, Node::Not(..)));
            }
            other => panic!("expected Or at top, got {other:?}"),
        }
    }

    #[test]
    fn group_numbering_is_source_order() {
        let mut p = Parser::new("(a)(b(c))");
        let node = p.parse().unwrap();
        assert_eq!(p.group_count(), 3);
        match node {
            Node::Concat(l, r) => {
                assert!(matches!(*l, Node::Group(_, 1)));
                match *r {
                    Node::Group(inner, 2) => assert!(matches!(*inner, Node::Concat(..))),
                    other => panic!("expected Group 2, got {other:?}"),
                }
            }
            other => panic!("expected Concat, got {other:?}"),
        }
    }

    #[test]
    fn counted_repeat_parses_bounds() {
        match parse("a{2,4}") {
            Node::Repeat(_, 2, Some(4)) => {}
            other => panic!("expected Repeat(_, 2, Some(4)), got {other:?}"),
        }
    }

    #[test]
    fn leading_bracket_in_class_is_literal() {
        match parse("[]a]") {
            Node::Class { ranges, negated: false } => {
                assert!(ranges.contains(&(b']', b']')));
                assert!(ranges.contains(&(b'a', b'a')));
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }

    #[test]
    fn empty_group_is_epsilon() {
        match parse("()") {
            Node::Group(inner, 1) => assert!(matches!(*inner, Node::Epsilon)),
            other => panic!("expected Group(Epsilon, 1), got {other:?}"),
        }
    }

    #[test]
    fn control_character_escapes() {
        assert!(matches!(parse(r"\a"), Node::Literal(0x07)));
        assert!(matches!(parse(r"\b"), Node::Literal(0x08)));
        assert!(matches!(parse(r"\v"), Node::Literal(0x0b)));
        assert!(matches!(parse(r"\f"), Node::Literal(0x0c)));
    }

    #[test]
    fn epsilon_token_parses_to_epsilon_node() {
        assert!(matches!(parse("\u{03B5}"), Node::Epsilon));
    }
}
