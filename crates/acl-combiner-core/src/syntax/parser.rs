//! Recursive descent parser from tokens to the document model
//!
//! Comments are attached while parsing:
//!
//! - comments on the lines before an item become its leading comments
//! - comments on the same line after an item, before or after its comma,
//!   become its line comments
//! - comments after the last item become the container's end comments
//! - block comments between a key and its value stay with the key, line
//!   comments there move to the member's leading comments

use super::lexer::{Span, Token, lex_with_trivia};
use super::SyntaxKind;
use crate::document::{
    Array, Comments, Element, Key, Layout, Member, Object, Scalar, ScalarKind, Value,
    is_line_comment,
};

/// Parsed source: the root value and the comments around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub before: Vec<String>,
    pub value: Value,
    pub after: Vec<String>,
}

/// First problem found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Parse HuJSON source into a syntax tree
///
/// # Example
///
/// ```rust
/// use acl_combiner_core::syntax::parse;
///
/// let tree = parse("// policy\n{\"acls\": []}").unwrap();
/// assert_eq!(tree.before, vec!["// policy".to_string()]);
/// assert!(tree.value.as_object().is_some());
/// ```
pub fn parse(source: &str) -> Result<SyntaxTree, SyntaxError> {
    let (tokens, errors) = lex_with_trivia(source);
    if let Some(error) = errors.into_iter().next() {
        return Err(SyntaxError::new(error.message, error.span));
    }

    let mut parser = Parser::new(&tokens);
    parser.parse_document()
}

/// Containers may nest this deep, counting the root
const MAX_DEPTH: usize = 128;

/// Comments and spacing collected before an item
struct Leading {
    comments: Vec<String>,
    blank_line: bool,
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> Result<SyntaxTree, SyntaxError> {
        let before = self.collect_leading().comments;
        let value = self.parse_value()?;
        let after = self.collect_leading().comments;

        if !self.at(SyntaxKind::Eof) {
            return Err(self.error(format!(
                "unexpected {} after document root",
                self.current_kind().describe()
            )));
        }

        Ok(SyntaxTree {
            before,
            value,
            after,
        })
    }

    fn parse_value(&mut self) -> Result<Value, SyntaxError> {
        let Some(token) = self.current() else {
            return Err(self.error("unexpected end of input, expected value"));
        };

        let scalar_kind = match token.kind {
            SyntaxKind::LBrace => return self.parse_object().map(Value::Object),
            SyntaxKind::LBracket => return self.parse_array().map(Value::Array),
            SyntaxKind::String => {
                self.decode_string(token)?;
                ScalarKind::String
            }
            SyntaxKind::Number => ScalarKind::Number,
            SyntaxKind::True | SyntaxKind::False => ScalarKind::Bool,
            SyntaxKind::Null => ScalarKind::Null,
            SyntaxKind::Eof => {
                return Err(self.error("unexpected end of input, expected value"));
            }
            other => {
                return Err(self.error(format!("expected value, found {}", other.describe())));
            }
        };

        let scalar = Scalar::from_raw(scalar_kind, token.text.as_str());
        self.advance();
        Ok(Value::Scalar(scalar))
    }

    fn parse_object(&mut self) -> Result<Object, SyntaxError> {
        self.enter()?;
        let open = self.pos;
        self.advance();

        let mut object = Object::new();
        let mut expect_item = true;
        let mut carried = Vec::new();

        loop {
            let mut leading = self.collect_leading();
            if !carried.is_empty() {
                carried.append(&mut leading.comments);
                leading.comments = std::mem::take(&mut carried);
            }

            if self.at(SyntaxKind::RBrace) {
                object.end = leading.comments;
                break;
            }
            if !expect_item {
                return Err(self.unexpected("',' or '}'"));
            }

            let mut member = self.parse_member()?;
            let mut comments = Comments {
                before: leading.comments,
                line: Vec::new(),
                blank_line: leading.blank_line && !object.is_empty(),
            };
            // Line comments found between key and value follow the leading ones
            comments.before.append(&mut member.comments.before);

            expect_item = self.finish_item(&mut comments.line, &mut carried);
            member.comments = comments;
            object.push(member);
        }

        self.advance();
        object.layout = self.layout_since(open);
        self.depth -= 1;
        Ok(object)
    }

    fn parse_member(&mut self) -> Result<Member, SyntaxError> {
        let Some(token) = self.current().filter(|t| t.kind == SyntaxKind::String) else {
            return Err(self.unexpected("string key"));
        };
        let text = self.decode_string(token)?;
        let mut key = Key::from_raw(token.text.as_str(), text);
        self.advance();

        let mut moved = Vec::new();
        self.collect_key_comments(&mut key.comments, &mut moved);
        if !self.at(SyntaxKind::Colon) {
            return Err(self.unexpected("':' after object key"));
        }
        self.advance();
        self.collect_key_comments(&mut key.comments, &mut moved);

        let value = self.parse_value()?;
        Ok(Member::new(key, value).with_comments(Comments::before(moved)))
    }

    fn parse_array(&mut self) -> Result<Array, SyntaxError> {
        self.enter()?;
        let open = self.pos;
        self.advance();

        let mut array = Array::new();
        let mut expect_item = true;
        let mut carried = Vec::new();

        loop {
            let mut leading = self.collect_leading();
            if !carried.is_empty() {
                carried.append(&mut leading.comments);
                leading.comments = std::mem::take(&mut carried);
            }

            if self.at(SyntaxKind::RBracket) {
                array.end = leading.comments;
                break;
            }
            if !expect_item {
                return Err(self.unexpected("',' or ']'"));
            }

            let value = self.parse_value()?;
            let mut comments = Comments {
                before: leading.comments,
                line: Vec::new(),
                blank_line: leading.blank_line && !array.is_empty(),
            };
            expect_item = self.finish_item(&mut comments.line, &mut carried);
            array.push_element(Element { comments, value });
        }

        self.advance();
        array.layout = self.layout_since(open);
        self.depth -= 1;
        Ok(array)
    }

    /// Consume the same-line comments and the comma after an item
    ///
    /// Comments that come after a line comment cannot share its line; they
    /// go to `carried` and lead the next item (or close the container).
    /// Returns whether a comma was found, i.e. whether another item may follow.
    fn finish_item(&mut self, line: &mut Vec<String>, carried: &mut Vec<String>) -> bool {
        self.collect_same_line(line);

        if !self.comma_ahead() {
            return false;
        }
        while !self.at(SyntaxKind::Comma) {
            if let Some(token) = self.current().filter(|t| t.kind.is_comment()) {
                push_trailing(line, carried, &token.text);
            }
            self.advance();
        }
        self.advance();

        if line.iter().any(|c| is_line_comment(c)) {
            return true;
        }
        self.collect_same_line(line);
        true
    }

    /// Collect comments up to the end of the current line
    fn collect_same_line(&mut self, line: &mut Vec<String>) {
        while let Some(token) = self.current() {
            match token.kind {
                SyntaxKind::Whitespace => {}
                SyntaxKind::CommentLine | SyntaxKind::CommentBlock => {
                    line.push(token.text.clone())
                }
                _ => break,
            }
            self.advance();
        }
    }

    /// Collect trivia before the next significant token
    fn collect_leading(&mut self) -> Leading {
        let mut leading = Leading {
            comments: Vec::new(),
            blank_line: false,
        };
        let mut newlines = 0;

        while let Some(token) = self.current() {
            match token.kind {
                SyntaxKind::Whitespace => {}
                SyntaxKind::Newline => newlines += 1,
                SyntaxKind::CommentLine | SyntaxKind::CommentBlock => {
                    leading.blank_line |= newlines >= 2;
                    newlines = 0;
                    leading.comments.push(token.text.clone());
                }
                _ => break,
            }
            self.advance();
        }

        leading.blank_line |= newlines >= 2;
        leading
    }

    /// Collect trivia between a key and its value
    fn collect_key_comments(&mut self, key: &mut Vec<String>, moved: &mut Vec<String>) {
        while let Some(token) = self.current().filter(|t| t.kind.is_trivia()) {
            if token.kind.is_comment() {
                if is_line_comment(&token.text) {
                    moved.push(token.text.clone());
                } else {
                    key.push(token.text.clone());
                }
            }
            self.advance();
        }
    }

    /// Enter a container, failing past [`MAX_DEPTH`]
    fn enter(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn comma_ahead(&self) -> bool {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .is_some_and(|t| t.kind == SyntaxKind::Comma)
    }

    /// Inline when no newline appears between the brackets
    fn layout_since(&self, open: usize) -> Layout {
        let end = self.pos.min(self.tokens.len());
        if self.tokens[open..end]
            .iter()
            .any(|t| t.kind == SyntaxKind::Newline)
        {
            Layout::Block
        } else {
            Layout::Inline
        }
    }

    fn decode_string(&self, token: &Token) -> Result<String, SyntaxError> {
        serde_json::from_str::<String>(&token.text).map_err(|e| {
            SyntaxError::new(format!("invalid string literal: {e}"), token.span.clone())
        })
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::Eof)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        self.error(format!(
            "expected {expected}, found {}",
            self.current_kind().describe()
        ))
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let span = self
            .current()
            .or_else(|| self.tokens.last())
            .map(|t| t.span.clone())
            .unwrap_or(0..0);
        SyntaxError::new(message, span)
    }
}

/// Keep a comment on the item's line unless a line comment already ends it
fn push_trailing(line: &mut Vec<String>, carried: &mut Vec<String>, comment: &str) {
    if carried.is_empty() && !line.iter().any(|c| is_line_comment(c)) {
        line.push(comment.to_string());
    } else {
        carried.push(comment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(source: &str) -> Object {
        match parse(source) {
            Ok(SyntaxTree {
                value: Value::Object(object),
                ..
            }) => object,
            other => panic!("expected object root, got {other:?}"),
        }
    }

    fn error(source: &str) -> SyntaxError {
        match parse(source) {
            Err(error) => error,
            Ok(tree) => panic!("expected error, got {tree:?}"),
        }
    }

    #[test]
    fn test_parse_plain_json() {
        let obj = root(r#"{"acls": [{"action": "accept"}], "groups": {}}"#);
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["acls", "groups"]);
        assert_eq!(obj.layout, Layout::Inline);

        let acls = obj.find("acls").and_then(|m| m.value.as_array());
        assert_eq!(acls.map(Array::len), Some(1));
    }

    #[test]
    fn test_leading_line_and_end_comments() {
        let source = r#"{
	// leading
	"acls": [
		"a", // same line
		"b" /* before comma */,
		// closing
	],
}"#;
        let obj = root(source);
        let member = &obj.members[0];
        assert_eq!(member.comments.before, vec!["// leading"]);
        assert_eq!(member.value.kind().to_string(), "array");

        let Some(acls) = member.value.as_array() else {
            panic!("acls should be an array");
        };
        assert_eq!(acls.elements[0].comments.line, vec!["// same line"]);
        assert_eq!(acls.elements[1].comments.line, vec!["/* before comma */"]);
        assert_eq!(acls.end, vec!["// closing"]);
        assert_eq!(obj.layout, Layout::Block);
    }

    #[test]
    fn test_comments_between_key_and_value() {
        let source = "{\n\"a\" /* key */ : // moved\n 1\n}";
        let obj = root(source);
        let member = &obj.members[0];
        assert_eq!(member.key.comments, vec!["/* key */"]);
        assert_eq!(member.comments.before, vec!["// moved"]);
    }

    #[test]
    fn test_blank_line_recorded() {
        let obj = root("{\n\n\"a\": 1,\n\n// b\n\"b\": 2,\n\"c\": 3\n}");
        let blanks: Vec<_> = obj.iter().map(|m| m.comments.blank_line).collect();
        assert_eq!(blanks, vec![false, true, false]);
    }

    #[test]
    fn test_document_comments() {
        let tree = parse("// top\n/* more */\n{}\n// bottom\n").unwrap();
        assert_eq!(tree.before, vec!["// top", "/* more */"]);
        assert_eq!(tree.after, vec!["// bottom"]);
    }

    #[test]
    fn test_escaped_keys_decode() {
        let obj = root(r#"{"tag\u003aprod": true}"#);
        assert_eq!(obj.members[0].key.text(), "tag:prod");
        assert_eq!(obj.members[0].key.raw(), r#""tag\u003aprod""#);
        assert_eq!(obj.index_of("tag:prod"), Some(0));
    }

    #[test]
    fn test_scalars_keep_raw_text() {
        let obj = root(r#"{"n": 1.50, "e": 1E+2, "s": "\/"}"#);
        let raws: Vec<_> = obj
            .iter()
            .filter_map(|m| m.value.as_scalar().map(|s| s.raw().to_string()))
            .collect();
        assert_eq!(raws, vec!["1.50", "1E+2", r#""\/""#]);
    }

    #[test]
    fn test_trailing_commas_accepted() {
        let obj = root("{\"a\": [1, 2,], \"b\": {\"c\": null,},}");
        assert_eq!(obj.len(), 2);
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(error("").message, "unexpected end of input, expected value");
        assert_eq!(error("{").message, "expected string key, found end of input");
        assert_eq!(error("{\"a\" 1}").message, "expected ':' after object key, found number");
        assert_eq!(error("{\"a\": 1 \"b\": 2}").message, "expected ',' or '}', found string");
        assert_eq!(error("[1,,2]").message, "expected value, found ','");
        assert_eq!(error("{,}").message, "expected string key, found ','");
        assert_eq!(error("{} {}").message, "unexpected '{' after document root");
        assert_eq!(error("[1 2]").message, "expected ',' or ']', found number");
    }

    #[test]
    fn test_comment_after_line_comment_leads_next_item() {
        let tree = parse("[1 // a\n, /* b */ 2]").unwrap();
        let Some(array) = tree.value.as_array() else {
            panic!("expected array root");
        };
        assert_eq!(array.elements[0].comments.line, vec!["// a"]);
        assert_eq!(array.elements[1].comments.before, vec!["/* b */"]);

        let tree = parse("{\"a\": 1 // a\n/* c */, // d\n}").unwrap();
        let Some(object) = tree.value.as_object() else {
            panic!("expected object root");
        };
        assert_eq!(object.members[0].comments.line, vec!["// a"]);
        assert_eq!(object.end, vec!["/* c */", "// d"]);
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));

        assert!(parse(&nested(MAX_DEPTH)).is_ok());

        let err = error(&nested(MAX_DEPTH + 1));
        assert_eq!(err.message, "nesting too deep");
        assert_eq!(err.span, MAX_DEPTH..MAX_DEPTH + 1);

        let err = error(&format!("{{\"tests\": {}}}", nested(5000)));
        assert_eq!(err.message, "nesting too deep");
    }

    #[test]
    fn test_lexer_error_reported_with_span() {
        let err = error("{\"a\": 'x'}");
        assert_eq!(err.span.start, 6);
    }

    #[test]
    fn test_raw_control_character_in_string_rejected() {
        let err = error("{\"a\": \"tab\there\"}");
        assert!(err.message.starts_with("invalid string literal"));
    }
}
