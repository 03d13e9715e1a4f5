//! Minimal lossless lexer for the head of a PHP source file.
//!
//! Produces just enough structure for the header check: the start-of-file
//! marker, whitespace and comments, the first DocBlock broken into
//! tag/string/star tokens, and the first meaningful token after it. Everything
//! past that point becomes one [`TokenKind::Rest`] token.

use crate::domain::token::{DeclarationKeyword, DocBlockSpan, Token, TokenKind, TokenStream};

const OPEN_TAG: &str = "<?php";

/// Tokenize `source`. Concatenating the token texts yields `source` again.
pub fn lex(source: &str) -> TokenStream {
    let mut lexer = Lexer {
        src: source,
        pos: 0,
        line: 1,
        tokens: Vec::new(),
        blocks: Vec::new(),
    };
    lexer.run();
    TokenStream::new(lexer.tokens, lexer.blocks)
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    tokens: Vec<Token>,
    blocks: Vec<DocBlockSpan>,
}

impl<'a> Lexer<'a> {
    fn run(&mut self) {
        let open = match self.src.to_ascii_lowercase().find(OPEN_TAG) {
            Some(idx) => idx,
            None => {
                if !self.src.is_empty() {
                    self.push(TokenKind::InlineHtml, self.src.len());
                }
                return;
            }
        };
        if open > 0 {
            self.push(TokenKind::InlineHtml, open);
        }
        self.push(TokenKind::OpenTag, open + OPEN_TAG.len());

        let mut structured_seen = false;
        while !self.at_end() {
            let rest = self.rest();
            if rest.starts_with(char::is_whitespace) {
                let end = self.pos + whitespace_len(rest);
                self.push(TokenKind::Whitespace, end);
            } else if is_doc_open(rest) {
                if structured_seen {
                    self.lex_block_comment();
                } else {
                    structured_seen = true;
                    self.lex_doc_block();
                }
            } else if rest.starts_with("/*") {
                self.lex_block_comment();
            } else if rest.starts_with("//") || (rest.starts_with('#') && !rest.starts_with("#[")) {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.push(TokenKind::Comment, self.pos + len);
            } else {
                self.lex_meaningful();
                if !self.at_end() {
                    self.push(TokenKind::Rest, self.src.len());
                }
                return;
            }
        }
    }

    fn lex_block_comment(&mut self) {
        let rest = self.rest();
        let end = match rest[2..].find("*/") {
            Some(idx) => self.pos + 2 + idx + 2,
            None => self.src.len(),
        };
        self.push(TokenKind::Comment, end);
    }

    fn lex_doc_block(&mut self) {
        let open = self.push(TokenKind::DocOpen, self.pos + 3);
        let mut tags = Vec::new();
        // true at the start of a line's content, before any string
        let mut content_start = true;

        while !self.at_end() {
            let rest = self.rest();
            if rest.starts_with("*/") {
                let close = self.push(TokenKind::DocClose, self.pos + 2);
                self.blocks.push(DocBlockSpan { open, close, tags });
                return;
            }
            if rest.starts_with(char::is_whitespace) {
                let len = whitespace_len(rest);
                if rest[..len].contains('\n') {
                    content_start = true;
                }
                self.push(TokenKind::DocWhitespace, self.pos + len);
            } else if content_start && rest.starts_with('*') {
                self.push(TokenKind::DocStar, self.pos + 1);
            } else if content_start && is_tag_start(rest) {
                let len = 1 + rest[1..]
                    .find(|c: char| !is_tag_char(c))
                    .unwrap_or(rest.len() - 1);
                tags.push(self.push(TokenKind::DocTag, self.pos + len));
                content_start = false;
            } else {
                let line_len = rest.find('\n').unwrap_or(rest.len());
                let line_len = rest[..line_len].find("*/").unwrap_or(line_len);
                let text_len = rest[..line_len].trim_end().len();
                self.push(TokenKind::DocString, self.pos + text_len);
                content_start = false;
            }
        }
        // unterminated: no block span is recorded
    }

    fn lex_meaningful(&mut self) {
        let rest = self.rest();
        let word_len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
        if word_len == 0 {
            let len = rest.chars().next().map(char::len_utf8).unwrap_or(0);
            self.push(TokenKind::Other, self.pos + len);
            return;
        }

        let word = &rest[..word_len];
        let kind = match DeclarationKeyword::from_word(word) {
            Some(DeclarationKeyword::Function) if rest[word_len..].trim_start().starts_with('(') => {
                TokenKind::Keyword(DeclarationKeyword::Closure)
            }
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Other,
        };
        self.push(kind, self.pos + word_len);
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Emit `src[pos..end]` as one token and return its index.
    fn push(&mut self, kind: TokenKind, end: usize) -> usize {
        let text = &self.src[self.pos..end];
        self.tokens.push(Token::new(kind, self.line, text));
        self.line += text.matches('\n').count() as u32;
        self.pos = end;
        self.tokens.len() - 1
    }
}

/// `/**` counts as a DocBlock opener only when whitespace follows it.
fn is_doc_open(s: &str) -> bool {
    s.strip_prefix("/**")
        .is_some_and(|after| after.starts_with(char::is_whitespace))
}

fn whitespace_len(s: &str) -> usize {
    s.find(|c: char| !c.is_whitespace()).unwrap_or(s.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\\'
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '\\' | ':')
}

fn is_tag_start(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('@') && chars.next().is_some_and(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream.tokens().iter().map(|t| t.kind).collect()
    }

    const HEADER: &str = "<?php\n/**\n * @see https://github.com/foo/bar for the canonical source repository\n * @copyright https://github.com/foo/bar/blob/master/COPYRIGHT.md Copyright\n */\n\nnamespace Foo;\n";

    #[test]
    fn test_lex_is_lossless() {
        for src in [
            HEADER,
            "",
            "plain text",
            "<html><?php echo 1;",
            "<?php\n// hi\n# there\n/* block */\n/**/ /** second */ class X {}",
            "<?php /** @see x */",
            "<?php\r\n/**\r\n * @license  foo  \r\n */\r\n",
            "<?php\n/** unterminated",
        ] {
            assert_eq!(lex(src).render(), src, "round trip failed for {src:?}");
        }
    }

    #[test]
    fn test_lex_header_structure() {
        let stream = lex(HEADER);
        let block = stream.block_at(2).expect("doc block at index 2");
        assert_eq!(stream.get(block.close).map(|t| t.kind), Some(TokenKind::DocClose));
        assert_eq!(block.tags.len(), 2);

        let see = stream.get(block.tags[0]).expect("see tag");
        assert_eq!(see.text, "@see");
        assert_eq!(see.line, 3);

        let string = stream
            .find_next(block.tags[0], |t| t.kind == TokenKind::DocString)
            .and_then(|i| stream.get(i))
            .expect("see content");
        assert_eq!(
            string.text,
            "https://github.com/foo/bar for the canonical source repository"
        );
        assert_eq!(string.line, 3);

        let close = stream.get(block.close).expect("close");
        assert_eq!(close.line, 5);
        let next = stream.next_non_whitespace(block.close + 1).expect("next");
        assert_eq!(stream.get(next).map(|t| t.line), Some(7));
        assert_eq!(stream.get(next).map(|t| t.text.as_str()), Some("namespace"));
    }

    #[test]
    fn test_lex_open_tag_line_and_inline_html() {
        let stream = lex("<p>\n<?php\n/** x */\n");
        assert_eq!(stream.get(0).map(|t| t.kind), Some(TokenKind::InlineHtml));
        assert_eq!(stream.get(1).map(|t| t.line), Some(2));
        assert_eq!(stream.first_of_kind(TokenKind::DocOpen), Some(3));
    }

    #[test]
    fn test_lex_without_open_tag() {
        let stream = lex("just text\n");
        assert_eq!(kinds(&stream), vec![TokenKind::InlineHtml]);
        assert_eq!(stream.first_of_kind(TokenKind::OpenTag), None);
    }

    #[test]
    fn test_lex_single_line_comment_first() {
        let stream = lex("<?php\n// comment\nclass A {}\n");
        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::OpenTag,
                TokenKind::Whitespace,
                TokenKind::Comment,
                TokenKind::Whitespace,
                TokenKind::Keyword(DeclarationKeyword::Class),
                TokenKind::Rest,
            ]
        );
    }

    #[test]
    fn test_lex_empty_comment_is_not_doc_block() {
        let stream = lex("<?php\n/**/\n");
        assert_eq!(stream.get(2).map(|t| t.kind), Some(TokenKind::Comment));
        assert_eq!(stream.first_of_kind(TokenKind::DocOpen), None);
    }

    #[test]
    fn test_lex_doc_open_needs_whitespace() {
        for src in ["<?php\n/***/\n", "<?php\n/**x */\n", "<?php\n/**@see a */\n"] {
            let stream = lex(src);
            assert_eq!(stream.get(2).map(|t| t.kind), Some(TokenKind::Comment), "{src:?}");
            assert_eq!(stream.first_of_kind(TokenKind::DocOpen), None, "{src:?}");
            assert_eq!(stream.render(), src);
        }
        assert!(lex("<?php\n/**\tx */").first_of_kind(TokenKind::DocOpen).is_some());
    }

    #[test]
    fn test_lex_only_first_doc_block_is_structured() {
        let stream = lex("<?php\n/** @see a */\n/** @see b */\nfunction f() {}");
        assert_eq!(
            stream
                .tokens()
                .iter()
                .filter(|t| t.kind == TokenKind::DocOpen)
                .count(),
            1
        );
        assert_eq!(
            stream.get(stream.next_meaningful(1).expect("meaningful")).map(|t| t.kind),
            Some(TokenKind::Keyword(DeclarationKeyword::Function))
        );
    }

    #[test]
    fn test_lex_closure_keyword() {
        let stream = lex("<?php\n/** x */\nfunction () {};");
        let idx = stream.next_meaningful(1).expect("meaningful");
        assert_eq!(
            stream.get(idx).map(|t| t.kind),
            Some(TokenKind::Keyword(DeclarationKeyword::Closure))
        );
    }

    #[test]
    fn test_lex_inline_tag_is_string() {
        let stream = lex("<?php\n/**\n * see @link here\n */\n");
        let block = stream.block_at(2).expect("block");
        assert!(block.tags.is_empty());
    }

    #[test]
    fn test_lex_doc_string_excludes_trailing_space_and_close() {
        let stream = lex("<?php /** @license  New BSD   */");
        let block = stream.block_at(2).expect("block");
        let content = stream
            .find_next(block.tags[0], |t| t.kind == TokenKind::DocString)
            .and_then(|i| stream.get(i))
            .expect("content");
        assert_eq!(content.text, "New BSD");
    }

    #[test]
    fn test_lex_attribute_is_meaningful() {
        let stream = lex("<?php\n#[Attr]\nclass A {}");
        assert_eq!(stream.get(2).map(|t| t.kind), Some(TokenKind::Other));
    }
}
