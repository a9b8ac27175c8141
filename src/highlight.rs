// File: src/highlight.rs
//! Syntax highlighting for code examples and exercise solutions.
//!
//! A highlighter only segments text: joining the spans it returns gives back
//! the input byte for byte.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    Annotation,
    Str,
    Comment,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

pub trait Highlighter {
    /// Language tag, e.g. `"java"`.
    fn language(&self) -> &'static str;
    fn highlight<'a>(&self, code: &'a str) -> Vec<Span<'a>>;
}

/// Every code sample in the catalog is tagged as Java.
pub const CATALOG_LANGUAGE: &str = "java";

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "boolean", "break", "byte", "case", "catch", "char", "class", "continue",
    "default", "do", "double", "else", "enum", "extends", "final", "finally", "float", "for",
    "if", "implements", "import", "instanceof", "int", "interface", "long", "new", "null",
    "package", "private", "protected", "public", "return", "short", "static", "super",
    "switch", "this", "throw", "throws", "try", "void", "volatile", "while", "true", "false",
    "var", "record",
];

pub struct JavaHighlighter;

impl JavaHighlighter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for JavaHighlighter {
    fn language(&self) -> &'static str {
        CATALOG_LANGUAGE
    }

    fn highlight<'a>(&self, code: &'a str) -> Vec<Span<'a>> {
        let bytes = code.as_bytes();
        let mut spans: Vec<Span<'a>> = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let start = pos;
            let kind = match bytes[pos] {
                b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                    pos = find_from(bytes, pos, b'\n').unwrap_or(bytes.len());
                    TokenKind::Comment
                }
                b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                    pos = code[pos + 2..]
                        .find("*/")
                        .map(|end| pos + 2 + end + 2)
                        .unwrap_or(bytes.len());
                    TokenKind::Comment
                }
                quote @ (b'"' | b'\'') => {
                    pos += 1;
                    while pos < bytes.len() && bytes[pos] != quote && bytes[pos] != b'\n' {
                        pos += if bytes[pos] == b'\\' { 2 } else { 1 };
                    }
                    pos = (pos + 1).min(bytes.len());
                    TokenKind::Str
                }
                b'@' => {
                    pos += 1;
                    pos = skip_word(bytes, pos);
                    TokenKind::Annotation
                }
                b'0'..=b'9' => {
                    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'.') {
                        pos += 1;
                    }
                    TokenKind::Number
                }
                b if is_word_byte(b) => {
                    pos = skip_word(bytes, pos);
                    if JAVA_KEYWORDS.contains(&&code[start..pos]) {
                        TokenKind::Keyword
                    } else {
                        TokenKind::Plain
                    }
                }
                _ => {
                    // Advance a whole char so spans stay on UTF-8 boundaries.
                    pos += code[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
                    TokenKind::Plain
                }
            };
            push_span(&mut spans, kind, &code[start..pos], code, start);
        }
        spans
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn skip_word(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_word_byte(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn find_from(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == needle).map(|i| from + i)
}

// Adjacent plain runs are merged into one span.
fn push_span<'a>(spans: &mut Vec<Span<'a>>, kind: TokenKind, text: &'a str, code: &'a str, start: usize) {
    if kind == TokenKind::Plain {
        if let Some(last) = spans.last_mut() {
            if last.kind == TokenKind::Plain {
                let last_start = start - last.text.len();
                last.text = &code[last_start..start + text.len()];
                return;
            }
        }
    }
    spans.push(Span { kind, text });
}
