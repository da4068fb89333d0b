//! Lexical Code Tokenizer
//!
//! A single-pass, context-free colorizer for the mixed pseudo-code and
//! multi-language snippets found in the documentation pages.
//!
//! # Algorithm
//! - The rules in [`RULES`] are joined, in priority order, into one regular
//!   expression. The `regex` crate uses leftmost-first alternation, so at any
//!   position the first rule that matches wins, exactly as the table reads.
//! - Matches are visited left to right. Text between matches is plain.
//! - Each match is classified from its own text (see [`Tokenizer::classify`]),
//!   never from its neighbours.
//!
//! Multi-line constructs (triple-quoted strings, block comments) are not
//! understood and come out as whatever the line-level rules make of them.
//!
//! # Example
//! ```
//! use plaindocs::highlight::{Tokenizer, TokenKind};
//!
//! let tokenizer = Tokenizer::new();
//! let kinds: Vec<TokenKind> = tokenizer
//!     .tokenize("len(x)")
//!     .iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Builtin, TokenKind::Punctuation, TokenKind::Plain, TokenKind::Punctuation]
//! );
//! ```

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::escape::push_escaped;

// ─────────────────────────────────────────────────────────────────────────────
// Word Sets
// ─────────────────────────────────────────────────────────────────────────────

/// Boolean and null literals.
pub const BOOLEANS: &[&str] = &["true", "false", "null", "none"];

/// Control-flow and declaration words, including the pseudo-code vocabulary
/// used throughout the guides (`create`, `repeat`, `otherwise`, ...).
pub const KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "break", "continue", "pass", "return", "yield", "try",
    "except", "finally", "with", "as", "import", "from", "class", "def", "lambda", "async",
    "await", "raise", "assert", "global", "nonlocal", "del", "in", "is", "and", "or", "not",
    "create", "make", "define", "repeat", "until", "do", "then", "otherwise", "function",
    "generator", "catch", "throw",
];

/// Built-in function names.
pub const BUILTINS: &[&str] = &[
    "print", "len", "range", "list", "dict", "set", "int", "float", "str", "bool", "sum", "min",
    "max", "sorted", "map", "filter", "open", "type", "enumerate", "zip", "any", "all",
];

/// Characters that form a punctuation token on their own.
const PUNCTUATION: &str = "(){}[],.:";

/// Characters an operator token may be built from.
const OPERATOR_CHARS: &str = "+-*/%=&|!<>^~";

// ─────────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────────

/// One alternative of the token pattern.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// A raw regex fragment.
    Pattern(&'static str),
    /// Any of the listed words, ASCII case-insensitive, on word boundaries.
    Words(&'static [&'static str]),
}

impl Rule {
    fn to_pattern(self) -> String {
        match self {
            Rule::Pattern(pattern) => pattern.to_string(),
            Rule::Words(words) => {
                let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
                format!(r"(?i-u:\b(?:{})\b)", alternatives.join("|"))
            }
        }
    }
}

/// Token rules in priority order. Earlier rules win at the same position.
///
/// `[^\r\n]` stands in for "any character but a line end", so a comment on a
/// CRLF line stops before the `\r`. Word boundaries and digits are ASCII.
const RULES: &[Rule] = &[
    // Line comments
    Rule::Pattern(r"#[^\r\n]*"),
    Rule::Pattern(r"//[^\r\n]*"),
    // Quoted strings, backslash escapes the next character
    Rule::Pattern(r#""(?:\\[^\r\n]|[^"\\])*""#),
    Rule::Pattern(r"'(?:\\[^\r\n]|[^'\\])*'"),
    Rule::Pattern(r"`(?:\\[^\r\n]|[^`\\])*`"),
    // Numbers: no sign, no leading dot
    Rule::Pattern(r"(?-u:\b)[0-9]+(?:\.[0-9]+)?(?-u:\b)"),
    Rule::Words(BOOLEANS),
    Rule::Words(KEYWORDS),
    Rule::Words(BUILTINS),
    // Operators, longest first
    Rule::Pattern(r"==|!=|<=|>=|\+=|-=|\*=|/=|%=|\*\*"),
    Rule::Pattern(r"[+\-*/%=]"),
    Rule::Pattern(r"[(){}\[\],.:]"),
];

/// Assemble the combined token pattern from [`RULES`].
fn token_pattern() -> String {
    let alternatives: Vec<String> = RULES.iter().map(|rule| rule.to_pattern()).collect();
    alternatives.join("|")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Classification of a token, used as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Boolean,
    Keyword,
    Builtin,
    Punctuation,
    Operator,
    /// Unclassified text; escaped but not wrapped.
    Plain,
}

impl TokenKind {
    /// The class name emitted in markup.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Keyword => "keyword",
            TokenKind::Builtin => "builtin",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Operator => "operator",
            TokenKind::Plain => "plain",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified span of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Classification of this span
    pub kind: TokenKind,
    /// The exact source text
    pub text: &'a str,
    /// Byte range of `text` within the input
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    fn new(source: &'a str, kind: TokenKind, span: Range<usize>) -> Self {
        Self {
            kind,
            text: &source[span.clone()],
            span,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ─────────────────────────────────────────────────────────────────────────────

/// Compiled token pattern plus the word sets used for classification.
///
/// Compiling the pattern is the only expensive step, so one instance is meant
/// to be built once and reused; [`Tokenizer::shared`] provides that instance.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
    booleans: HashSet<&'static str>,
    keywords: HashSet<&'static str>,
    builtins: HashSet<&'static str>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Compile the token pattern.
    pub fn new() -> Self {
        // The pattern is assembled from constants only; a failure here is a
        // bug in RULES and is covered by the test suite.
        let pattern = Regex::new(&token_pattern()).expect("token rules form a valid pattern");
        Self {
            pattern,
            booleans: BOOLEANS.iter().copied().collect(),
            keywords: KEYWORDS.iter().copied().collect(),
            builtins: BUILTINS.iter().copied().collect(),
        }
    }

    /// Process-wide instance, compiled on first use.
    pub fn shared() -> &'static Tokenizer {
        static SHARED: OnceLock<Tokenizer> = OnceLock::new();
        SHARED.get_or_init(Tokenizer::new)
    }

    /// Classify a single matched span by its text.
    ///
    /// Checks run in a fixed order; the first that applies decides.
    pub fn classify(&self, text: &str) -> TokenKind {
        if text.starts_with('#') || text.starts_with("//") {
            return TokenKind::Comment;
        }
        if text.starts_with(['"', '\'', '`']) {
            return TokenKind::String;
        }
        if text.starts_with(|c: char| c.is_ascii_digit()) {
            return TokenKind::Number;
        }

        let lower = text.to_lowercase();
        if self.booleans.contains(lower.as_str()) {
            TokenKind::Boolean
        } else if self.keywords.contains(lower.as_str()) {
            TokenKind::Keyword
        } else if self.builtins.contains(lower.as_str()) {
            TokenKind::Builtin
        } else if text.chars().count() == 1 && PUNCTUATION.contains(text) {
            TokenKind::Punctuation
        } else if !text.is_empty() && text.chars().all(|c| OPERATOR_CHARS.contains(c)) {
            TokenKind::Operator
        } else {
            TokenKind::Plain
        }
    }

    /// Split `code` into tokens covering the whole input, in order.
    ///
    /// Gaps between matches become [`TokenKind::Plain`] tokens, so the token
    /// texts concatenated give back `code` exactly.
    pub fn tokenize<'a>(&self, code: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut last_end = 0;

        for found in self.pattern.find_iter(code) {
            if found.start() > last_end {
                tokens.push(Token::new(code, TokenKind::Plain, last_end..found.start()));
            }
            let kind = self.classify(found.as_str());
            tokens.push(Token::new(code, kind, found.range()));
            last_end = found.end();
        }

        if last_end < code.len() {
            tokens.push(Token::new(code, TokenKind::Plain, last_end..code.len()));
        }

        tokens
    }

    /// Render `code` as escaped markup with each classified token wrapped in
    /// `<span class="token KIND">`.
    pub fn highlight(&self, code: &str) -> String {
        let mut out = String::with_capacity(code.len() * 2);
        for token in self.tokenize(code) {
            if token.kind == TokenKind::Plain {
                push_escaped(&mut out, token.text);
            } else {
                out.push_str("<span class=\"token ");
                out.push_str(token.kind.as_str());
                out.push_str("\">");
                push_escaped(&mut out, token.text);
                out.push_str("</span>");
            }
        }
        out
    }
}

/// Highlight `code` with the shared tokenizer.
pub fn highlight_code(code: &str) -> String {
    Tokenizer::shared().highlight(code)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::escape::unescape_html;

    /// Tokens with whitespace-only plain gaps removed and text trimmed.
    fn significant(code: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::new()
            .tokenize(code)
            .into_iter()
            .filter(|t| !(t.kind == TokenKind::Plain && t.text.trim().is_empty()))
            .map(|t| (t.kind, t.text.trim().to_string()))
            .collect()
    }

    /// Strip token spans and unescape, recovering the source text.
    fn strip_markup(html: &str) -> String {
        let tags = Regex::new(r#"<span class="token [a-z]+">|</span>"#).unwrap();
        unescape_html(&tags.replace_all(html, ""))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pattern
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_pattern_compiles() {
        assert!(Regex::new(&token_pattern()).is_ok());
    }

    #[test]
    fn test_word_sets_are_disjoint() {
        for word in KEYWORDS {
            assert!(!BUILTINS.contains(word), "{} is both keyword and builtin", word);
            assert!(!BOOLEANS.contains(word), "{} is both keyword and boolean", word);
        }
        for word in BUILTINS {
            assert!(!BOOLEANS.contains(word), "{} is both builtin and boolean", word);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Classification examples
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_hash_comment_spans_line() {
        let tokens = Tokenizer::new().tokenize("# comment");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "# comment");
    }

    #[test]
    fn test_slash_comment_stops_at_line_end() {
        assert_eq!(
            significant("x // note\r\ny"),
            vec![
                (TokenKind::Plain, "x".to_string()),
                (TokenKind::Comment, "// note".to_string()),
                (TokenKind::Plain, "y".to_string()),
            ]
        );
    }

    #[test]
    fn test_assignment_with_numbers() {
        assert_eq!(
            significant("x = 5 + 3.14"),
            vec![
                (TokenKind::Plain, "x".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::Number, "5".to_string()),
                (TokenKind::Operator, "+".to_string()),
                (TokenKind::Number, "3.14".to_string()),
            ]
        );
    }

    #[test]
    fn test_keyword_case_insensitive_preserves_case() {
        for word in ["return", "RETURN", "Return"] {
            let tokens = Tokenizer::new().tokenize(word);
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].kind, TokenKind::Keyword);
            assert_eq!(tokens[0].text, word);
        }
        assert_eq!(
            highlight_code("RETURN"),
            r#"<span class="token keyword">RETURN</span>"#
        );
    }

    #[test]
    fn test_boolean_literals() {
        for word in ["True", "false", "NULL", "None"] {
            let tokens = Tokenizer::new().tokenize(word);
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].kind, TokenKind::Boolean, "{}", word);
        }
    }

    #[test]
    fn test_builtin_call() {
        assert_eq!(
            significant("len(x)"),
            vec![
                (TokenKind::Builtin, "len".to_string()),
                (TokenKind::Punctuation, "(".to_string()),
                (TokenKind::Plain, "x".to_string()),
                (TokenKind::Punctuation, ")".to_string()),
            ]
        );
    }

    #[test]
    fn test_words_need_boundaries() {
        // `index` is not `in`, `integer` is not `int`, `x5` has no number
        assert_eq!(
            significant("index integer x5"),
            vec![(TokenKind::Plain, "index integer x5".to_string())]
        );
    }

    #[test]
    fn test_prefix_keyword_falls_to_builtin() {
        assert_eq!(significant("int"), vec![(TokenKind::Builtin, "int".to_string())]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Strings
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_string_delimiters() {
        for code in [r#""hi""#, "'hi'", "`hi`"] {
            let tokens = Tokenizer::new().tokenize(code);
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].kind, TokenKind::String);
        }
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let code = r#"print("say \"hi\"")"#;
        let tokens = significant(code);
        assert_eq!(tokens[2], (TokenKind::String, r#""say \"hi\"""#.to_string()));
    }

    #[test]
    fn test_comment_marker_inside_string_is_string() {
        assert_eq!(
            significant(r##""# not a comment""##),
            vec![(TokenKind::String, r##""# not a comment""##.to_string())]
        );
    }

    #[test]
    fn test_unterminated_quote_is_literal() {
        assert_eq!(
            significant("it's 5"),
            vec![
                (TokenKind::Plain, "it's".to_string()),
                (TokenKind::Number, "5".to_string()),
            ]
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Numbers and operators
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_negative_number_is_operator_then_number() {
        assert_eq!(
            significant("-5"),
            vec![
                (TokenKind::Operator, "-".to_string()),
                (TokenKind::Number, "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_leading_dot_is_punctuation() {
        assert_eq!(
            significant(".5"),
            vec![
                (TokenKind::Punctuation, ".".to_string()),
                (TokenKind::Number, "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_char_operators_longest_first() {
        let tokens = significant("a == b ** 2 != c <= d >= e += 1");
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Operator)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(ops, ["==", "**", "!=", "<=", ">=", "+="]);
    }

    #[test]
    fn test_lone_comparison_is_plain() {
        assert_eq!(significant("<"), vec![(TokenKind::Plain, "<".to_string())]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input() {
        assert!(Tokenizer::new().tokenize("").is_empty());
        assert_eq!(highlight_code(""), "");
    }

    #[test]
    fn test_markup_in_code_is_escaped() {
        assert_eq!(
            highlight_code("a <b> c"),
            "a &lt;b&gt; c"
        );
        assert_eq!(
            highlight_code(r#""<i>""#),
            r#"<span class="token string">&quot;&lt;i&gt;&quot;</span>"#
        );
    }

    #[test]
    fn test_tokens_cover_input_in_order() {
        let code = "def f(x):\n    return x * 2  # double\n";
        let tokens = Tokenizer::new().tokenize(code);
        let mut expected_start = 0;
        for token in &tokens {
            assert_eq!(token.span.start, expected_start);
            expected_start = token.span.end;
        }
        assert_eq!(expected_start, code.len());
    }

    #[test]
    fn test_round_trip_after_unescape() {
        let samples = [
            "",
            "x = 5 + 3.14",
            "if a <= b && c != 'd':\n    print(\"é&<>\")  # done",
            "create list `names` then repeat until done // end",
            "weird \\ \" unterminated 'quote & stuff",
            "CRLF line\r\n# comment\r\nnext",
        ];
        for sample in samples {
            assert_eq!(strip_markup(&highlight_code(sample)), sample);
        }
    }

    #[test]
    fn test_round_trip_every_short_string() {
        // Quotes, escapes, comment starters, line ends, non-ASCII, digits,
        // operators and letters that start keywords
        const ALPHABET: [char; 16] = [
            '"', '\'', '`', '\\', '#', '/', '\r', '\n', 'é', '5', '.', '=', '<', 'i', 'f', ' ',
        ];

        let tokenizer = Tokenizer::new();
        let mut current = vec![String::new()];
        let mut checked = 0;
        for _ in 0..3 {
            let mut next = Vec::with_capacity(current.len() * ALPHABET.len());
            for prefix in &current {
                for c in ALPHABET {
                    let mut input = prefix.clone();
                    input.push(c);

                    assert_eq!(strip_markup(&tokenizer.highlight(&input)), input, "{:?}", input);
                    let covered: String = tokenizer.tokenize(&input).iter().map(|t| t.text).collect();
                    assert_eq!(covered, input, "{:?}", input);

                    checked += 1;
                    next.push(input);
                }
            }
            current = next;
        }
        assert_eq!(checked, 16 + 16 * 16 + 16 * 16 * 16);
    }

    #[test]
    fn test_token_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenKind::Punctuation).unwrap(),
            "\"punctuation\""
        );
    }
}
