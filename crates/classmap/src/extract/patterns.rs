//! Lexical recognizers for Java and C# declarations
//!
//! Every pattern the extractors and resolvers rely on is reachable through
//! a named function here, so the regular expressions can be swapped for a
//! tokenizer without touching the callers.
//!
//! Matching runs on a *skeleton* of the source: comments and the contents
//! of string/char literals are blanked with spaces, byte for byte, so that
//! braces or semicolons inside literals cannot derail the patterns. The
//! skeleton keeps every byte offset of the original, which lets callers
//! slice display text from the comment-free *code* copy.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::{Variant, Visibility};

const MODIFIERS: &str = "static|final|abstract|virtual|override|readonly|async|sealed|\
synchronized|transient|volatile|const|new|extern|unsafe|partial|required|default|native|\
strictfp|event|public|private|protected|internal";
const IDENT: &str = r"[A-Za-z_]\w*";
const TYPE: &str = r"[A-Za-z_][\w.]*(?:\s*<[^;{}()=]*>)?(?:\s*\[[\s,]*\])*\??";
const JAVA_DECLARATIONS: &str = "class|interface|enum|record";
const CSHARP_DECLARATIONS: &str = "class|interface|enum|record|struct";

/// Compiled pattern set for one variant
struct PatternSet {
    declaration: Regex,
    attribute: Regex,
    method: Regex,
    property: Regex,
    auto_property: Regex,
    private_field: Regex,
}

impl PatternSet {
    fn build(variant: Variant) -> Self {
        let (declarations, field_mods) = match variant {
            Variant::Java => (JAVA_DECLARATIONS, "static|final|transient|volatile"),
            Variant::CSharp => (CSHARP_DECLARATIONS, "static|readonly|volatile"),
        };
        let access = variant.access_keywords().join("|");
        let head = format!(r"\b(?P<access>{access})(?P<mods>(?:\s+(?:{MODIFIERS}))*)\s+");

        Self {
            declaration: compile(&format!(
                r"\b(?P<keyword>{declarations})\s+(?P<name>{IDENT})"
            )),
            attribute: compile(&format!(
                r"{head}(?P<type>{TYPE})\s+(?P<name>{IDENT})\s*(?P<init>=[^;]*)?;"
            )),
            method: compile(&format!(
                r"{head}(?:<[^;{{}}()=]*>\s*)?(?P<type>{TYPE})\s+(?P<name>{IDENT})(?:\s*<[^;{{}}()=]*>)?\s*\("
            )),
            property: compile(&format!(
                r"{head}(?P<type>{TYPE})\s+(?P<name>{IDENT})\s*\{{\s*(?:(?:{access})\s+)*(?:get|set|init)\b"
            )),
            auto_property: compile(&format!(
                r"\b(?:{access})(?:\s+(?:{MODIFIERS}))*\s+(?P<type>{IDENT})\s+{IDENT}\s*\{{\s*(?:(?:{access})\s+)*get\s*;\s*(?:(?:{access})\s+)*(?:set|init)\s*;\s*\}}(?:\s*=(?P<init>[^;]*);)?"
            )),
            private_field: compile(&format!(
                r"\bprivate(?:\s+(?:{field_mods}))*\s+(?P<type>{IDENT})\s+{IDENT}\s*(?:=(?P<init>[^;]*))?;"
            )),
        }
    }
}

// Patterns are literals assembled from the constants above.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid recognizer pattern {pattern}: {e}"))
}

static JAVA_PATTERNS: Lazy<PatternSet> = Lazy::new(|| PatternSet::build(Variant::Java));
static CSHARP_PATTERNS: Lazy<PatternSet> = Lazy::new(|| PatternSet::build(Variant::CSharp));
static HEADER_KEYWORD: Lazy<Regex> =
    Lazy::new(|| compile(r"\b(?P<kw>extends|implements|permits|where)\b"));
static NEW_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| compile(r"^\s*new\s+(?P<type>[A-Za-z_][\w.]*)\s*(?:<[^(]*>)?\s*\("));

fn patterns(variant: Variant) -> &'static PatternSet {
    match variant {
        Variant::Java => &JAVA_PATTERNS,
        Variant::CSharp => &CSHARP_PATTERNS,
    }
}

/// Source text with comments removed, plus a literal-free skeleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSource {
    code: String,
    skeleton: String,
}

impl PreparedSource {
    /// Comment-free text, used to slice display signatures
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Comment- and literal-free text, used for matching
    pub fn skeleton(&self) -> &str {
        &self.skeleton
    }

    pub fn len(&self) -> usize {
        self.skeleton.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skeleton.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    LineComment,
    BlockComment,
    Str { verbatim: bool },
    TextBlock,
    CharLit,
}

fn push_blank(out: &mut String, c: char) {
    if c == '\n' {
        out.push('\n');
    } else {
        for _ in 0..c.len_utf8() {
            out.push(' ');
        }
    }
}

/// Blank comments and literal contents while keeping byte offsets
pub fn prepare(source: &str) -> PreparedSource {
    let chars: Vec<char> = source.chars().collect();
    let mut code = String::with_capacity(source.len());
    let mut skeleton = String::with_capacity(source.len());
    let mut state = ScanState::Code;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match state {
            ScanState::Code => match c {
                '/' if next == Some('/') => {
                    state = ScanState::LineComment;
                    continue;
                }
                '/' if next == Some('*') => {
                    push_blank(&mut code, c);
                    push_blank(&mut skeleton, c);
                    push_blank(&mut code, '*');
                    push_blank(&mut skeleton, '*');
                    i += 2;
                    state = ScanState::BlockComment;
                    continue;
                }
                '"' if next == Some('"') && chars.get(i + 2) == Some(&'"') => {
                    code.push_str("\"\"\"");
                    skeleton.push_str("\"\"\"");
                    i += 3;
                    state = ScanState::TextBlock;
                    continue;
                }
                '"' => {
                    let before = |n: usize| i.checked_sub(n).map(|j| chars[j]);
                    let verbatim = before(1) == Some('@')
                        || (before(1) == Some('$') && before(2) == Some('@'));
                    code.push(c);
                    skeleton.push(c);
                    state = ScanState::Str { verbatim };
                }
                '\'' => {
                    code.push(c);
                    skeleton.push(c);
                    state = ScanState::CharLit;
                }
                _ => {
                    code.push(c);
                    skeleton.push(c);
                }
            },
            ScanState::LineComment => {
                if c == '\n' {
                    state = ScanState::Code;
                }
                push_blank(&mut code, c);
                push_blank(&mut skeleton, c);
            }
            ScanState::BlockComment => {
                if c == '*' && next == Some('/') {
                    for blanked in ['*', '/'] {
                        push_blank(&mut code, blanked);
                        push_blank(&mut skeleton, blanked);
                    }
                    i += 2;
                    state = ScanState::Code;
                    continue;
                }
                push_blank(&mut code, c);
                push_blank(&mut skeleton, c);
            }
            ScanState::Str { verbatim } => {
                if !verbatim && c == '\\' {
                    code.push(c);
                    push_blank(&mut skeleton, c);
                    if let Some(escaped) = next {
                        code.push(escaped);
                        push_blank(&mut skeleton, escaped);
                        i += 2;
                        continue;
                    }
                } else if c == '"' && verbatim && next == Some('"') {
                    code.push_str("\"\"");
                    skeleton.push_str("  ");
                    i += 2;
                    continue;
                } else if c == '"' || (c == '\n' && !verbatim) {
                    code.push(c);
                    skeleton.push(c);
                    state = ScanState::Code;
                } else {
                    code.push(c);
                    push_blank(&mut skeleton, c);
                }
            }
            ScanState::TextBlock => {
                if c == '"' && next == Some('"') && chars.get(i + 2) == Some(&'"') {
                    code.push_str("\"\"\"");
                    skeleton.push_str("\"\"\"");
                    i += 3;
                    state = ScanState::Code;
                    continue;
                }
                code.push(c);
                push_blank(&mut skeleton, c);
            }
            ScanState::CharLit => {
                if c == '\\' {
                    code.push(c);
                    push_blank(&mut skeleton, c);
                    if let Some(escaped) = next {
                        code.push(escaped);
                        push_blank(&mut skeleton, escaped);
                        i += 2;
                        continue;
                    }
                } else if c == '\'' || c == '\n' {
                    code.push(c);
                    skeleton.push(c);
                    state = ScanState::Code;
                } else {
                    code.push(c);
                    push_blank(&mut skeleton, c);
                }
            }
        }
        i += 1;
    }

    PreparedSource { code, skeleton }
}

/// Collapse every run of whitespace into a single space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First type declaration of a compilation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub keyword: String,
    pub name: String,
    /// Text between the name and the body (type parameters, base clauses)
    pub header: Range<usize>,
    /// Text between the body braces; empty when there is no body
    pub body: Range<usize>,
}

/// Recognize the first `class`-like declaration
///
/// Java accepts `class`, `interface`, `enum` and `record`; C# also
/// accepts `struct`.
pub fn class_declaration(source: &PreparedSource, variant: Variant) -> Option<Declaration> {
    let skeleton = source.skeleton();
    let caps = patterns(variant).declaration.captures(skeleton)?;
    let name = caps.name("name")?;
    let keyword = caps.name("keyword")?.as_str().to_string();

    let bytes = skeleton.as_bytes();
    let mut depth = 0usize;
    let mut pos = name.end();
    let mut open = None;
    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'{' if depth == 0 => {
                open = Some(pos);
                break;
            }
            b';' if depth == 0 => break,
            _ => {}
        }
        pos += 1;
    }

    let (header, body) = match open {
        Some(open) => {
            let close = matching_close(bytes, open, b'{', b'}').unwrap_or(bytes.len());
            (name.end()..open, open + 1..close)
        }
        None => (name.end()..pos, pos..pos),
    };

    Some(Declaration {
        keyword,
        name: name.as_str().to_string(),
        header,
        body,
    })
}

/// Recognize just the class name; `None` when nothing matches
pub fn class_name(source: &PreparedSource, variant: Variant) -> Option<String> {
    class_declaration(source, variant).map(|d| d.name)
}

fn matching_close(bytes: &[u8], open: usize, open_byte: u8, close_byte: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (pos, &b) in bytes.iter().enumerate().skip(open) {
        if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(pos);
            }
        }
    }
    None
}

fn access_of(caps: &Captures<'_>) -> Visibility {
    caps.name("access")
        .and_then(|m| Visibility::from_keyword(m.as_str()))
        .unwrap_or_default()
}

/// A field declaration inside a class body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub offset: usize,
    pub visibility: Visibility,
    pub type_name: String,
    pub name: String,
    /// Modifiers, type and name, whitespace-normalized, without the access keyword
    pub signature: String,
}

/// Recognize `access [mods] Type name [= init];` declarations
///
/// The declarator never contains `(`; an initializer may.
pub fn field_declarations(
    source: &PreparedSource,
    body: Range<usize>,
    variant: Variant,
) -> Vec<FieldDecl> {
    let skeleton = &source.skeleton()[body.clone()];
    patterns(variant)
        .attribute
        .captures_iter(skeleton)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let access = caps.name("access")?;
            let name = caps.name("name")?;
            let start = body.start + access.end();
            let end = body.start + name.end();
            Some(FieldDecl {
                offset: body.start + whole.start(),
                visibility: access_of(&caps),
                type_name: normalize_whitespace(caps.name("type")?.as_str()),
                name: name.as_str().to_string(),
                signature: normalize_whitespace(&source.code()[start..end]),
            })
        })
        .collect()
}

/// A method declaration inside a class body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub offset: usize,
    pub visibility: Visibility,
    pub name: String,
    /// Modifiers, return type, name, parameters and trailing clauses,
    /// whitespace-normalized, without the access keyword or body
    pub signature: String,
}

/// Recognize `access [mods] ReturnType name(` declarations
///
/// Constructors have no return type and are not recognized. A match
/// whose parameter list never closes is dropped.
pub fn method_declarations(
    source: &PreparedSource,
    body: Range<usize>,
    variant: Variant,
) -> Vec<MethodDecl> {
    let skeleton = source.skeleton();
    let bytes = skeleton.as_bytes();
    patterns(variant)
        .method
        .captures_iter(&skeleton[body.clone()])
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let access = caps.name("access")?;
            let open = body.start + whole.end() - 1;
            let close = matching_close(bytes, open, b'(', b')')?;

            let mut end = close + 1;
            let mut tail_end = end;
            while end < body.end {
                match bytes[end] {
                    b'{' | b';' => break,
                    b'=' if bytes.get(end + 1) == Some(&b'>') => break,
                    _ => {}
                }
                end += 1;
                tail_end = end;
            }

            let start = body.start + access.end();
            Some(MethodDecl {
                offset: body.start + whole.start(),
                visibility: access_of(&caps),
                name: caps.name("name")?.as_str().to_string(),
                signature: normalize_whitespace(&source.code()[start..tail_end]),
            })
        })
        .collect()
}

/// A C# property declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub offset: usize,
    pub visibility: Visibility,
    pub type_name: String,
    pub name: String,
}

/// Recognize `access [mods] Type Name { get ... }` property declarations
pub fn property_declarations(
    source: &PreparedSource,
    body: Range<usize>,
    variant: Variant,
) -> Vec<PropertyDecl> {
    patterns(variant)
        .property
        .captures_iter(&source.skeleton()[body.clone()])
        .filter_map(|caps| {
            Some(PropertyDecl {
                offset: body.start + caps.get(0)?.start(),
                visibility: access_of(&caps),
                type_name: normalize_whitespace(caps.name("type")?.as_str()),
                name: caps.name("name")?.as_str().to_string(),
            })
        })
        .collect()
}

/// A member whose declared type may point at another class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedMember {
    pub offset: usize,
    pub type_name: String,
    /// Type constructed by a `new Type(` initializer, if any
    pub constructed: Option<String>,
}

fn typed_members(regex: &Regex, source: &PreparedSource, body: Range<usize>) -> Vec<TypedMember> {
    regex
        .captures_iter(&source.skeleton()[body.clone()])
        .filter_map(|caps| {
            Some(TypedMember {
                offset: body.start + caps.get(0)?.start(),
                type_name: caps.name("type")?.as_str().to_string(),
                constructed: caps.name("init").and_then(|init| constructed_type(init.as_str())),
            })
        })
        .collect()
}

/// Recognize private fields with a bare (non-generic, non-array) type
pub fn private_fields(
    source: &PreparedSource,
    body: Range<usize>,
    variant: Variant,
) -> Vec<TypedMember> {
    typed_members(&patterns(variant).private_field, source, body)
}

/// Recognize `{ get; set; }`-shaped auto-properties with a bare type
pub fn auto_properties(
    source: &PreparedSource,
    body: Range<usize>,
    variant: Variant,
) -> Vec<TypedMember> {
    typed_members(&patterns(variant).auto_property, source, body)
}

/// Simple name of the type in a `new Type(...)` initializer
pub fn constructed_type(initializer: &str) -> Option<String> {
    let initializer = initializer.trim_start().trim_start_matches('=');
    let caps = NEW_EXPRESSION.captures(initializer)?;
    let qualified = caps.name("type")?.as_str();
    Some(simple_type_name(qualified))
}

/// Strip generic arguments, constructor arguments and qualifiers
///
/// `java.util.List<T>` becomes `List`; `Base(x)` becomes `Base`.
pub fn simple_type_name(item: &str) -> String {
    let item = item.trim();
    let cut = item.find(['<', '(', '[', '?']).unwrap_or(item.len());
    let qualified = item[..cut].trim();
    qualified
        .rsplit('.')
        .next()
        .unwrap_or(qualified)
        .trim()
        .to_string()
}

/// Split a comma-separated type list, ignoring commas inside `<>` and `()`
pub fn split_type_list(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (pos, c) in list.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(list[start..pos].trim());
                start = pos + 1;
            }
            _ => {}
        }
    }
    items.push(list[start..].trim());
    items.retain(|item| !item.is_empty());
    items
}

/// Skip a leading generic parameter list such as `<T extends A<T>>`
pub fn skip_type_parameters(header: &str) -> &str {
    let trimmed = header.trim_start();
    if !trimmed.starts_with('<') {
        return trimmed;
    }
    match matching_close(trimmed.as_bytes(), 0, b'<', b'>') {
        Some(close) => &trimmed[close + 1..],
        None => "",
    }
}

/// A base clause of a declaration header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderClause<'a> {
    pub keyword: &'a str,
    pub offset: usize,
    pub items: Vec<&'a str>,
}

/// Split a Java header into its `extends`/`implements` clauses
///
/// Keywords nested inside generic arguments are ignored; `permits`
/// closes the preceding clause.
pub fn java_header_clauses(header: &str) -> Vec<HeaderClause<'_>> {
    let rest = skip_type_parameters(header);
    let base = header.len() - rest.len();
    let bytes = rest.as_bytes();

    let keywords: Vec<(usize, usize, &str)> = HEADER_KEYWORD
        .captures_iter(rest)
        .filter_map(|caps| {
            let m = caps.name("kw")?;
            let depth = bytes[..m.start()].iter().fold(0i32, |d, b| match b {
                b'<' => d + 1,
                b'>' => d - 1,
                _ => d,
            });
            (depth == 0).then_some((m.start(), m.end(), m.as_str()))
        })
        .collect();

    keywords
        .iter()
        .enumerate()
        .filter(|(_, (_, _, kw))| matches!(*kw, "extends" | "implements"))
        .map(|(i, &(start, end, keyword))| {
            let stop = keywords.get(i + 1).map(|k| k.0).unwrap_or(rest.len());
            HeaderClause {
                keyword,
                offset: base + start,
                items: split_type_list(&rest[end..stop]),
            }
        })
        .collect()
}

/// Items of a C# `: A, B` base list
///
/// Only a colon ahead of the first `where` constraint opens a base list;
/// `class Cache<T> where T : IEntry` has none.
pub fn csharp_base_list(header: &str) -> Option<HeaderClause<'_>> {
    let bytes = header.as_bytes();
    let stop = HEADER_KEYWORD
        .captures_iter(header)
        .filter_map(|caps| caps.name("kw"))
        .find(|m| m.as_str() == "where" && nesting_depth(&bytes[..m.start()]) == 0)
        .map(|m| m.start())
        .unwrap_or(header.len());

    let mut depth = 0i32;
    let mut colon = None;
    for (pos, &b) in bytes[..stop].iter().enumerate() {
        match b {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth -= 1,
            b':' if depth == 0 => {
                colon = Some(pos);
                break;
            }
            _ => {}
        }
    }
    let colon = colon?;
    Some(HeaderClause {
        keyword: ":",
        offset: colon,
        items: split_type_list(&header[colon + 1..stop]),
    })
}

fn nesting_depth(bytes: &[u8]) -> i32 {
    bytes.iter().fold(0, |d, b| match b {
        b'<' | b'(' => d + 1,
        b'>' | b')' => d - 1,
        _ => d,
    })
}
