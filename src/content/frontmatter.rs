use std::fmt::Write as _;

/// Declared key order. Renderers and site templates rely on it for
/// readability, so entries are always emitted in this order.
pub const FRONTMATTER_KEYS: [&str; 15] = [
    "title",
    "date",
    "excerpt",
    "tags",
    "author",
    "featured",
    "readingTime",
    "wordCount",
    "metaDescription",
    "focusKeyword",
    "secondaryKeywords",
    "image",
    "imageAlt",
    "canonicalUrl",
    "schemaType",
];

#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterValue {
    Str(String),
    Int(u64),
    Bool(bool),
    List(Vec<String>),
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<u64> for FrontmatterValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for FrontmatterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FrontmatterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Fixed-key metadata block. Unset (null) keys are omitted from the output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    values: [Option<FrontmatterValue>; FRONTMATTER_KEYS.len()],
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`; `None` clears it. Unknown keys are rejected.
    pub fn set(
        &mut self,
        key: &str,
        value: Option<impl Into<FrontmatterValue>>,
    ) -> anyhow::Result<&mut Self> {
        let index = FRONTMATTER_KEYS
            .iter()
            .position(|known| *known == key)
            .ok_or_else(|| anyhow::anyhow!("unknown frontmatter key: {key}"))?;
        self.values[index] = value.map(Into::into);
        Ok(self)
    }

    /// `---` fenced block, one entry per set key, trailing newline after the
    /// closing fence.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in FRONTMATTER_KEYS.iter().zip(&self.values) {
            let Some(value) = value else { continue };
            match value {
                FrontmatterValue::Str(s) => {
                    let _ = writeln!(out, "{key}: \"{}\"", escape(s));
                }
                FrontmatterValue::Int(n) => {
                    let _ = writeln!(out, "{key}: {n}");
                }
                FrontmatterValue::Bool(b) => {
                    let _ = writeln!(out, "{key}: {b}");
                }
                FrontmatterValue::List(items) if items.is_empty() => {
                    let _ = writeln!(out, "{key}: []");
                }
                FrontmatterValue::List(items) => {
                    let _ = writeln!(out, "{key}:");
                    for item in items {
                        let _ = writeln!(out, "  - {}", item.replace('\n', " "));
                    }
                }
            }
        }
        out.push_str("---\n");
        out
    }
}

/// Double-quoted scalar escaping: backslash, quote, and line breaks.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Read a double-quoted string back out of a rendered `key: "..."` line.
pub(crate) fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_null_quotes_strings_and_lists_arrays() {
        let mut fm = Frontmatter::new();
        fm.set("title", Some("A \"B\"")).unwrap();
        fm.set("tags", Some(vec!["x".to_string(), "y".to_string()]))
            .unwrap();
        fm.set("image", None::<String>).unwrap();

        let rendered = fm.render();
        assert_eq!(
            rendered,
            "---\ntitle: \"A \\\"B\\\"\"\ntags:\n  - x\n  - y\n---\n"
        );
        assert!(!rendered.contains("image"));
    }

    #[test]
    fn numbers_and_booleans_unquoted() {
        let mut fm = Frontmatter::new();
        fm.set("featured", Some(false)).unwrap();
        fm.set("wordCount", Some(1520_u64)).unwrap();
        let rendered = fm.render();
        assert!(rendered.contains("\nfeatured: false\n"));
        assert!(rendered.contains("\nwordCount: 1520\n"));
    }

    #[test]
    fn order_follows_declared_keys_not_insertion() {
        let mut fm = Frontmatter::new();
        fm.set("canonicalUrl", Some("https://x.example/blog/a")).unwrap();
        fm.set("author", Some("Sparkle")).unwrap();
        fm.set("title", Some("T")).unwrap();
        let rendered = fm.render();
        let title = rendered.find("title:").unwrap();
        let author = rendered.find("author:").unwrap();
        let canonical = rendered.find("canonicalUrl:").unwrap();
        assert!(title < author && author < canonical);
    }

    #[test]
    fn unknown_key_rejected() {
        let mut fm = Frontmatter::new();
        assert!(fm.set("slug", Some("x")).is_err());
    }

    #[test]
    fn empty_list_renders_inline() {
        let mut fm = Frontmatter::new();
        fm.set("tags", Some(Vec::<String>::new())).unwrap();
        assert_eq!(fm.render(), "---\ntags: []\n---\n");
    }

    #[test]
    fn escapes_backslashes_and_newlines() {
        assert_eq!(escape("C:\\path\nnext"), "C:\\\\path\\nnext");
        assert_eq!(unescape(&escape("say \"hi\"\\\nbye")), "say \"hi\"\\\nbye");
    }

    #[test]
    fn set_overwrites_and_clears() {
        let mut fm = Frontmatter::new();
        fm.set("excerpt", Some("first")).unwrap();
        fm.set("excerpt", Some("second")).unwrap();
        assert_eq!(fm.render(), "---\nexcerpt: \"second\"\n---\n");
        fm.set("excerpt", None::<&str>).unwrap();
        assert_eq!(fm.render(), "---\n---\n");
    }
}
