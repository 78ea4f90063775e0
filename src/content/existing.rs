use super::frontmatter::unescape;
use serde::Serialize;
use std::path::Path;

/// Previously generated post, offered to the model as an internal-link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingPost {
    pub title: String,
    /// Site-relative URL, `/<blog slug>/<file stem>`.
    pub url: String,
    pub slug: String,
}

/// Every `*.md` file in `dir` carrying a quoted `title:` frontmatter line,
/// ordered by file name. A missing or unreadable directory yields nothing.
pub fn scan_existing_posts(dir: &Path, blog_slug: &str) -> Vec<ExistingPost> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if dir.exists() {
                tracing::warn!(dir = %dir.display(), "cannot list existing posts: {e}");
            }
            return Vec::new();
        }
    };

    let mut files: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();

    files
        .into_iter()
        .filter_map(|path| {
            let slug = path.file_stem()?.to_str()?.to_string();
            let contents = std::fs::read_to_string(&path)
                .inspect_err(|e| tracing::debug!(path = %path.display(), "skipping post: {e}"))
                .ok()?;
            let title = quoted_title(&contents)?;
            Some(ExistingPost {
                url: format!("/{blog_slug}/{slug}"),
                title,
                slug,
            })
        })
        .collect()
}

fn quoted_title(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let value = line.strip_prefix("title:")?.trim();
        let inner = value.strip_prefix('"')?.strip_suffix('"')?;
        (!inner.is_empty()).then(|| unescape(inner))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan_existing_posts(&dir.path().join("nope"), "blog").is_empty());
    }

    #[test]
    fn collects_titled_markdown_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("2025-03-05-roof-checks-1.md"),
            "---\ntitle: \"Roof \\\"Checks\\\"\"\n---\n\nBody",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("2025-01-01-gutters-2.md"),
            "---\ntitle: \"Gutters\"\n---\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "title: \"Ignored\"").unwrap();
        std::fs::write(dir.path().join("untitled.md"), "---\nauthor: \"x\"\n---\n").unwrap();

        let posts = scan_existing_posts(dir.path(), "news");
        assert_eq!(
            posts,
            vec![
                ExistingPost {
                    title: "Gutters".into(),
                    url: "/news/2025-01-01-gutters-2".into(),
                    slug: "2025-01-01-gutters-2".into(),
                },
                ExistingPost {
                    title: "Roof \"Checks\"".into(),
                    url: "/news/2025-03-05-roof-checks-1".into(),
                    slug: "2025-03-05-roof-checks-1".into(),
                },
            ]
        );
    }
}
