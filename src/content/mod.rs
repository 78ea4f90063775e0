mod assemble;
mod existing;
mod frontmatter;
mod post;
mod slug;

pub use assemble::{assemble, build_frontmatter, reading_time};
pub use existing::{ExistingPost, scan_existing_posts};
pub use frontmatter::{FRONTMATTER_KEYS, Frontmatter, FrontmatterValue};
pub use post::{GeneratedPost, PostImage};
pub use slug::{MAX_SLUG_CHARS, filename, slugify};
