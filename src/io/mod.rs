mod lister;
mod path;

pub use lister::{DirectoryLister, LocalLister};
pub use path::{check_segment, ensure_within_root, resolve_media_path};
