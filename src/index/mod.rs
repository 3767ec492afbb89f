mod cache;
mod category;

pub use cache::CategoryIndexCache;
pub use category::CategoryIndex;
