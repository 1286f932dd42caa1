//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Helpers that must run inside
//! a larger write take an open transaction instead.

pub mod article_repo;
pub mod attachment_repo;
pub mod category_repo;
pub mod department_repo;
pub mod favorite_repo;
pub mod priority_repo;
pub mod recently_viewed_repo;
pub mod tag_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use attachment_repo::AttachmentRepo;
pub use category_repo::CategoryRepo;
pub use department_repo::DepartmentRepo;
pub use favorite_repo::FavoriteRepo;
pub use priority_repo::PriorityRepo;
pub use recently_viewed_repo::RecentlyViewedRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
