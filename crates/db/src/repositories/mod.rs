//! Repository structs, one per table.

pub mod comment_repo;
pub mod media_repo;
pub mod project_repo;
pub mod report_repo;
pub mod stats_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use media_repo::MediaRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
