// Keyword-metrics clients — external difficulty data for enrichment.

pub mod file;
pub mod http;
pub mod traits;

pub use self::file::FileDifficultyProvider;
pub use self::http::HttpDifficultyProvider;
pub use self::traits::DifficultyProvider;
