pub mod edit;
pub mod format;
pub mod get;
pub mod set;
pub mod version;

pub use edit::Edit;
pub use format::Format;
pub use get::Get;
pub use set::Set;
pub use version::Version;
