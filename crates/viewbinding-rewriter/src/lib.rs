pub mod applier;
pub mod case;
pub mod config;
pub mod error;
pub mod format;
pub mod host;
pub mod matcher;
pub mod model;
pub mod names;
pub mod pipeline;
pub mod plan;
pub mod rename;
pub mod report;
pub mod syntax;
pub mod variant;
pub mod vfs;
pub mod workspace;

pub use config::Settings;
pub use error::{RewriteError, RewriteResult};
pub use host::{FieldId, Host, ModuleId, Reference};
pub use matcher::{BindingTarget, MatchResult, match_class};
pub use model::CompilationUnit;
pub use pipeline::Pipeline;
pub use plan::{RewriteEdit, RewritePlan};
pub use report::RunReport;
pub use variant::VariantSpec;
pub use vfs::FileId;
pub use workspace::{FileChange, WriteMode, Workspace};
