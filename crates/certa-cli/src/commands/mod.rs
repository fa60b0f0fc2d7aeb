//! Command implementations.

pub mod check;
pub mod goals;
pub mod prove;

pub use self::check::execute_check;
pub use self::goals::execute_goals;
pub use self::prove::execute_prove;

use crate::error::Result;
use certa_domain::KnowledgeBase;
use std::path::Path;

/// Load and validate a knowledge base file.
pub fn load_kb(path: &Path) -> Result<KnowledgeBase> {
    tracing::debug!("Loading knowledge base {}", path.display());
    Ok(certa_kb::load_from_path(path)?)
}
