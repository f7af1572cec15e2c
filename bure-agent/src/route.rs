use bure_core::BureError;

use crate::{RecipeState, ToolChoice};

/// The two fulfilment branches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    Generate,
    Search,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Generate => "generate",
            Branch::Search => "search",
        }
    }
}

/// Pick the branch for the classifier's decision. There is no fallback: an
/// unknown or missing label aborts the run.
pub fn route(state: &RecipeState) -> Result<Branch, BureError> {
    match &state.tool {
        Some(ToolChoice::Generate) => Ok(Branch::Generate),
        Some(ToolChoice::Search) => Ok(Branch::Search),
        Some(tool @ ToolChoice::Unknown(_)) => Err(BureError::InvalidRoute(tool.label().to_string())),
        None => Err(BureError::InvalidRoute(String::new())),
    }
}
