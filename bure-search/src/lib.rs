//! Web search collaborators.
//!
//! A [`WebSearch`] takes a [`SearchRequest`] and returns the provider's
//! synthesized answer (when asked for one) together with the ranked hits.
//! [`TavilyClient`] talks to the Tavily search API.

mod tavily;
mod types;

pub use tavily::{TavilyClient, TavilyClientBuilder, DEFAULT_BASE_URL};
pub use types::{SearchRequest, SearchResponse, SearchResult};

use bure_core::Runnable;

pub trait WebSearch: Runnable<SearchRequest, SearchResponse> + Send + Sync {}

impl<T> WebSearch for T where T: Runnable<SearchRequest, SearchResponse> + Send + Sync {}
