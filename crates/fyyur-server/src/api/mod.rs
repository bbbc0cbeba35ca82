pub mod artists;
pub mod error;
pub mod extract;
pub mod shows;
pub mod venues;

use serde::{Deserialize, Serialize};

pub use error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search_term: String,
}

/// Result of a write, with the confirmation shown to the user.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> MutationResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse<T: Serialize> {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_default_term() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.search_term, "");
    }

    #[test]
    fn test_mutation_response_serialization() {
        let json = serde_json::to_value(MutationResponse::new("done", 7)).unwrap();
        assert_eq!(json["message"], "done");
        assert_eq!(json["data"], 7);
    }
}
