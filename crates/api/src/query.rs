//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /projects` (`?q=`).
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    /// Case-insensitive filter on title, description, and tags.
    #[serde(default)]
    pub q: Option<String>,
}
