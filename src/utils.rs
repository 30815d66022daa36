//! Helper statics shared across api/ and front/

use std::sync::LazyLock;

/// Client to make http requests
pub static REQUEST_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);
