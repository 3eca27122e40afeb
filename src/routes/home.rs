use crate::server::Server;
use axum::{Router, response::Html, routing::get};

const ROUTES: [(&str, &str); 5] = [
    (
        "/api/v1.0/precipitation",
        "Precipitation data for the last 12 months",
    ),
    ("/api/v1.0/stations", "List of weather stations"),
    (
        "/api/v1.0/tobs/&lt;start_date&gt;",
        "Temperature observations of the most active station from start_date",
    ),
    (
        "/api/v1.0/&lt;start_date&gt;",
        "Minimum, average, and maximum temperatures from start_date to the end of the dataset",
    ),
    (
        "/api/v1.0/&lt;start_date&gt;/&lt;end_date&gt;",
        "Minimum, average, and maximum temperatures between start_date and end_date",
    ),
];

pub fn create_home_routes() -> Router<Server> {
    Router::new().route("/", get(home))
}

/// Welcome page listing the available routes
pub async fn home() -> Html<String> {
    let mut page = String::from("Welcome to the Climate Analysis API!<br/>Available Routes:<br/>");
    for (path, description) in ROUTES {
        page.push_str(&format!("{} - {}<br/>", path, description));
    }
    Html(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_home_lists_every_route() {
        let Html(page) = home().await;
        assert!(page.starts_with("Welcome to the Climate Analysis API!"));
        assert!(page.contains("/api/v1.0/precipitation"));
        assert!(page.contains("/api/v1.0/stations"));
        assert!(page.contains("/api/v1.0/tobs/&lt;start_date&gt;"));
        assert!(page.contains("/api/v1.0/&lt;start_date&gt;/&lt;end_date&gt;"));
    }
}
