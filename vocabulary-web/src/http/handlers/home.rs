use axum::response::Html;

use crate::pages;

pub async fn home_handler() -> Html<String> {
    Html(pages::home())
}
