use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing, Router,
};

/// Serves the embedded static frontend, including the browser-side
/// submission scripts.
pub fn router() -> Router<()> {
    Router::new()
        .route("/", routing::get(index))
        .route("/assets/styles.css", routing::get(styles))
        .route("/assets/main.js", routing::get(main_js))
        .route("/assets/contact-form.js", routing::get(contact_form_js))
        .route("/assets/toast.js", routing::get(toast_js))
}

async fn index() -> Html<&'static str> {
    Html(kaydietrich_assets::web::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        kaydietrich_assets::web::STYLES_CSS,
    )
}

async fn main_js() -> impl IntoResponse {
    script(kaydietrich_assets::web::MAIN_JS)
}

async fn contact_form_js() -> impl IntoResponse {
    script(kaydietrich_assets::web::CONTACT_FORM_JS)
}

async fn toast_js() -> impl IntoResponse {
    script(kaydietrich_assets::web::TOAST_JS)
}

fn script(source: &'static str) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        source,
    )
}
