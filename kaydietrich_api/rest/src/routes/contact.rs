use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing, Extension, Json, Router,
};
use kaydietrich_core_contact_contracts::{ContactField, ContactService, ContactSubmitError};

use super::{internal_server_error, status};
use crate::{middlewares::client_ip::ClientIp, models::contact::ApiContactSubmission};

const METHOD_NOT_ALLOWED: &str = "Nur POST-Anfragen erlaubt";
const INVALID_JSON: &str = "Ungültige JSON-Daten";
const INVALID_EMAIL: &str = "Ungültige E-Mail-Adresse";
const ACCEPTED: &str =
    "Vielen Dank! Ihre Nachricht wurde erfolgreich gesendet. Ich melde mich schnellstmöglich bei Ihnen.";
const SEND_FAILED: &str = "Fehler beim Senden der Nachricht. Bitte versuchen Sie es später erneut \
                           oder senden Sie eine E-Mail direkt an kontakt@kaydietrich.de";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(submit)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactService>>,
    Extension(client_ip): Extension<ClientIp>,
    payload: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return status(StatusCode::BAD_REQUEST, false, INVALID_JSON);
    };

    match service.submit(payload.into(), client_ip.0).await {
        // An absorbed bot submission gets the exact same response as a
        // delivered one.
        Ok(_) => status(StatusCode::OK, true, ACCEPTED),
        Err(ContactSubmitError::MissingField(field)) => status(
            StatusCode::BAD_REQUEST,
            false,
            format!("Pflichtfeld fehlt: {field}"),
        ),
        Err(ContactSubmitError::InvalidEmail) => {
            status(StatusCode::BAD_REQUEST, false, INVALID_EMAIL)
        }
        Err(ContactSubmitError::FieldTooShort(field)) => {
            status(StatusCode::BAD_REQUEST, false, too_short(field))
        }
        Err(ContactSubmitError::FieldTooLong(field)) => {
            status(StatusCode::BAD_REQUEST, false, too_long(field))
        }
        Err(ContactSubmitError::Send) => {
            status(StatusCode::INTERNAL_SERVER_ERROR, false, SEND_FAILED)
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    status(StatusCode::METHOD_NOT_ALLOWED, false, METHOD_NOT_ALLOWED)
}

fn too_short(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name zu kurz (min. 2 Zeichen)",
        ContactField::Message => "Nachricht zu kurz (min. 10 Zeichen)",
        ContactField::Email | ContactField::Company => "Eingabe zu kurz",
    }
}

fn too_long(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name zu lang (max. 256 Zeichen)",
        ContactField::Company => "Unternehmen zu lang (max. 256 Zeichen)",
        ContactField::Message => "Nachricht zu lang (max. 4096 Zeichen)",
        ContactField::Email => "Eingabe zu lang",
    }
}
