use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::{Ready, ready};

use crate::auth::policy::{self, Access};
use crate::auth::session::{self, Claims, SessionConfig};
use crate::error::ApiError;

/// A caller holding a valid session token (any role).
pub struct Session(pub Claims);

impl FromRequest for Session {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(current_claims(req).map(Session).ok_or(ApiError::Unauthorized))
    }
}

/// A caller whose session passes [`policy::is_admin`].
pub struct AdminSession(pub Claims);

impl FromRequest for AdminSession {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            current_claims(req)
                .filter(policy::is_admin)
                .map(AdminSession)
                .ok_or(ApiError::Unauthorized),
        )
    }
}

fn current_claims(req: &HttpRequest) -> Option<Claims> {
    let Some(config) = req.app_data::<web::Data<SessionConfig>>() else {
        tracing::error!("Session config not registered");
        return None;
    };

    session::claims_from_request(req, config)
}

/// Route guard evaluated once per request, ahead of every handler.
///
/// Admin pages without an admin session redirect to the login page; admin
/// API calls get `401 { "error": "Unauthorized" }`.
pub async fn admin_guard<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    // Classify the percent-decoded path the router matches on, not the raw URI.
    let path = req.match_info().as_str().to_owned();
    let access = policy::classify(req.method(), &path);

    let allowed = match access {
        Access::Public => true,
        Access::AdminPage | Access::AdminApi => current_claims(req.request())
            .as_ref()
            .is_some_and(policy::is_admin),
    };

    if allowed {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    }

    tracing::debug!(method = %req.method(), %path, "Rejected request without an admin session");

    let response = match access {
        Access::AdminPage => HttpResponse::Found()
            .insert_header((header::LOCATION, policy::LOGIN_PAGE))
            .finish(),
        _ => ApiError::Unauthorized.error_response(),
    };

    Ok(req.into_response(response).map_into_right_body())
}
