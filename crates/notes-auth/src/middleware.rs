use super::*;
use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::web;

type Outcome<B> = Result<ServiceResponse<EitherBody<B>>, Error>;

fn gate(req: &ServiceRequest) -> Result<web::Data<Gate>, AuthError> {
    req.app_data::<web::Data<Gate>>()
        .cloned()
        .ok_or(AuthError::Unconfigured("session gate"))
}

/// Resolves the bearer token and binds the resulting [`Identity`].
///
/// Requests without a header proceed as the [`Lurker`]; malformed
/// headers and unknown or expired tokens are answered with 401 here.
/// Every response passing through carries `Vary: Authorization`.
pub async fn authenticate<B: MessageBody>(req: ServiceRequest, next: Next<B>) -> Outcome<B> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned))
        .transpose()
        .map_err(|_| AuthError::MalformedHeader);
    let resolved = match (gate(&req), header) {
        (Ok(gate), Ok(header)) => gate.resolve(header.as_deref()).await,
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    let mut res = match resolved {
        Ok(identity) => {
            attach(&req, identity);
            next.call(req).await?.map_into_left_body()
        }
        Err(e) => req.error_response(e).map_into_right_body(),
    };
    res.headers_mut().append(
        header::VARY,
        header::HeaderValue::from_static("Authorization"),
    );
    Ok(res)
}

/// Refuses the [`Lurker`].
///
/// # Panics
///
/// If not nested inside [`authenticate`].
pub async fn require_user<B: MessageBody>(req: ServiceRequest, next: Next<B>) -> Outcome<B> {
    let admitted = gate(&req).and_then(|gate| match gate.lurker().is(&current(&req)) {
        true => Err(AuthError::Anonymous),
        false => Ok(()),
    });
    match admitted {
        Ok(()) => Ok(next.call(req).await?.map_into_left_body()),
        Err(e) => Ok(req.error_response(e).map_into_right_body()),
    }
}
