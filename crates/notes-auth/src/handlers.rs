use super::*;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web::web;
use notes_core::ID;
use notes_core::Unique;

fn blocking(e: actix_web::error::BlockingError) -> AuthError {
    AuthError::Hashing(e.to_string())
}

fn authorization<R: HttpMessage>(req: &R) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Checks the caller may act on account `id`, then loads it.
/// Ownership comes first so foreign and unknown ids look the same.
async fn owned(
    users: &dyn UserStore,
    gate: &Gate,
    caller: &Identity,
    id: ID<Member>,
) -> Result<Member, AuthError> {
    authorize(gate.lurker(), caller, id)?;
    users.by_id(id).await?.ok_or(AuthError::Missing)
}

pub async fn register(
    users: web::Data<dyn UserStore>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AuthError> {
    body.validate()?;
    let RegisterRequest {
        username,
        email,
        password,
        profile,
    } = body.into_inner();
    let credential = web::block(move || password::hash(&password))
        .await
        .map_err(blocking)??;
    let member = users
        .create(Member::new(username, email, profile), &credential)
        .await?;
    log::info!("registered member {} ({})", member.id(), member.username());
    Ok(HttpResponse::Created().json(serde_json::json!({ "user": UserInfo::from(&member) })))
}

/// Exchanges credentials for an authentication token.
///
/// Unknown usernames still pay for one password verification, and every
/// failure reads the same.
pub async fn login(
    users: web::Data<dyn UserStore>,
    gate: web::Data<Gate>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    let LoginRequest { username, password } = body.into_inner();
    let (member, credential) = match users.by_username(&username).await? {
        Some((member, credential)) => (Some(member), Some(credential)),
        None => (None, None),
    };
    let verified = web::block(move || match credential {
        Some(ref credential) => password::verify(Some(credential), &password).unwrap_or_else(|e| {
            log::warn!("{}", e);
            false
        }),
        None => {
            password::decoy(&password);
            false
        }
    })
    .await
    .map_err(blocking)?;
    let Some(member) = member.filter(|_| verified) else {
        log::debug!("rejected login for {:?}", username);
        return Err(AuthError::InvalidCredentials);
    };
    let token = gate.login(member.id()).await?;
    Ok(HttpResponse::Created().json(TokenResponse::from(&token)))
}

/// Revokes the presented token and drops the request back to anonymous.
pub async fn logout(req: HttpRequest, gate: web::Data<Gate>) -> Result<HttpResponse, AuthError> {
    gate.logout(authorization(&req).as_deref()).await?;
    attach(&req, gate.lurker().identity());
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "logged out" })))
}

pub async fn logout_all(
    req: HttpRequest,
    gate: web::Data<Gate>,
    caller: Caller,
) -> Result<HttpResponse, AuthError> {
    gate.logout_all(caller.identity()).await?;
    attach(&req, gate.lurker().identity());
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "all sessions revoked" })))
}

pub async fn whoami(gate: web::Data<Gate>, caller: Caller) -> HttpResponse {
    match gate.lurker().is(caller.identity()) {
        true => HttpResponse::Ok().json(serde_json::json!({ "anonymous": true })),
        false => HttpResponse::Ok().json(serde_json::json!({
            "anonymous": false,
            "user": UserInfo::from(caller.identity().member()),
        })),
    }
}

pub async fn me(caller: Caller) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "user": UserInfo::from(caller.identity().member()) }))
}

pub async fn get_user(
    users: web::Data<dyn UserStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, AuthError> {
    let member = owned(&**users, &gate, caller.identity(), ID::from(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserInfo::from(&member) })))
}

pub async fn update_user(
    users: web::Data<dyn UserStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AuthError> {
    let member = owned(&**users, &gate, caller.identity(), ID::from(path.into_inner())).await?;
    let member = users.update(body.into_inner().apply(member)?).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserInfo::from(&member) })))
}

pub async fn update_password(
    users: web::Data<dyn UserStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<PasswordUpdate>,
) -> Result<HttpResponse, AuthError> {
    let member = owned(&**users, &gate, caller.identity(), ID::from(path.into_inner())).await?;
    let PasswordUpdate { new_password } = body.into_inner();
    let credential = web::block(move || password::hash(&new_password))
        .await
        .map_err(blocking)??;
    users.update_password(member.id(), &credential).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Password updated successfully" })))
}
