//! Per-request identity slot.
//!
//! The [`authenticate`] middleware writes exactly one [`Identity`] into
//! the request extensions before any handler runs. The slot type is
//! private, so nothing outside this module can forge or read it
//! directly.
use super::*;
use actix_web::FromRequest;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use std::future::Ready;

#[derive(Clone)]
struct Slot(Identity);

/// Binds `identity` to the request, replacing whatever was there.
pub fn attach<R: HttpMessage>(req: &R, identity: Identity) {
    req.extensions_mut().insert(Slot(identity));
}

fn lookup<R: HttpMessage>(req: &R) -> Option<Identity> {
    req.extensions().get::<Slot>().map(|slot| slot.0.clone())
}

/// Identity bound to this request.
///
/// # Panics
///
/// If the route is not wrapped by [`authenticate`].
pub fn current<R: HttpMessage>(req: &R) -> Identity {
    lookup(req).expect("route is wrapped by the authenticate middleware")
}

/// Extractor for the identity bound by [`authenticate`].
///
/// # Panics
///
/// Same as [`current`]: a route taking a `Caller` without the
/// middleware is a wiring bug, not a client error.
pub struct Caller(pub Identity);

impl Caller {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for Caller {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(Ok(Caller(current(req))))
    }
}
