//! App Router

use salvo::Router;

use crate::{auth, email_verifications, healthcheck, sessions, tenants, users};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("sessions")
                .push(
                    Router::new()
                        .hoop(auth::guest::handler)
                        .post(sessions::create::handler),
                )
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .delete(sessions::delete::handler)
                        .push(
                            Router::with_path("current")
                                .hoop(tenants::middleware::handler)
                                .get(sessions::current::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("users")
                .hoop(auth::guest::handler)
                .post(users::create::handler),
        )
        .push(Router::with_path("email-verifications").get(email_verifications::handler))
}
