//! Auth gate.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::debug;

use crate::{
    auth::{RequestIdentity, SessionToken, into_status_error},
    extensions::*,
    state::State,
};

/// Reject the request unless it carries a live access token.
///
/// Cookie clients get their auth cookie reissued with a fresh expiry.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let transport = state.transports.select(req);

    let Some(token) = transport.read_credential(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid credentials"));

        return;
    };

    let user = match state.app.auth.authenticate(&token).await {
        Ok(user) => user,
        Err(error) => {
            debug!("credential rejected: {error}");

            res.render(into_status_error(error));

            return;
        }
    };

    transport.write_credential(res, &token);

    depot.insert_identity(RequestIdentity::new(user, SessionToken::from(token)));

    ctrl.call_next(req, depot, res).await;
}
