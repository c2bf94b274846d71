//! Guest gate: keeps signed-in callers off guest-only routes.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::debug;

use crate::{extensions::*, state::State};

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

    let Some(token) = state.transports.select(req).read_credential(req) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    // Any failure, transient or not, leaves the caller a guest.
    match state.app.auth.authenticate(&token).await {
        Ok(user) => {
            debug!(%user, "authenticated caller on guest-only route");

            res.render(StatusError::forbidden().brief("Already authenticated"));
        }
        Err(error) => {
            debug!("guest credential did not verify: {error}");

            ctrl.call_next(req, depot, res).await;
        }
    }
}
