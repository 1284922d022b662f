//! Switches the remembered screen.

use hma_core::View;
use tracing::debug;

use crate::context::Office;
use crate::error::{ApiError, ApiResult};

pub fn set_view(office: &Office, key: &str) -> ApiResult<View> {
    debug!(key = %key, "set_view command");

    let view = View::from_key(key).ok_or_else(|| {
        let known: Vec<&str> = View::ALL.iter().map(View::key).collect();
        ApiError::validation(format!(
            "Unknown view '{}', expected one of: {}",
            key,
            known.join(", ")
        ))
    })?;

    office.state().mutate(|state| {
        state.set_view(view);
        Ok::<_, ApiError>(view)
    })
}

pub fn current_view(office: &Office) -> View {
    office.state().read(|state| state.current_view())
}
