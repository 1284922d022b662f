//! Service price list commands.

use hma_core::{NewServiceItem, ServiceItem};
use tracing::debug;

use crate::context::Office;
use crate::error::{ApiError, ApiResult};

pub fn add_service(office: &Office, input: NewServiceItem) -> ApiResult<ServiceItem> {
    debug!(name = %input.name, "add_service command");
    let item = office.state().mutate(|state| state.add_service(input))?;
    Ok(item)
}

pub fn list_services(office: &Office) -> Vec<ServiceItem> {
    debug!("list_services command");
    office.state().read(|state| state.inventory().to_vec())
}

pub fn delete_service(office: &Office, id: &str) -> ApiResult<ServiceItem> {
    debug!(id = %id, "delete_service command");

    office.state().mutate(|state| {
        let item = hma_core::registry::find(state.inventory(), id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Service", id))?;
        state.delete_service(id);
        Ok(item)
    })
}
