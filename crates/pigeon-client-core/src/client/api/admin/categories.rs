use futures::channel::oneshot;
use pigeon_shared::{
    catalog::{Category, CategoryName},
    const_config::path::{PATH_CATEGORY_CREATE, PATH_CATEGORY_DELETE, PATH_CATEGORY_UPDATE},
    errors::MessageResponse,
    id::RecordId,
};

use crate::{
    client::{UiCallBack, NO_ARGUMENTS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_category<F: UiCallBack>(
        &self,
        name: &CategoryName,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Category>> {
        let args = serde_json::json!({ "name": name });
        self.send_request_expect_json(PATH_CATEGORY_CREATE, Some(&args), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_category<F: UiCallBack>(
        &self,
        id: &RecordId,
        name: &CategoryName,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Category>> {
        let args = serde_json::json!({ "name": name });
        self.send_request_expect_json(PATH_CATEGORY_UPDATE.with_id(id), Some(&args), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_category<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_CATEGORY_DELETE.with_id(id), NO_ARGUMENTS, ui_notify)
    }
}
