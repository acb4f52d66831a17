use futures::channel::oneshot;
use pigeon_shared::{
    catalog::{Product, ProductDraft},
    const_config::path::{
        PATH_ADMIN_PRODUCT_CREATE, PATH_ADMIN_PRODUCT_DELETE, PATH_ADMIN_PRODUCT_UPDATE,
    },
    errors::MessageResponse,
    id::RecordId,
};

use crate::{
    client::{UiCallBack, NO_ARGUMENTS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_product<F: UiCallBack>(
        &self,
        args: &ProductDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Product>> {
        self.send_request_expect_json(PATH_ADMIN_PRODUCT_CREATE, Some(args), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_product<F: UiCallBack>(
        &self,
        id: &RecordId,
        args: &ProductDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Product>> {
        self.send_request_expect_json(PATH_ADMIN_PRODUCT_UPDATE.with_id(id), Some(args), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_product<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(
            PATH_ADMIN_PRODUCT_DELETE.with_id(id),
            NO_ARGUMENTS,
            ui_notify,
        )
    }
}
