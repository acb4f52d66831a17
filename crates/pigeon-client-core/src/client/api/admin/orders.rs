use futures::channel::oneshot;
use pigeon_shared::{
    const_config::path::{PATH_ADMIN_ORDERS, PATH_ADMIN_ORDER_DELETE, PATH_ADMIN_ORDER_STATUS},
    errors::MessageResponse,
    id::RecordId,
    orders::{Order, OrderStatus},
};

use crate::{
    client::{UiCallBack, NO_ARGUMENTS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_all_orders<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Order>>> {
        self.send_request_expect_json(PATH_ADMIN_ORDERS, NO_ARGUMENTS, ui_notify)
    }

    /// The status is sent as a bare JSON string
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_order_status<F: UiCallBack>(
        &self,
        id: &RecordId,
        status: OrderStatus,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Order>> {
        self.send_request_expect_json(PATH_ADMIN_ORDER_STATUS.with_id(id), Some(&status), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_order<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_ADMIN_ORDER_DELETE.with_id(id), NO_ARGUMENTS, ui_notify)
    }
}
