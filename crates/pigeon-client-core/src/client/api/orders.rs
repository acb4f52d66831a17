use futures::channel::oneshot;
use pigeon_shared::{
    const_config::path::{PATH_ORDERS_MINE, PATH_ORDER_CREATE, PATH_ORDER_DELETE_MINE},
    errors::MessageResponse,
    id::RecordId,
    orders::Order,
    req_args::OrderReqArgs,
};

use crate::{
    client::{UiCallBack, NO_ARGUMENTS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_order<F: UiCallBack>(
        &self,
        args: &OrderReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Order>> {
        self.send_request_expect_json(PATH_ORDER_CREATE, Some(args), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_my_orders<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Order>>> {
        self.send_request_expect_json(PATH_ORDERS_MINE, NO_ARGUMENTS, ui_notify)
    }

    /// Only succeeds while the order is still pending, see
    /// [`crate::policy::can_cancel_own_order`]
    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_my_order<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_ORDER_DELETE_MINE.with_id(id), NO_ARGUMENTS, ui_notify)
    }
}
