use futures::channel::oneshot;
use pigeon_shared::{
    catalog::{Category, Page, PageRequest, Product},
    const_config::path::{
        PATH_CATEGORIES, PATH_CATEGORY, PATH_PRODUCT, PATH_PRODUCTS, PATH_PRODUCTS_SEARCH,
    },
    id::RecordId,
    req_args::SearchReqArgs,
};

use crate::{
    client::{UiCallBack, NO_ARGUMENTS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_products<F: UiCallBack>(
        &self,
        page_request: PageRequest,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Page<Product>>> {
        self.send_request_expect_json(PATH_PRODUCTS, Some(&page_request), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn search_products<F: UiCallBack>(
        &self,
        keyword: &str,
        page_request: PageRequest,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Page<Product>>> {
        let args = SearchReqArgs::new(keyword, page_request);
        self.send_request_expect_json(PATH_PRODUCTS_SEARCH, Some(&args), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_product<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Product>> {
        self.send_request_expect_json(PATH_PRODUCT.with_id(id), NO_ARGUMENTS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_categories<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Category>>> {
        self.send_request_expect_json(PATH_CATEGORIES, NO_ARGUMENTS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_category<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Category>> {
        self.send_request_expect_json(PATH_CATEGORY.with_id(id), NO_ARGUMENTS, ui_notify)
    }
}
