use futures::channel::oneshot;
use pigeon_shared::{
    const_config::path::{
        PATH_ADMIN_USER, PATH_ADMIN_USERS, PATH_ADMIN_USER_DELETE, PATH_ADMIN_USER_ENABLED,
        PATH_ADMIN_USER_ROLES, PATH_ADMIN_USER_UPDATE,
    },
    errors::MessageResponse,
    id::RecordId,
    req_args::admin::UserUpdateReqArgs,
    uac::{RoleName, UserProfile},
};
use secrecy::ExposeSecret as _;

use crate::{
    client::{UiCallBack, NO_ARGUMENTS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_users<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<UserProfile>>> {
        self.send_request_expect_json(PATH_ADMIN_USERS, NO_ARGUMENTS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_user<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_ADMIN_USER.with_id(id), NO_ARGUMENTS, ui_notify)
    }

    #[tracing::instrument(skip(args, ui_notify))]
    pub fn update_user<F: UiCallBack>(
        &self,
        id: &RecordId,
        args: &UserUpdateReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        let mut body = serde_json::json!({
            "username": args.username,
            "email": args.email,
        });
        if let Some(password) = args
            .password
            .as_ref()
            .map(|x| x.expose_secret())
            .filter(|x| !x.is_empty())
        {
            body["password"] = password.into();
        }
        self.send_request_expect_json(PATH_ADMIN_USER_UPDATE.with_id(id), Some(&body), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn set_user_enabled<F: UiCallBack>(
        &self,
        id: &RecordId,
        enabled: bool,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(
            PATH_ADMIN_USER_ENABLED.with_id(id),
            Some(&enabled),
            ui_notify,
        )
    }

    /// Replaces the user's roles. See [`crate::policy::toggled_admin_roles`]
    /// for the list used when toggling admin.
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_user_roles<F: UiCallBack>(
        &self,
        id: &RecordId,
        roles: &[RoleName],
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_ADMIN_USER_ROLES.with_id(id), Some(&roles), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_user<F: UiCallBack>(
        &self,
        id: &RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_ADMIN_USER_DELETE.with_id(id), NO_ARGUMENTS, ui_notify)
    }
}
