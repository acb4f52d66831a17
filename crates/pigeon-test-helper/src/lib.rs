#![warn(unused_crate_dependencies)]

use anyhow::Context as _;
use pigeon_shared::{
    req_args::LoginReqArgs,
    telemetry::{init_tracing, TraceDestination},
    uac::{RoleName, UserProfile},
};
use std::fmt::Debug;
use std::net::TcpListener;
use std::ops::Deref;
use std::sync::LazyLock;
use uuid::Uuid;

mod stub_backend;

pub use stub_backend::StubBackend;

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let destination = if std::env::var("TEST_LOG").is_ok() {
        TraceDestination::File
    } else {
        TraceDestination::Discard
    };
    match init_tracing("client_tests", "info", destination).unwrap() {
        Some(path) => format!("Traces for tests being written to: {path:?}"),
        None => "Traces set to std::io::sink".to_string(),
    }
});

pub struct TestApp<C> {
    pub address: String,
    pub backend: StubBackend,
    pub normal_user: TestUser,
    pub admin_user: TestUser,
    pub super_admin_user: TestUser,
    pub core_client: C,
}

impl<C> Debug for TestApp<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestApp")
            .field("address", &self.address)
            .field("normal_user", &self.normal_user)
            .field("admin_user", &self.admin_user)
            .field("super_admin_user", &self.super_admin_user)
            .finish()
    }
}

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

/// Starts a fresh stub backend on a random port with one user of each kind
///
/// `build_client` receives the address of the backend
pub async fn spawn_app<C, F>(build_client: F) -> TestApp<C>
where
    F: FnOnce(String) -> C,
{
    start_tracing();
    let backend = StubBackend::default();
    let mut normal_user = TestUser::generate("normal");
    normal_user.store(&backend, &[RoleName::User]);
    let mut admin_user = TestUser::generate("admin");
    admin_user.store(&backend, &[RoleName::User, RoleName::Admin]);
    let mut super_admin_user = TestUser::generate("super");
    super_admin_user.store(&backend, &[RoleName::User, RoleName::SuperAdmin]);

    let application_port = start_server_in_background(&backend)
        .expect("failed to start stub backend");
    let address = port_to_test_address(application_port);
    let core_client = build_client(address.clone());

    TestApp {
        address,
        backend,
        normal_user,
        admin_user,
        super_admin_user,
        core_client,
    }
}

pub fn port_to_test_address(application_port: u16) -> String {
    format!("http://localhost:{application_port}")
}

fn start_server_in_background(backend: &StubBackend) -> anyhow::Result<u16> {
    // Use a random OS port
    let listener = TcpListener::bind("127.0.0.1:0").context("failed to bind random port")?;
    let application_port = listener
        .local_addr()
        .context("failed to get local address")?
        .port();
    let server = backend.build_server(listener)?;
    tokio::spawn(server);
    Ok(application_port)
}

fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}

#[derive(Debug)]
pub struct TestUser {
    pub username: String,
    pub password: String,
    /// Set once stored in the backend
    pub profile: Option<UserProfile>,
}

impl TestUser {
    pub fn generate(username_prefix: &str) -> Self {
        let username = format!("{username_prefix}-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            username,
            password: Uuid::new_v4().to_string(),
            profile: None,
        }
    }

    pub fn login_args(&self) -> LoginReqArgs {
        LoginReqArgs::new(self.username.clone(), self.password.clone().into())
    }

    pub fn profile(&self) -> &UserProfile {
        self.profile
            .as_ref()
            .expect("test user has not been stored yet")
    }

    pub fn store(&mut self, backend: &StubBackend, roles: &[RoleName]) {
        self.profile = Some(backend.add_user(&self.username, &self.password, roles));
    }
}
