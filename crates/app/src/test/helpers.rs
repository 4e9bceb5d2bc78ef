//! Test Helpers

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;
use tokio::net::TcpListener;
use zeroize::Zeroizing;

use crate::{
    auth::Caller,
    clock::Clock,
    domain::users::records::{Role, UserUuid},
    mail::{HttpMailConfig, Mail, MailTransport, TransportError},
};

/// Clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct FixedClock(Mutex<Timestamp>);

impl FixedClock {
    pub(crate) fn at(now: Timestamp) -> Self {
        Self(Mutex::new(now))
    }

    pub(crate) fn advance(&self, by: SignedDuration) {
        let mut now = self.0.lock().expect("clock lock poisoned");
        *now = *now + by;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(Timestamp::constant(1_700_000_000, 0))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.0.lock().expect("clock lock poisoned")
    }
}

/// Mail transport that keeps every message it is handed.
#[derive(Debug, Default)]
pub(crate) struct RecordingMailTransport {
    sent: Mutex<Vec<Mail>>,
}

impl RecordingMailTransport {
    pub(crate) fn sent(&self) -> Vec<Mail> {
        self.sent.lock().expect("mail lock poisoned").clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, mail: Mail) -> Result<(), TransportError> {
        self.sent.lock().expect("mail lock poisoned").push(mail);

        Ok(())
    }
}

pub(crate) fn caller(role: Role) -> Caller {
    let uuid = UserUuid::new();

    Caller {
        uuid,
        name: format!("{role} {uuid}"),
        email: format!("{uuid}@example.com"),
        role,
    }
}

/// An administrator not backed by any stored identity.
pub(crate) fn admin() -> Caller {
    caller(Role::Admin)
}

/// An employee not backed by any stored identity.
pub(crate) fn employee() -> Caller {
    caller(Role::Employee)
}

/// Start a mail relay that accepts connections and never answers. Returns its
/// send URL.
pub(crate) async fn silent_relay() -> TestResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/send", listener.local_addr()?);

    tokio::spawn(async move {
        let mut held = Vec::new();

        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    Ok(url)
}

pub(crate) fn relay_config(url: String, timeout: Duration) -> HttpMailConfig {
    HttpMailConfig {
        url,
        api_key: Zeroizing::new("relay-key".to_string()),
        from: "noreply@example.com".to_string(),
        timeout,
    }
}
