//! Rotating signing secret for bearer credentials

use rand::{distr::Alphanumeric, RngExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Secret length in characters; 86 alphanumerics carry a bit over 512 bits
const SECRET_LEN: usize = 86;

/// Process-wide holder of the current signing secret.
///
/// Many concurrent readers, one writer (the rotation task). The secret is
/// replaced wholesale, so readers always observe either the previous or the
/// new value. Nothing is persisted: a process restart invalidates every
/// outstanding bearer credential while session tokens stay valid.
#[derive(Clone)]
pub struct SecretRotator {
    secret: Arc<RwLock<String>>,
}

impl SecretRotator {
    /// Create a rotator holding a freshly generated secret
    pub fn new() -> Self {
        Self {
            secret: Arc::new(RwLock::new(generate_secret())),
        }
    }

    /// Get the current signing secret
    pub async fn current(&self) -> String {
        self.secret.read().await.clone()
    }

    /// Replace the secret with a fresh value, invalidating every credential
    /// signed with the previous one
    pub async fn rotate(&self) {
        let fresh = generate_secret();
        *self.secret.write().await = fresh;
        tracing::info!("Signing secret rotated");
    }

    /// Spawn the periodic rotation task.
    ///
    /// The first tick fires immediately, so a serving process never signs with
    /// the constructor's secret. The returned handle is owned by the process
    /// lifecycle; abort it on shutdown.
    pub fn start(&self, period: Duration) -> JoinHandle<()> {
        let rotator = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                rotator.rotate().await;
            }
        })
    }
}

impl Default for SecretRotator {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}
