//! Session service - login state and the inactivity timer

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::application::errors::AdminError;
use crate::application::validation::validate_credentials;
use crate::domain::entities::{Activity, Session};

/// Fixed idle interval after which the session is cleared
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Holds the current session and a single outstanding idle timer.
/// Re-arming the timer always aborts the previous handle first, so at
/// most one timer task is live at a time.
pub struct SessionManager {
    session: Arc<RwLock<Option<Session>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
            timer: Mutex::new(None),
        }
    }

    /// Validate credentials and start a session with a fresh idle timer
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Session, AdminError> {
        let errors = validate_credentials(email, password, confirm);
        if !errors.is_empty() {
            return Err(AdminError::Validation(errors));
        }

        let session = Session::new(email);
        *self.session.write().await = Some(session.clone());
        self.arm_timer();
        tracing::info!("session started for {}", session.user);
        Ok(session)
    }

    pub async fn logout(&self) {
        if let Some(session) = self.session.write().await.take() {
            tracing::info!("session ended for {}", session.user);
        }
        if let Some(handle) = self.timer.lock().unwrap().take() {
            handle.abort();
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// A qualifying interaction: stamps the session and restarts the
    /// countdown. Ignored while logged out.
    pub async fn record_activity(&self, activity: Activity) {
        let mut guard = self.session.write().await;
        let Some(session) = guard.as_mut() else {
            return;
        };
        session.touch();
        drop(guard);
        tracing::debug!("activity {:?} reset idle timer", activity);
        self.arm_timer();
    }

    fn arm_timer(&self) {
        let session = Arc::clone(&self.session);
        // Anchor the deadline now, not at the task's first poll
        let sleep = tokio::time::sleep(IDLE_TIMEOUT);
        let handle = tokio::spawn(async move {
            sleep.await;
            if let Some(expired) = session.write().await.take() {
                tracing::info!("session for {} expired after inactivity", expired.user);
            }
        });

        let mut timer = self.timer.lock().unwrap();
        if let Some(previous) = timer.replace(handle) {
            previous.abort();
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "admin@example.com";
    const PASSWORD: &str = "Abc123!x";

    async fn settle() {
        // let the timer task observe the advanced clock
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let manager = SessionManager::new();
        let err = manager.login("nope", PASSWORD, PASSWORD).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert!(!manager.is_logged_in().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expires_after_idle_timeout() {
        let manager = SessionManager::new();
        manager.login(EMAIL, PASSWORD, PASSWORD).await.unwrap();
        assert!(manager.is_logged_in().await);

        tokio::time::advance(IDLE_TIMEOUT + Duration::from_secs(1)).await;
        settle().await;
        assert!(!manager.is_logged_in().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_resets_the_countdown() {
        let manager = SessionManager::new();
        manager.login(EMAIL, PASSWORD, PASSWORD).await.unwrap();

        tokio::time::advance(Duration::from_secs(4 * 60)).await;
        settle().await;
        manager.record_activity(Activity::KeyPress).await;

        // four more minutes: past the original deadline, before the new one
        tokio::time::advance(Duration::from_secs(4 * 60)).await;
        settle().await;
        assert!(manager.is_logged_in().await);

        tokio::time::advance(Duration::from_secs(2 * 60)).await;
        settle().await;
        assert!(!manager.is_logged_in().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_cancels_the_timer() {
        let manager = SessionManager::new();
        manager.login(EMAIL, PASSWORD, PASSWORD).await.unwrap();
        manager.logout().await;
        assert!(!manager.is_logged_in().await);

        // nothing left to fire
        tokio::time::advance(IDLE_TIMEOUT * 2).await;
        settle().await;
        assert!(manager.current().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_while_logged_out_is_ignored() {
        let manager = SessionManager::new();
        manager.record_activity(Activity::Click).await;
        assert!(!manager.is_logged_in().await);
    }
}
