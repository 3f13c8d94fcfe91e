use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An authenticated session for the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub token: Uuid,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(user: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user: user.into(),
            token: Uuid::new_v4(),
            started_at: now,
            last_activity: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

/// User interactions that count as activity and re-arm the idle timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    PointerMove,
    KeyPress,
    Click,
    Scroll,
}
