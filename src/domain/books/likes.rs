use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookId, UserId};

/// Join record: `user_id` liked `book_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub book_id: BookId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
