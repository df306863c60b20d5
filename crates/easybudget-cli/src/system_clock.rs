use chrono::{DateTime, Utc};

use easybudget_core::time::Clock;

/// Wall-clock [`Clock`] used by the running application.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
