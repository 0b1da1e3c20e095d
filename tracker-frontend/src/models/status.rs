use chrono::NaiveDate;

/// Documents expiring within this many days (inclusive) are flagged.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 30;

/// Urgency of a document, derived from its expiry date and the current day.
/// Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryStatus {
    UpToDate,
    ExpiringSoon,
    Overdue,
}

impl ExpiryStatus {
    /// Whole calendar days from `today` to the expiry date decide the status.
    /// A missing expiry date counts as overdue.
    pub fn derive(expiry_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(expiry_date) = expiry_date else {
            return ExpiryStatus::Overdue;
        };

        let days_until_expiry = expiry_date.signed_duration_since(today).num_days();
        if days_until_expiry < 0 {
            ExpiryStatus::Overdue
        } else if days_until_expiry <= EXPIRING_SOON_WINDOW_DAYS {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::UpToDate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::UpToDate => "up-to-date",
            ExpiryStatus::ExpiringSoon => "expiring-soon",
            ExpiryStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::UpToDate => "up to date",
            ExpiryStatus::ExpiringSoon => "expiring soon",
            ExpiryStatus::Overdue => "overdue",
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            ExpiryStatus::UpToDate => "green",
            ExpiryStatus::ExpiringSoon => "yellow",
            ExpiryStatus::Overdue => "red",
        }
    }
}
