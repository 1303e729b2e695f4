use super::state::PanelState;
use crate::features::admin::panel::{AdminData, AdminSection};
use crate::features::auth::model::UserProfile;
use crate::features::reports::panel::{PublicData, PublicSection};
use crate::features::worker::panel::{WorkerData, WorkerSection};
use crate::modules::views::Toast;

/// Everything the web front remembers about one browser between requests
#[derive(Debug, Default)]
pub struct ViewSession {
    toasts: Vec<Toast>,
    /// Profile from the most recent successful auth check
    pub current_user: Option<UserProfile>,
    pub public: PanelState<PublicSection, PublicData>,
    pub admin: PanelState<AdminSection, AdminData>,
    pub worker: PanelState<WorkerSection, WorkerData>,
}

impl ViewSession {
    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Drain queued toasts into the page being rendered
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    /// Forget the signed-in user and everything fetched on their behalf
    pub fn sign_out(&mut self) {
        self.current_user = None;
        self.public = PanelState::default();
        self.admin = PanelState::default();
        self.worker = PanelState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_are_drained_once() {
        let mut session = ViewSession::default();
        session.push_toast(Toast::success("Login successful!"));
        session.push_toast(Toast::error("Failed to load reports"));

        let toasts = session.take_toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].message, "Login successful!");
        assert!(session.take_toasts().is_empty());
    }

    #[test]
    fn test_sign_out_keeps_pending_toasts() {
        let mut session = ViewSession::default();
        session.admin.activate(AdminSection::Users);
        session.push_toast(Toast::success("Logged out successfully"));

        session.sign_out();
        assert_eq!(session.admin.active(), AdminSection::Dashboard);
        assert_eq!(session.take_toasts().len(), 1);
    }
}
