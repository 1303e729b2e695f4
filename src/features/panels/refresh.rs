use std::future::Future;

use super::session::ViewSession;
use super::state::{PanelState, Section, SectionSnapshot};
use crate::core::error::Result;
use crate::core::extractor::BrowserSession;
use crate::modules::backend::BackendResult;
use crate::modules::views::Toast;

/// How a section load reports failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// User navigation: failures surface as an error toast
    Interactive,
    /// Background refresh: failures are only logged
    Silent,
}

/// A role panel whose state lives in the [`ViewSession`]
pub trait Panel {
    type Section: Section;
    type Data: SectionSnapshot + std::fmt::Debug;

    const NAME: &'static str;

    fn state(session: &mut ViewSession) -> &mut PanelState<Self::Section, Self::Data>;
}

/// Activate `section`, run `fetch` and commit its result unless a newer fetch won.
///
/// The session lock is released while `fetch` is in flight. Auth failures are returned
/// so the caller signs the browser out; every other failure leaves the previous
/// snapshot in place.
pub async fn fetch_section<P, Fut>(
    browser: &BrowserSession,
    section: P::Section,
    mode: FetchMode,
    failure_message: &str,
    fetch: Fut,
) -> Result<bool>
where
    P: Panel,
    Fut: Future<Output = BackendResult<P::Data>>,
{
    let ticket = {
        let mut session = browser.handle.state.lock().await;
        let state = P::state(&mut session);
        state.activate(section);
        state.begin(section)
    };

    match fetch.await {
        Ok(data) => {
            let mut session = browser.handle.state.lock().await;
            let committed = P::state(&mut session).commit(ticket, data);
            if !committed {
                tracing::debug!(
                    "Discarded stale {} data for section {}",
                    P::NAME,
                    section.slug()
                );
            }
            Ok(committed)
        }
        Err(err) if err.is_auth_failure() => {
            browser.handle.state.lock().await.sign_out();
            Err(err.into())
        }
        Err(err) => {
            tracing::warn!(
                "Failed to load {} section {} ({:?}): {}",
                P::NAME,
                section.slug(),
                mode,
                err
            );
            if mode == FetchMode::Interactive {
                browser
                    .handle
                    .state
                    .lock()
                    .await
                    .push_toast(Toast::error(failure_message));
            }
            Ok(false)
        }
    }
}
