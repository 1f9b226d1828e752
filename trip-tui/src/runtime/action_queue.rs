use plan_items::ApiError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug)]
pub(super) enum Action {
    /// Validate the open form and send it in the background.
    SubmitPlanItem,
    /// Posted by the submission task when the backend answers.
    SubmissionFinished {
        session: u64,
        result: Result<(), ApiError>,
    },
    RefreshPlanItems,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
