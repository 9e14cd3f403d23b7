use crate::comm::FailureCause;
use crate::description::Description;

/// Receives start and end notifications for every executed test unit.
///
/// The bridge guarantees that `notify_start` for a unit is observed
/// strictly before the matching end notification, and that exactly one of
/// the end variants fires per execution.
pub trait ResultCollector {
    fn notify_start(&mut self, description: &Description);
    fn notify_end(&mut self, description: &Description);
    fn notify_end_with_cause(&mut self, description: &Description, cause: &FailureCause);
}
