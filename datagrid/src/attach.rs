//! Lazy attachment of components to an ancestor.
//!
//! Components are declared standalone and only learn about their owner once a
//! container inserts them. The container calls
//! [`AttachmentMonitor::on_attached`] from its insertion hook; the component
//! records the owner in an [`Attachment`] and performs whatever late
//! initialization depends on it.

use crate::error::Result;

/// Binding state of a component that monitors an ancestor of type `T`.
#[derive(Debug, Clone, Default)]
pub enum Attachment<T> {
    /// Not yet inserted into a container.
    #[default]
    Detached,
    /// Bound to its owner.
    Attached(T),
}

/// What happened when an owner was offered to an [`Attachment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// First binding; late initialization should run.
    Bound,
    /// Already bound to the same owner; nothing to do.
    Unchanged,
    /// Already bound to a different owner.
    Conflict,
}

impl<T> Attachment<T> {
    /// Returns `true` once an owner has been recorded.
    pub fn is_attached(&self) -> bool {
        matches!(self, Attachment::Attached(_))
    }

    /// Returns the recorded owner, if any.
    pub fn owner(&self) -> Option<&T> {
        match self {
            Attachment::Detached => None,
            Attachment::Attached(owner) => Some(owner),
        }
    }

    /// Offers `owner` to this attachment.
    ///
    /// `same` decides whether an already recorded owner is the one offered.
    /// The transition is one-way: a bound attachment never changes owner.
    pub fn attach(&mut self, owner: T, same: impl FnOnce(&T, &T) -> bool) -> AttachOutcome {
        match self {
            Attachment::Detached => {
                *self = Attachment::Attached(owner);
                AttachOutcome::Bound
            }
            Attachment::Attached(current) if same(current, &owner) => AttachOutcome::Unchanged,
            Attachment::Attached(_) => AttachOutcome::Conflict,
        }
    }
}

/// Observer invoked when an ancestor of type `T` becomes reachable.
///
/// Containers call this from their insertion hook. Implementations must be
/// safe to call more than once with the same ancestor.
pub trait AttachmentMonitor<T: ?Sized> {
    /// Called when `ancestor` becomes reachable from this component.
    fn on_attached(&self, ancestor: &T) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_is_monotonic() {
        let mut attachment: Attachment<u32> = Attachment::default();
        assert!(!attachment.is_attached());
        assert_eq!(attachment.attach(1, |a, b| a == b), AttachOutcome::Bound);
        assert_eq!(attachment.attach(1, |a, b| a == b), AttachOutcome::Unchanged);
        assert_eq!(attachment.attach(2, |a, b| a == b), AttachOutcome::Conflict);
        assert_eq!(attachment.owner(), Some(&1));
    }
}
