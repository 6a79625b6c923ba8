use crate::directory::Directory;

/// The role an operation requires on a directory.
///
/// Roles form a lattice: `All` < `Subscriber` < `Cooperator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Privilege {
    /// No requirement.
    All,
    /// A cooperator or an unexpired subscriber.
    Subscriber,
    /// A member of the cooperator set.
    Cooperator,
}

/// Decides whether `actor_id` holds `required` on `directory` at `timestamp`.
///
/// Being the creator grants nothing by itself: the creator is a cooperator only while
/// still listed in `cooperators`.
pub fn check_privilege(
    directory: &Directory,
    actor_id: &str,
    timestamp: i64,
    required: Privilege,
) -> bool {
    match required {
        Privilege::All => true,
        Privilege::Subscriber => {
            directory.is_cooperator(actor_id) || directory.is_active_subscriber(actor_id, timestamp)
        }
        Privilege::Cooperator => directory.is_cooperator(actor_id),
    }
}
