//! User list mutations applied by the coordinator

use crate::models::User;

/// Removes the first user whose username matches `username`
///
/// The order of the remaining users is preserved. At most one entry is
/// removed, so duplicate usernames are taken out one call at a time.
/// Returns the removed record, or `None` if nothing matched.
pub fn remove_first_by_username(users: &mut Vec<User>, username: &str) -> Option<User> {
    let index = users.iter().position(|u| u.username == username)?;
    Some(users.remove(index))
}

/// Replaces the first user with the same username as `user`
///
/// Returns false and leaves the list untouched if no entry matched.
pub fn replace_by_username(users: &mut [User], user: User) -> bool {
    match users.iter_mut().find(|u| u.same_account(&user)) {
        Some(slot) => {
            *slot = user;
            true
        }
        None => false,
    }
}
