//! Share codes for review forms

use uuid::Uuid;

/// Number of characters in a share code
pub const CODE_LENGTH: usize = 8;

/// Generate a fresh share code.
///
/// Codes are the leading hex digits of a random v4 UUID. They are not
/// guaranteed unique; the store's unique constraint catches collisions.
pub fn generate_code() -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(CODE_LENGTH);
    code
}
