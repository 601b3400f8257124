use crate::constants::messages::WRONG_PLACE;

/// Catch-all for unknown paths and for unsupported methods on known ones.
pub async fn wrong_place() -> &'static str {
    WRONG_PLACE
}
