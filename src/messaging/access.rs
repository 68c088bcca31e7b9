/**
 * Access Control Layer
 *
 * Capability predicates over `(caller, message)`, evaluated explicitly
 * after fetching a message by id.
 *
 * The choice of error is deliberate and differs per operation:
 *
 * - edit/delete are sender-only, and a foreign message must be
 *   indistinguishable from a nonexistent one, so the failure is
 *   `NotFound`;
 * - download is participant-only, and a non-participant is told
 *   `Forbidden` outright.
 */
use crate::error::ApiError;
use crate::messaging::store::Message;

/// True when the caller authored the message.
pub fn is_sender(caller_id: i64, message: &Message) -> bool {
    caller_id == message.sender_id
}

/// True when the caller is either end of the message.
pub fn is_participant(caller_id: i64, message: &Message) -> bool {
    caller_id == message.sender_id || caller_id == message.receiver_id
}

/// Sender-only gate for edit and delete.
///
/// Fails with `NotFound` so that ownership stays opaque to non-owners.
pub fn ensure_sender(caller_id: i64, message: &Message) -> Result<(), ApiError> {
    if is_sender(caller_id, message) {
        Ok(())
    } else {
        Err(ApiError::not_found("No Message matches the given query."))
    }
}

/// Participant gate for download.
pub fn ensure_participant(caller_id: i64, message: &Message) -> Result<(), ApiError> {
    if is_participant(caller_id, message) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Not Allowed"))
    }
}
