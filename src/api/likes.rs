use super::{ApiError, Client};

/// Toggles the current user's like and returns the new like count.
pub fn toggle(client: &mut Client, post_id: &str) -> Result<u64, ApiError> {
    let request = client.post(&format!("/like/{}", post_id));
    let reply = client.send_for_reply(request)?;

    reply
        .likes_count
        .ok_or_else(|| ApiError::BadResponse("missing 'likes_count' in like reply".to_string()))
}
