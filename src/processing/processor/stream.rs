use crate::model::{Channel, StreamRef};
use crate::utils::decode_component;

/// Recovers the channel name from `prefix + encoded name`.
pub fn channel_name_from_id<'a>(channel_id: &'a str, id_prefix: &str) -> Option<std::borrow::Cow<'a, str>> {
    channel_id.strip_prefix(id_prefix).and_then(decode_component)
}

/// First channel with exactly the decoded name wins.
pub fn resolve_stream(channels: &[Channel], channel_id: &str, id_prefix: &str) -> Option<StreamRef> {
    let name = channel_name_from_id(channel_id, id_prefix)?;
    channels.iter()
        .find(|channel| channel.name == name.as_ref())
        .map(|channel| StreamRef {
            title: channel.name.clone(),
            url: channel.url.clone(),
        })
}
